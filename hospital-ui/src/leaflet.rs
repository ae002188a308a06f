#![cfg(target_arch = "wasm32")]

//! Bindings tối thiểu tới Leaflet (`window.L`) cho bản đồ bệnh viện.

use hospital_core::{DirectoryConfig, DirectoryError};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const LOCATED_ZOOM: u8 = 12;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn leaflet_map(element_id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: u8) -> Map;

    #[wasm_bindgen(method, js_name = on)]
    fn on_map_event(this: &Map, event: &str, handler: &Function) -> Map;

    #[wasm_bindgen(method)]
    fn locate(this: &Map, options: &JsValue) -> Map;

    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_layer_to(this: &TileLayer, map: &Map) -> TileLayer;

    #[derive(Clone)]
    type Icon;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn leaflet_icon(options: &JsValue) -> Icon;

    type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn leaflet_marker(latlng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(method, js_name = on)]
    fn on_marker_event(this: &Marker, event: &str, handler: &Function) -> Marker;
}

/// Bản đồ Leaflet kèm icon marker bệnh viện.
pub struct HospitalMap {
    map: Map,
    icon: Icon,
}

impl HospitalMap {
    /// Khởi tạo bản đồ trong phần tử `element_id` với lớp tile OpenStreetMap.
    pub fn init(element_id: &str, config: &DirectoryConfig) -> Result<Self, JsValue> {
        let map = leaflet_map(element_id)?;
        let [lat, lng] = config.map_center;
        map.set_view(&lat_lng(lat, lng), config.map_zoom);

        tile_layer(
            TILE_URL,
            &object(&[("attribution", JsValue::from_str(TILE_ATTRIBUTION))])?,
        )
        .add_layer_to(&map);

        let icon = leaflet_icon(&object(&[
            ("iconUrl", JsValue::from_str(&config.marker_icon_url)),
            ("iconSize", pair(38.0, 95.0)),
            ("iconAnchor", pair(22.0, 94.0)),
            ("popupAnchor", pair(-3.0, -76.0)),
        ])?);

        Ok(Self { map, icon })
    }

    /// Định vị người dùng; lỗi định vị được báo thẳng bằng `alert`.
    pub fn locate_user(&self, max_zoom: u8) -> Result<(), JsValue> {
        let map = self.map.clone();
        let on_found = Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| {
            let Ok(latlng) = Reflect::get(&event, &JsValue::from_str("latlng")) else {
                return;
            };
            leaflet_marker(&latlng, &Object::new().into())
                .add_marker_to(&map)
                .bind_popup("You are here")
                .open_popup();
            map.set_view(&latlng, LOCATED_ZOOM);
        });

        let on_error = Closure::<dyn Fn(JsValue)>::new(|event: JsValue| {
            let message = Reflect::get(&event, &JsValue::from_str("message"))
                .ok()
                .and_then(|value| value.as_string())
                .unwrap_or_default();
            log::warn!("{}", DirectoryError::Geolocation(message.clone()));
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.alert_with_message(&message) {
                    web_sys::console::error_1(&err);
                }
            }
        });

        self.map
            .on_map_event("locationfound", on_found.as_ref().unchecked_ref());
        self.map
            .on_map_event("locationerror", on_error.as_ref().unchecked_ref());
        on_found.forget();
        on_error.forget();

        self.map.locate(&object(&[
            ("setView", JsValue::TRUE),
            ("maxZoom", JsValue::from(max_zoom)),
        ])?);
        Ok(())
    }

    /// Thêm marker bệnh viện; click marker gọi `on_select` với tên bệnh viện.
    pub fn add_hospital_marker(
        &self,
        name: &str,
        (lat, lng): (f64, f64),
        on_select: impl Fn(String) + 'static,
    ) -> Result<(), JsValue> {
        let options = object(&[("icon", self.icon.clone().into())])?;
        let selected = name.to_string();
        let on_click = Closure::<dyn Fn(JsValue)>::new(move |_event: JsValue| {
            on_select(selected.clone());
        });

        leaflet_marker(&lat_lng(lat, lng), &options)
            .add_marker_to(&self.map)
            .bind_popup(name)
            .on_marker_event("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
        Ok(())
    }
}

fn lat_lng(lat: f64, lng: f64) -> JsValue {
    pair(lat, lng)
}

fn pair(first: f64, second: f64) -> JsValue {
    Array::of2(&JsValue::from(first), &JsValue::from(second)).into()
}

fn object(entries: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let target = Object::new();
    for (key, value) in entries {
        Reflect::set(&target, &JsValue::from_str(key), value)?;
    }
    Ok(target.into())
}
