#![cfg(target_arch = "wasm32")]

use hospital_wasm::{hospital_cards, join_documents};
use js_sys::{Array, Map, Object, Reflect, JSON};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::wasm_bindgen_test;

fn parse(text: &str) -> JsValue {
    JSON::parse(text).expect("JSON mẫu không hợp lệ")
}

fn field(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).expect("Không đọc được thuộc tính")
}

fn joined() -> JsValue {
    join_documents(
        parse(r#"{ "hospitals": [ { "name": "City Hospital", "helpline": 1800111222 } ] }"#),
        parse(r#"{ "Beds": [ { "name": "City Hospital", "Available Free Non-Critical Bed": 4 } ] }"#),
        parse(r#"{ "appointments": [] }"#),
        None,
    )
    .expect("Không ghép được tài liệu")
}

#[wasm_bindgen_test]
fn joined_entries_are_plain_objects() {
    let directory = joined();
    let hospitals: Array = field(&directory, "hospitals").dyn_into().unwrap();
    let entry = hospitals.get(0);

    assert!(!entry.is_instance_of::<Map>());
    assert!(entry.is_instance_of::<Object>());
    assert_eq!(field(&entry, "name").as_string().as_deref(), Some("City Hospital"));
    assert_eq!(field(&entry, "helpline").as_string().as_deref(), Some("1800111222"));

    let beds = field(&entry, "beds");
    assert!(!beds.is_instance_of::<Map>());
    assert_eq!(field(&beds, "Available Free Non-Critical Bed").as_f64(), Some(4.0));
}

#[wasm_bindgen_test]
fn cards_are_plain_objects() {
    let cards: Array = hospital_cards(joined()).unwrap().dyn_into().unwrap();
    let card = cards.get(0);

    assert!(!card.is_instance_of::<Map>());
    let facility = field(&card, "facility");
    assert_eq!(field(&facility, "name").as_string().as_deref(), Some("City Hospital"));
    assert_eq!(
        field(&field(&card, "appointments"), "kind").as_string().as_deref(),
        Some("unavailable")
    );
}
