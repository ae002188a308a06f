//! Giao diện bản đồ bệnh viện và thẻ thông tin cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod http;
#[cfg(target_arch = "wasm32")]
mod leaflet;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;
    use std::sync::Once;

    use crate::http::HttpSource;
    use crate::leaflet::HospitalMap;
    use crate::styles;
    use hospital_core::{
        AppointmentPanel, BookingAck, CardId, CardRegistry, CardState, DirectoryConfig,
        DoctorRow, HospitalCard, HospitalDirectory, Panel,
    };
    use hospital_data::load_directory;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, ScrollBehavior, ScrollIntoViewOptions, Window};
    use yew::prelude::*;

    static LOGGER: Once = Once::new();

    /// Dữ liệu đã ghép và sổ đăng ký thẻ, do component gốc sở hữu.
    #[derive(Default, PartialEq)]
    struct DirectoryState {
        directory: Option<Rc<HospitalDirectory>>,
        registry: CardRegistry,
    }

    enum DirectoryAction {
        Loaded(HospitalDirectory),
        Toggle(CardId, Panel),
        BringToFront(String),
    }

    impl Reducible for DirectoryState {
        type Action = DirectoryAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            match action {
                DirectoryAction::Loaded(directory) => {
                    let registry = CardRegistry::from_directory(&directory);
                    Rc::new(Self {
                        directory: Some(Rc::new(directory)),
                        registry,
                    })
                }
                DirectoryAction::Toggle(id, panel) => {
                    let mut registry = self.registry.clone();
                    if registry.toggle(id, panel).is_none() {
                        return self;
                    }
                    Rc::new(Self {
                        directory: self.directory.clone(),
                        registry,
                    })
                }
                DirectoryAction::BringToFront(name) => {
                    let mut registry = self.registry.clone();
                    if registry.bring_to_front(&name).is_none() {
                        log::debug!("chưa có thẻ cho `{name}`");
                        return self;
                    }
                    Rc::new(Self {
                        directory: self.directory.clone(),
                        registry,
                    })
                }
            }
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct HospitalAppProps {
        pub map_element_id: AttrValue,
        pub config: DirectoryConfig,
    }

    #[function_component(HospitalApp)]
    fn hospital_app(props: &HospitalAppProps) -> Html {
        let state = use_reducer(DirectoryState::default);

        {
            let dispatcher = state.dispatcher();
            let map_element_id = props.map_element_id.clone();
            let config = props.config.clone();
            use_effect_with((), move |_| {
                if let Some(window) = web_sys::window() {
                    if let Some(document) = window.document() {
                        if let Err(err) = styles::ensure_styles(&document) {
                            console::error_1(&err);
                        }
                    }
                }

                let map = match HospitalMap::init(&map_element_id, &config) {
                    Ok(map) => {
                        if let Err(err) = map.locate_user(config.locate_max_zoom) {
                            console::error_1(&err);
                        }
                        Some(map)
                    }
                    Err(err) => {
                        console::error_1(&err);
                        None
                    }
                };
                wasm_bindgen_futures::spawn_local(load_into(map, config, dispatcher));
                || ()
            });
        }

        use_effect_with(state.registry.focus(), |focus| {
            if let Some((id, _)) = focus {
                scroll_card_into_view(*id);
            }
            || ()
        });

        let on_toggle = {
            let dispatcher = state.dispatcher();
            Callback::from(move |(id, panel): (CardId, Panel)| {
                dispatcher.dispatch(DirectoryAction::Toggle(id, panel));
            })
        };
        let on_book = Callback::from(|ack: BookingAck| acknowledge_booking(&ack));
        let call_icon = AttrValue::from(props.config.call_icon_url.clone());

        let Some(directory) = state.directory.clone() else {
            return html! { <div class="hospital-display" aria-busy="true"></div> };
        };

        html! {
            <div class="hospital-display">
                {
                    for state.registry.order().iter().filter_map(|id| {
                        let card = directory.card(*id)?;
                        let card_state = state.registry.state(*id).unwrap_or_default();
                        Some(html! {
                            <HospitalCardView
                                key={id.index()}
                                card={card}
                                state={card_state}
                                call_icon={call_icon.clone()}
                                on_toggle={on_toggle.clone()}
                                on_book={on_book.clone()}
                            />
                        })
                    })
                }
            </div>
        }
    }

    /// Tải ba tài liệu, gắn marker rồi mới đưa dữ liệu vào state.
    async fn load_into(
        map: Option<HospitalMap>,
        config: DirectoryConfig,
        dispatcher: UseReducerDispatcher<DirectoryState>,
    ) {
        let directory = match load_directory(&HttpSource, &config).await {
            Ok(directory) => directory,
            Err(err) => {
                log::error!("Error fetching JSON: {err}");
                return;
            }
        };

        if let Some(map) = &map {
            for entry in &directory.hospitals {
                let Some(coordinates) = entry.facility.coordinates() else {
                    log::debug!("`{}` không có toạ độ, bỏ qua marker", entry.name());
                    continue;
                };
                let dispatcher = dispatcher.clone();
                let added = map.add_hospital_marker(entry.name(), coordinates, move |name| {
                    dispatcher.dispatch(DirectoryAction::BringToFront(name));
                });
                if let Err(err) = added {
                    console::error_1(&err);
                }
            }
        }

        log::info!("đã tải {} bệnh viện", directory.hospitals.len());
        dispatcher.dispatch(DirectoryAction::Loaded(directory));
    }

    #[derive(Properties, PartialEq)]
    struct HospitalCardProps {
        card: HospitalCard,
        state: CardState,
        call_icon: AttrValue,
        on_toggle: Callback<(CardId, Panel)>,
        on_book: Callback<BookingAck>,
    }

    #[function_component(HospitalCardView)]
    fn hospital_card_view(props: &HospitalCardProps) -> Html {
        let card = &props.card;
        let facility = &card.facility;
        let beds_open = props.state.beds.is_expanded();
        let appointments_open = props.state.appointments.is_expanded();

        let toggle = |panel: Panel| {
            let on_toggle = props.on_toggle.clone();
            let id = card.id;
            Callback::from(move |_: MouseEvent| on_toggle.emit((id, panel)))
        };

        html! {
            <div class="hospital-card" id={card.id.dom_id()}>
                <div class="hospital-name">{ facility.name.clone() }</div>
                <div class="hospital-info">
                    <img src={facility.picture.clone()} alt={facility.name.clone()} class="hospital-image" />
                    <div class="hospital-details">
                        <div class="hospital-address">{ facility.address.clone() }</div>
                        <div class="hospital-website">
                            <a href={facility.website.clone()} target="_blank" rel="noopener noreferrer">{ facility.website.clone() }</a>
                        </div>
                        <div class="hospital-helpline">
                            <img src={props.call_icon.clone()} alt="Call" class="call-icon" />
                            { format!(": {}", facility.helpline) }
                        </div>
                    </div>
                </div>
                <button
                    type="button"
                    class="available-beds-toggle"
                    aria-expanded={beds_open.to_string()}
                    onclick={toggle(Panel::Beds)}
                >
                    {"Available Beds"}
                </button>
                <div class={classes!("available-beds-info", beds_open.then_some("is-expanded"))}>
                    { for card.bed_lines.iter().map(|line| html! { <p>{ line.text() }</p> }) }
                </div>
                <button
                    type="button"
                    class="book-appointments-toggle"
                    aria-expanded={appointments_open.to_string()}
                    onclick={toggle(Panel::Appointments)}
                >
                    {"Book Appointments"}
                </button>
                <div class={classes!("book-appointments-info", appointments_open.then_some("is-expanded"))}>
                    { render_appointments(&card.appointments, &props.on_book) }
                </div>
            </div>
        }
    }

    fn render_appointments(panel: &AppointmentPanel, on_book: &Callback<BookingAck>) -> Html {
        if let Some(placeholder) = panel.placeholder() {
            return html! { <span class="appointments-empty">{ placeholder }</span> };
        }
        html! { for panel.doctors().iter().map(|row| render_doctor(row, on_book)) }
    }

    fn render_doctor(row: &DoctorRow, on_book: &Callback<BookingAck>) -> Html {
        let label = row.label();
        let row = row.clone();
        let onclick = on_book.reform(move |_: MouseEvent| row.book());

        html! {
            <div class="doctor-info">
                <span>{ label }</span>
                <button type="button" class="book-button" onclick={onclick}>{"Book"}</button>
            </div>
        }
    }

    fn acknowledge_booking(ack: &BookingAck) {
        log::info!("đặt lịch giả lập: {} / {}", ack.hospital, ack.doctor);
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.alert_with_message(&ack.message()) {
                console::error_1(&err);
            }
        }
    }

    fn scroll_card_into_view(id: CardId) {
        let Some(element) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&id.dom_id()))
        else {
            return;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    #[wasm_bindgen]
    pub fn mount_hospital_map(
        map_element_id: &str,
        cards_selector: &str,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::default()));

        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(cards_selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let config: DirectoryConfig = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => from_value(value)?,
            _ => DirectoryConfig::default(),
        };

        yew::Renderer::<HospitalApp>::with_root_and_props(
            target,
            HospitalAppProps {
                map_element_id: AttrValue::from(map_element_id.to_string()),
                config,
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_hospital_map;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_hospital_map(
    _: &str,
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "hospital-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
