//! Bridge WASM <-> JavaScript trung lập framework.

use hospital_core::{BookingAck, DirectoryConfig, DirectoryError, HospitalDirectory};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

/// Ghép ba tài liệu JSON đã tải sẵn thành directory (bệnh viện + giường + lịch hẹn).
#[wasm_bindgen]
pub fn join_documents(
    facilities: JsValue,
    beds: JsValue,
    appointments: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = read_config(config)?;
    let directory = hospital_data::join_documents_value(
        read_json(facilities, "danh sách bệnh viện")?,
        read_json(beds, "dữ liệu giường")?,
        read_json(appointments, "lịch hẹn")?,
        &cfg,
    )
    .map_err(|err| JsValue::from_str(&format_directory_error(err)))?;

    to_plain_js(&directory)
        .map_err(|err| JsValue::from_str(&format!("Không serialize directory: {err}")))
}

/// Dựng mô hình thẻ từ directory đã ghép.
#[wasm_bindgen]
pub fn hospital_cards(directory: JsValue) -> Result<JsValue, JsValue> {
    let directory: HospitalDirectory = from_value(directory)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được directory: {err}")))?;

    to_plain_js(&directory.cards())
        .map_err(|err| JsValue::from_str(&format!("Không serialize thẻ: {err}")))
}

/// Lời xác nhận đặt lịch giả lập.
#[wasm_bindgen]
pub fn book_appointment(hospital: &str, doctor: &str) -> String {
    BookingAck::new(hospital, doctor).message()
}

/// Map của serde (struct có `flatten`, `BTreeMap`) thành object JS thường, không phải `Map`.
fn to_plain_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::json_compatible())
}

fn read_json(value: JsValue, what: &str) -> Result<serde_json::Value, JsValue> {
    from_value::<serde_json::Value>(value)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON {what}: {err}")))
}

fn read_config(config: Option<JsValue>) -> Result<DirectoryConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => from_value(js_cfg)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}"))),
        _ => Ok(DirectoryConfig::default()),
    }
}

fn format_directory_error(err: DirectoryError) -> String {
    format!("Directory error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_message_names_doctor_and_hospital() {
        assert_eq!(
            book_appointment("City Hospital", "Dr. A"),
            "Booking appointment with Dr. A at City Hospital"
        );
    }

    #[test]
    fn directory_errors_are_prefixed() {
        let message = format_directory_error(DirectoryError::Geolocation("denied".into()));
        assert!(message.starts_with("Directory error: "));
        assert!(message.ends_with("denied"));
    }
}
