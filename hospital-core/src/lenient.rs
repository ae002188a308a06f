//! Đọc trường JSON không chặt kiểu: số thành chuỗi, chuỗi số thành toạ độ.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Chuỗi hiển thị từ bất kỳ giá trị vô hướng nào; `null` thành chuỗi rỗng.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => format_number(&number),
        Some(other) => other.to_string(),
    })
}

/// Toạ độ từ số hoặc chuỗi số; giá trị khác thành `None` (không đặt marker).
pub(crate) fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite()))
}

/// Số nguyên giữ nguyên, số thực không có phần lẻ in như số nguyên (`4.0` -> `4`).
pub(crate) fn format_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => value.to_string(),
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct LooseRecord {
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "coordinate")]
        lat: Option<f64>,
    }

    fn read(value: Value) -> LooseRecord {
        serde_json::from_value(value).expect("giá trị không đọc được")
    }

    #[test]
    fn text_accepts_numbers_and_null() {
        assert_eq!(read(json!({ "label": 1800111222 })).label, "1800111222");
        assert_eq!(read(json!({ "label": 2.5 })).label, "2.5");
        assert_eq!(read(json!({ "label": null })).label, "");
        assert_eq!(read(json!({ "label": true })).label, "true");
        assert_eq!(read(json!({})).label, "");
    }

    #[test]
    fn coordinate_parses_numeric_strings() {
        assert_eq!(read(json!({ "lat": "28.6" })).lat, Some(28.6));
        assert_eq!(read(json!({ "lat": " 77 " })).lat, Some(77.0));
        assert_eq!(read(json!({ "lat": 28 })).lat, Some(28.0));
        assert_eq!(read(json!({ "lat": "north" })).lat, None);
        assert_eq!(read(json!({ "lat": [1, 2] })).lat, None);
        assert_eq!(read(json!({ "lat": "NaN" })).lat, None);
    }

    #[test]
    fn whole_floats_print_without_fraction() {
        let whole = serde_json::Number::from_f64(4.0).unwrap();
        let fractional = serde_json::Number::from_f64(4.5).unwrap();
        assert_eq!(format_number(&whole), "4");
        assert_eq!(format_number(&fractional), "4.5");
        assert_eq!(format_number(&serde_json::Number::from(-3)), "-3");
    }
}
