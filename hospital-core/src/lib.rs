//! Logic lõi cho bản đồ bệnh viện: dữ liệu cơ sở, giường trống và lịch hẹn.

mod cards;
mod join;
mod lenient;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use cards::{
    AppointmentPanel, BedLine, BookingAck, CardId, CardRegistry, CardState, DoctorRow,
    HospitalCard, Panel, PanelState,
};
pub use join::{build_directory, index_beds, join_beds};

/// Chuỗi hiển thị khi thiếu số liệu giường.
pub const NOT_AVAILABLE: &str = "N/A";

/// Chuỗi hiển thị khi bệnh viện không có lịch hẹn.
pub const NO_APPOINTMENTS: &str = "No appointments available";

/// Cấu hình nguồn dữ liệu và bản đồ. Trường bị thiếu lấy giá trị mặc định.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Đường dẫn tài liệu danh sách bệnh viện.
    pub facilities_url: String,
    /// Đường dẫn tài liệu giường trống.
    pub beds_url: String,
    /// Đường dẫn tài liệu lịch hẹn.
    pub appointments_url: String,
    /// Tâm bản đồ ban đầu `[vĩ độ, kinh độ]`.
    pub map_center: [f64; 2],
    pub map_zoom: u8,
    /// Mức zoom tối đa khi định vị người dùng.
    pub locate_max_zoom: u8,
    /// Icon marker bệnh viện trên bản đồ.
    pub marker_icon_url: String,
    pub call_icon_url: String,
    pub duplicate_names: DuplicateNames,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            facilities_url: "./data.json".to_string(),
            beds_url: "./beds.json".to_string(),
            appointments_url: "./appointment.json".to_string(),
            map_center: [28.63, 77.21],
            map_zoom: 11,
            locate_max_zoom: 12,
            marker_icon_url: "./hospital-location-pin-10718.svg".to_string(),
            call_icon_url: "Call.svg".to_string(),
            duplicate_names: DuplicateNames::default(),
        }
    }
}

impl DirectoryConfig {
    /// Đường dẫn ứng với từng loại tài liệu.
    pub fn location(&self, resource: ResourceKind) -> &str {
        match resource {
            ResourceKind::Facilities => &self.facilities_url,
            ResourceKind::Beds => &self.beds_url,
            ResourceKind::Appointments => &self.appointments_url,
        }
    }
}

/// Cách xử lý khi nhiều bản ghi trùng tên bệnh viện.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNames {
    /// Bản ghi sau ghi đè bản ghi trước, chỉ ghi log cảnh báo.
    #[default]
    LastWriteWins,
    /// Từ chối toàn bộ dữ liệu.
    Reject,
}

/// Ba tài liệu JSON đầu vào.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Facilities,
    Beds,
    Appointments,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Facilities => "facility list",
            ResourceKind::Beds => "bed availability",
            ResourceKind::Appointments => "appointment roster",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thông tin nhận diện một bệnh viện.
///
/// Trường hiển thị nhận cả số (ví dụ số hotline), toạ độ nhận cả chuỗi số.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Facility {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub helpline: String,
    /// URL ảnh bệnh viện.
    #[serde(default, deserialize_with = "lenient::text")]
    pub picture: String,
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub longitude: Option<f64>,
}

impl Facility {
    /// Toạ độ để đặt marker; thiếu một trong hai thì không có marker.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Ba hạng mục giường cố định hiển thị trên thẻ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BedCategory {
    CriticalWithoutVentilator,
    CriticalWithVentilator,
    NonCritical,
}

impl BedCategory {
    pub const ALL: [BedCategory; 3] = [
        BedCategory::CriticalWithoutVentilator,
        BedCategory::CriticalWithVentilator,
        BedCategory::NonCritical,
    ];

    /// Khoá dùng trong tài liệu giường trống.
    pub fn label(self) -> &'static str {
        match self {
            BedCategory::CriticalWithoutVentilator => {
                "Available Free Critical Bed (without ventilator)"
            }
            BedCategory::CriticalWithVentilator => "Available Free Critical Bed (with ventilator)",
            BedCategory::NonCritical => "Available Free Non-Critical Bed",
        }
    }
}

/// Số giường trống theo hạng mục của một bệnh viện.
///
/// Giá trị được giữ nguyên như trong JSON, không kiểm tra kiểu số.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BedAvailability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub counts: BTreeMap<String, Value>,
}

impl BedAvailability {
    /// Bản ghi rỗng gắn cho bệnh viện không có dữ liệu giường.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, category: BedCategory) -> Option<&Value> {
        self.counts.get(category.label())
    }

    /// Giá trị hiển thị, `N/A` nếu thiếu, `null` hoặc chuỗi rỗng.
    pub fn display(&self, category: BedCategory) -> String {
        match self.count(category) {
            None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
            Some(Value::String(text)) if text.is_empty() => NOT_AVAILABLE.to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => lenient::format_number(number),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Doctor {
    pub name: String,
    #[serde(default)]
    pub speciality: String,
}

/// Danh sách bác sĩ nhận lịch hẹn của một bệnh viện.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppointmentRoster {
    pub name: String,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

/// `{ "hospitals": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FacilityDocument {
    pub hospitals: Vec<Facility>,
}

/// `{ "Beds": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BedDocument {
    #[serde(rename = "Beds")]
    pub beds: Vec<BedAvailability>,
}

/// `{ "appointments": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppointmentDocument {
    pub appointments: Vec<AppointmentRoster>,
}

/// Bệnh viện đã gắn dữ liệu giường trống.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalEntry {
    #[serde(flatten)]
    pub facility: Facility,
    #[serde(default)]
    pub beds: BedAvailability,
}

impl HospitalEntry {
    pub fn name(&self) -> &str {
        &self.facility.name
    }

    /// Ba dòng giường trống theo thứ tự cố định.
    pub fn bed_lines(&self) -> Vec<BedLine> {
        BedCategory::ALL
            .into_iter()
            .map(|category| BedLine {
                category,
                value: self.beds.display(category),
            })
            .collect()
    }
}

/// Kết quả tải và ghép dữ liệu, dùng để dựng bản đồ và thẻ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalDirectory {
    pub generated_at: DateTime<Utc>,
    pub hospitals: Vec<HospitalEntry>,
    pub appointments: Vec<AppointmentRoster>,
}

impl HospitalDirectory {
    pub fn new(hospitals: Vec<HospitalEntry>, appointments: Vec<AppointmentRoster>) -> Self {
        Self {
            generated_at: Utc::now(),
            hospitals,
            appointments,
        }
    }

    /// Lịch hẹn đầu tiên trùng tên bệnh viện.
    pub fn roster_for(&self, name: &str) -> Option<&AppointmentRoster> {
        self.appointments.iter().find(|roster| roster.name == name)
    }

    pub fn entry(&self, id: CardId) -> Option<&HospitalEntry> {
        self.hospitals.get(id.index())
    }

    /// Mô hình hiển thị thẻ cho bệnh viện thứ `id`.
    pub fn card(&self, id: CardId) -> Option<HospitalCard> {
        let entry = self.entry(id)?;
        Some(HospitalCard::build(id, entry, self.roster_for(entry.name())))
    }

    /// Thẻ của mọi bệnh viện theo thứ tự tài liệu.
    pub fn cards(&self) -> Vec<HospitalCard> {
        self.hospitals
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                HospitalCard::build(CardId(index), entry, self.roster_for(entry.name()))
            })
            .collect()
    }
}

/// Lỗi khi tải, ghép hoặc định vị.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Không tải được {resource}: {message}")]
    Fetch {
        resource: ResourceKind,
        message: String,
    },
    #[error("Không đọc được {resource}: {message}")]
    Parse {
        resource: ResourceKind,
        message: String,
    },
    #[error("Trùng tên `{name}` trong {resource}")]
    DuplicateName { resource: ResourceKind, name: String },
    #[error("Không xác định được vị trí: {0}")]
    Geolocation(String),
}

impl DirectoryError {
    pub fn resource(&self) -> Option<ResourceKind> {
        match self {
            DirectoryError::Fetch { resource, .. }
            | DirectoryError::Parse { resource, .. }
            | DirectoryError::DuplicateName { resource, .. } => Some(*resource),
            DirectoryError::Geolocation(_) => None,
        }
    }
}
