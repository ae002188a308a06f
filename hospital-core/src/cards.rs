//! Mô hình thẻ bệnh viện và sổ đăng ký thẻ đã hiển thị.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    AppointmentRoster, BedCategory, Doctor, Facility, HospitalDirectory, HospitalEntry,
    NO_APPOINTMENTS,
};

/// Chỉ số thẻ, trùng với vị trí bệnh viện trong tài liệu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }

    /// `id` của phần tử DOM chứa thẻ.
    pub fn dom_id(self) -> String {
        format!("hospital-card-{}", self.0)
    }
}

/// Trạng thái hiển thị của một panel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Beds,
    Appointments,
}

/// Trạng thái hai panel của một thẻ, độc lập với nhau.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardState {
    pub beds: PanelState,
    pub appointments: PanelState,
}

impl CardState {
    pub fn panel(&self, panel: Panel) -> PanelState {
        match panel {
            Panel::Beds => self.beds,
            Panel::Appointments => self.appointments,
        }
    }

    pub fn toggle(&mut self, panel: Panel) -> PanelState {
        let slot = match panel {
            Panel::Beds => &mut self.beds,
            Panel::Appointments => &mut self.appointments,
        };
        *slot = slot.toggled();
        *slot
    }
}

/// Một dòng trong panel giường trống.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BedLine {
    pub category: BedCategory,
    pub value: String,
}

impl BedLine {
    pub fn text(&self) -> String {
        format!("{}: {}", self.category.label(), self.value)
    }
}

/// Bác sĩ kèm tên bệnh viện để đặt lịch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorRow {
    pub hospital: String,
    pub doctor: Doctor,
}

impl DoctorRow {
    pub fn label(&self) -> String {
        format!("{} - {}", self.doctor.name, self.doctor.speciality)
    }

    /// Đặt lịch giả lập: chỉ trả về lời xác nhận, không có giao dịch.
    pub fn book(&self) -> BookingAck {
        BookingAck::new(&self.hospital, &self.doctor.name)
    }
}

/// Lời xác nhận đặt lịch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingAck {
    pub hospital: String,
    pub doctor: String,
}

impl BookingAck {
    pub fn new(hospital: &str, doctor: &str) -> Self {
        Self {
            hospital: hospital.to_string(),
            doctor: doctor.to_string(),
        }
    }

    pub fn message(&self) -> String {
        format!("Booking appointment with {} at {}", self.doctor, self.hospital)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "doctors", rename_all = "snake_case")]
pub enum AppointmentPanel {
    Doctors(Vec<DoctorRow>),
    Unavailable,
}

impl AppointmentPanel {
    fn from_roster(hospital: &str, roster: Option<&AppointmentRoster>) -> Self {
        match roster {
            Some(roster) => AppointmentPanel::Doctors(
                roster
                    .doctors
                    .iter()
                    .map(|doctor| DoctorRow {
                        hospital: hospital.to_string(),
                        doctor: doctor.clone(),
                    })
                    .collect(),
            ),
            None => AppointmentPanel::Unavailable,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            AppointmentPanel::Doctors(_) => None,
            AppointmentPanel::Unavailable => Some(NO_APPOINTMENTS),
        }
    }

    pub fn doctors(&self) -> &[DoctorRow] {
        match self {
            AppointmentPanel::Doctors(rows) => rows,
            AppointmentPanel::Unavailable => &[],
        }
    }
}

/// Nội dung hiển thị của một thẻ bệnh viện.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalCard {
    pub id: CardId,
    pub facility: Facility,
    pub bed_lines: Vec<BedLine>,
    pub appointments: AppointmentPanel,
}

impl HospitalCard {
    pub fn build(id: CardId, entry: &HospitalEntry, roster: Option<&AppointmentRoster>) -> Self {
        Self {
            id,
            facility: entry.facility.clone(),
            bed_lines: entry.bed_lines(),
            appointments: AppointmentPanel::from_roster(entry.name(), roster),
        }
    }
}

/// Sổ đăng ký thẻ đã hiển thị: thứ tự trên màn hình và trạng thái panel.
///
/// Tra cứu theo tên dùng thẻ đăng ký sau cùng khi tên bị trùng.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardRegistry {
    order: Vec<CardId>,
    by_name: HashMap<String, CardId>,
    states: Vec<CardState>,
    focus: Option<CardId>,
    focus_serial: u64,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_directory(directory: &HospitalDirectory) -> Self {
        let mut registry = Self::new();
        for entry in &directory.hospitals {
            registry.register(entry.name());
        }
        registry
    }

    /// Đăng ký thẻ mới ở cuối danh sách.
    pub fn register(&mut self, name: &str) -> CardId {
        let id = CardId(self.states.len());
        self.states.push(CardState::default());
        self.order.push(id);
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Thứ tự hiển thị hiện tại.
    pub fn order(&self) -> &[CardId] {
        &self.order
    }

    pub fn state(&self, id: CardId) -> Option<CardState> {
        self.states.get(id.index()).copied()
    }

    pub fn toggle(&mut self, id: CardId, panel: Panel) -> Option<PanelState> {
        self.states.get_mut(id.index()).map(|state| state.toggle(panel))
    }

    /// Đưa thẻ của bệnh viện lên đầu danh sách; tên chưa đăng ký thì bỏ qua.
    pub fn bring_to_front(&mut self, name: &str) -> Option<CardId> {
        let id = self.lookup(name)?;
        let position = self.order.iter().position(|candidate| *candidate == id)?;
        let id = self.order.remove(position);
        self.order.insert(0, id);
        self.focus = Some(id);
        self.focus_serial += 1;
        Some(id)
    }

    /// Thẻ vừa được đưa lên đầu và số lần đưa lên, để cuộn tới sau khi render.
    pub fn focus(&self) -> Option<(CardId, u64)> {
        self.focus.map(|id| (id, self.focus_serial))
    }
}
