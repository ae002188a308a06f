use std::collections::{HashMap, HashSet};

use crate::{
    AppointmentDocument, AppointmentRoster, BedAvailability, BedDocument, DirectoryConfig,
    DirectoryError, DuplicateNames, Facility, FacilityDocument, HospitalDirectory, HospitalEntry,
    ResourceKind,
};

/// Lập bảng tra tên bệnh viện -> bản ghi giường trống.
///
/// Bản ghi không có tên bị bỏ qua. Với `LastWriteWins`, bản ghi xuất hiện sau
/// thay thế bản ghi trước.
pub fn index_beds(
    beds: Vec<BedAvailability>,
    policy: DuplicateNames,
) -> Result<HashMap<String, BedAvailability>, DirectoryError> {
    let mut index = HashMap::with_capacity(beds.len());
    for record in beds {
        let Some(name) = record.name.clone() else {
            log::debug!("bỏ qua bản ghi giường không có tên");
            continue;
        };
        if index.contains_key(&name) {
            note_duplicate(ResourceKind::Beds, &name, policy)?;
        }
        index.insert(name, record);
    }
    Ok(index)
}

/// Gắn bản ghi giường trống vào từng bệnh viện, thiếu thì gắn bản ghi rỗng.
///
/// Mỗi bệnh viện đầu vào cho đúng một phần tử đầu ra, cùng thứ tự.
pub fn join_beds(
    facilities: Vec<Facility>,
    beds: Vec<BedAvailability>,
    policy: DuplicateNames,
) -> Result<Vec<HospitalEntry>, DirectoryError> {
    let mut index = index_beds(beds, policy)?;
    let repeated = repeated_names(facilities.iter().map(|facility| facility.name.as_str()));
    note_duplicates(ResourceKind::Facilities, &repeated, policy)?;
    let repeated: HashSet<String> = repeated.into_iter().collect();

    Ok(facilities
        .into_iter()
        .map(|facility| {
            let beds = if repeated.contains(&facility.name) {
                index.get(&facility.name).cloned()
            } else {
                index.remove(&facility.name)
            };
            HospitalEntry {
                beds: beds.unwrap_or_default(),
                facility,
            }
        })
        .collect())
}

/// Ghép ba tài liệu thành `HospitalDirectory`.
pub fn build_directory(
    facilities: FacilityDocument,
    beds: BedDocument,
    appointments: AppointmentDocument,
    config: &DirectoryConfig,
) -> Result<HospitalDirectory, DirectoryError> {
    let policy = config.duplicate_names;
    let hospitals = join_beds(facilities.hospitals, beds.beds, policy)?;
    check_rosters(&appointments.appointments, policy)?;

    log::info!(
        "đã ghép {} bệnh viện, {} danh sách lịch hẹn",
        hospitals.len(),
        appointments.appointments.len()
    );
    Ok(HospitalDirectory::new(hospitals, appointments.appointments))
}

fn check_rosters(rosters: &[AppointmentRoster], policy: DuplicateNames) -> Result<(), DirectoryError> {
    let repeated = repeated_names(rosters.iter().map(|roster| roster.name.as_str()));
    note_duplicates(ResourceKind::Appointments, &repeated, policy)
}

/// Tên lặp lại, theo thứ tự lần lặp đầu tiên trong tài liệu, mỗi tên một lần.
fn repeated_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut repeated = Vec::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            repeated.push(name.to_string());
        }
    }
    repeated
}

fn note_duplicates(
    resource: ResourceKind,
    names: &[String],
    policy: DuplicateNames,
) -> Result<(), DirectoryError> {
    names
        .iter()
        .try_for_each(|name| note_duplicate(resource, name, policy))
}

fn note_duplicate(
    resource: ResourceKind,
    name: &str,
    policy: DuplicateNames,
) -> Result<(), DirectoryError> {
    match policy {
        DuplicateNames::LastWriteWins => {
            log::warn!("trùng tên `{name}` trong {resource}");
            Ok(())
        }
        DuplicateNames::Reject => Err(DirectoryError::DuplicateName {
            resource,
            name: name.to_string(),
        }),
    }
}
