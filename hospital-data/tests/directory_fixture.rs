use std::collections::HashMap;
use std::fs;

use futures::executor::block_on;
use hospital_core::{
    AppointmentPanel, CardId, CardRegistry, DirectoryConfig, DirectoryError, ResourceKind,
    NOT_AVAILABLE,
};
use hospital_data::{join_documents_str, load_directory, DocumentSource, FsSource};
use serde_json::Value;

fn fixture_dir() -> String {
    format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"))
}

fn fixture_path(name: &str) -> String {
    format!("{}/{name}", fixture_dir())
}

/// In-memory source; a resource without text fails to fetch.
struct MemorySource {
    documents: HashMap<ResourceKind, String>,
}

impl MemorySource {
    fn from_fixtures() -> Self {
        let read = |name: &str| fs::read_to_string(fixture_path(name)).expect("Không đọc được fixture");
        let documents = HashMap::from([
            (ResourceKind::Facilities, read("data.json")),
            (ResourceKind::Beds, read("beds.json")),
            (ResourceKind::Appointments, read("appointment.json")),
        ]);
        Self { documents }
    }
}

impl DocumentSource for MemorySource {
    async fn fetch(&self, resource: ResourceKind, location: &str) -> Result<String, DirectoryError> {
        self.documents
            .get(&resource)
            .cloned()
            .ok_or_else(|| DirectoryError::Fetch {
                resource,
                message: format!("404 for {location}"),
            })
    }
}

#[test]
fn fixture_directory_matches_golden() {
    let source = FsSource::new(fixture_dir());
    let directory = block_on(load_directory(&source, &DirectoryConfig::default()))
        .expect("Không tải được dữ liệu mẫu");

    let mut actual = serde_json::to_value(&directory).expect("Không serialize directory");
    normalize_dynamic_fields(&mut actual);

    let expected = fs::read_to_string(fixture_path("directory_snapshot.json"))
        .expect("Không đọc được golden snapshot");
    let mut expected_value: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");
    normalize_dynamic_fields(&mut expected_value);

    assert_eq!(actual, expected_value);
}

#[test]
fn fixture_cards_follow_join_and_roster_rules() {
    let directory = block_on(load_directory(
        &MemorySource::from_fixtures(),
        &DirectoryConfig::default(),
    ))
    .unwrap();
    let cards = directory.cards();
    assert_eq!(cards.len(), 3);

    let city = &cards[0];
    assert!(city.bed_lines.iter().all(|line| line.value == NOT_AVAILABLE));
    let doctors = city.appointments.doctors();
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].book().message(), "Booking appointment with Dr. A at City Hospital");

    let river = &cards[1];
    assert_eq!(river.appointments, AppointmentPanel::Doctors(Vec::new()));

    let hilltop = &cards[2];
    let values: Vec<&str> = hilltop.bed_lines.iter().map(|line| line.value.as_str()).collect();
    assert_eq!(values, ["0", NOT_AVAILABLE, "-1"]);
    assert_eq!(hilltop.appointments.placeholder(), Some("No appointments available"));
    assert_eq!(hilltop.facility.coordinates(), None);
}

#[test]
fn loosely_typed_facilities_still_render() {
    let read = |name: &str| fs::read_to_string(fixture_path(name)).expect("Không đọc được fixture");
    let directory = join_documents_str(
        &read("loose_data.json"),
        &read("beds.json"),
        &read("appointment.json"),
        &DirectoryConfig::default(),
    )
    .expect("Dữ liệu kiểu lỏng phải ghép được");

    assert_eq!(directory.hospitals.len(), 2);
    let city = &directory.hospitals[0].facility;
    assert_eq!(city.helpline, "1800111222");
    assert_eq!(city.coordinates(), Some((28.6139, 77.209)));

    let river = &directory.hospitals[1].facility;
    assert_eq!(river.picture, "");
    assert_eq!(river.coordinates(), None);
    assert_eq!(directory.cards().len(), 2);
}

#[test]
fn one_failed_fetch_aborts_the_whole_load() {
    let mut source = MemorySource::from_fixtures();
    source.documents.remove(&ResourceKind::Appointments);

    let err = block_on(load_directory(&source, &DirectoryConfig::default())).unwrap_err();
    assert_eq!(
        err,
        DirectoryError::Fetch {
            resource: ResourceKind::Appointments,
            message: "404 for ./appointment.json".into(),
        }
    );
}

#[test]
fn malformed_document_is_a_parse_error() {
    let mut source = MemorySource::from_fixtures();
    source
        .documents
        .insert(ResourceKind::Facilities, "{ not json".to_string());

    let err = block_on(load_directory(&source, &DirectoryConfig::default())).unwrap_err();
    assert_eq!(err.resource(), Some(ResourceKind::Facilities));
    assert!(matches!(err, DirectoryError::Parse { .. }));
}

#[test]
fn registry_brings_fixture_card_to_front() {
    let directory = block_on(load_directory(
        &MemorySource::from_fixtures(),
        &DirectoryConfig::default(),
    ))
    .unwrap();
    let mut registry = CardRegistry::from_directory(&directory);

    assert_eq!(registry.bring_to_front("Hilltop Medical Centre"), Some(CardId(2)));
    assert_eq!(registry.order(), [CardId(2), CardId(0), CardId(1)]);
    assert_eq!(registry.bring_to_front("Closed Ward"), None);
}

fn normalize_dynamic_fields(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        if obj.contains_key("generated_at") {
            obj.insert(
                "generated_at".to_string(),
                Value::String("__DYNAMIC_TIMESTAMP__".to_string()),
            );
        }
    }
}
