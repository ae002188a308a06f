//! Loading, parsing and joining of the hospital, bed and appointment documents.

use std::path::{Path, PathBuf};

use hospital_core::{
    build_directory, AppointmentDocument, BedDocument, DirectoryConfig, DirectoryError,
    FacilityDocument, HospitalDirectory, ResourceKind,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Where the three documents come from (HTTP in the browser, files on disk).
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Fetch the raw text of one document.
    async fn fetch(&self, resource: ResourceKind, location: &str)
        -> Result<String, DirectoryError>;
}

/// Fetch all three documents concurrently, then join them.
///
/// Nothing is joined unless every fetch and parse succeeds; the first failure
/// is returned as is.
pub async fn load_directory<S: DocumentSource>(
    source: &S,
    config: &DirectoryConfig,
) -> Result<HospitalDirectory, DirectoryError> {
    let (facilities, beds, appointments) = futures::try_join!(
        fetch_document::<S, FacilityDocument>(source, ResourceKind::Facilities, config),
        fetch_document::<S, BedDocument>(source, ResourceKind::Beds, config),
        fetch_document::<S, AppointmentDocument>(source, ResourceKind::Appointments, config),
    )?;

    build_directory(facilities, beds, appointments, config)
}

async fn fetch_document<S: DocumentSource, T: DeserializeOwned>(
    source: &S,
    resource: ResourceKind,
    config: &DirectoryConfig,
) -> Result<T, DirectoryError> {
    let location = config.location(resource);
    log::debug!("fetching {resource} from {location}");
    let text = source.fetch(resource, location).await?;
    parse_document(resource, &text)
}

/// Parse one document from JSON text.
pub fn parse_document<T: DeserializeOwned>(
    resource: ResourceKind,
    text: &str,
) -> Result<T, DirectoryError> {
    serde_json::from_str(text).map_err(|err| DirectoryError::Parse {
        resource,
        message: err.to_string(),
    })
}

/// Parse one document from an already decoded `serde_json::Value`.
pub fn parse_document_value<T: DeserializeOwned>(
    resource: ResourceKind,
    value: Value,
) -> Result<T, DirectoryError> {
    serde_json::from_value(value).map_err(|err| DirectoryError::Parse {
        resource,
        message: err.to_string(),
    })
}

/// Join the three documents given as JSON strings.
pub fn join_documents_str(
    facilities: &str,
    beds: &str,
    appointments: &str,
    config: &DirectoryConfig,
) -> Result<HospitalDirectory, DirectoryError> {
    build_directory(
        parse_document(ResourceKind::Facilities, facilities)?,
        parse_document(ResourceKind::Beds, beds)?,
        parse_document(ResourceKind::Appointments, appointments)?,
        config,
    )
}

/// Join the three documents given as `serde_json::Value`s.
pub fn join_documents_value(
    facilities: Value,
    beds: Value,
    appointments: Value,
    config: &DirectoryConfig,
) -> Result<HospitalDirectory, DirectoryError> {
    build_directory(
        parse_document_value(ResourceKind::Facilities, facilities)?,
        parse_document_value(ResourceKind::Beds, beds)?,
        parse_document_value(ResourceKind::Appointments, appointments)?,
        config,
    )
}

/// Reads documents relative to a base directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for FsSource {
    async fn fetch(
        &self,
        resource: ResourceKind,
        location: &str,
    ) -> Result<String, DirectoryError> {
        let path = self.root.join(location);
        std::fs::read_to_string(&path).map_err(|err| DirectoryError::Fetch {
            resource,
            message: format!("{}: {err}", path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_core::{BedCategory, NOT_AVAILABLE};

    #[test]
    fn missing_top_level_key_is_a_parse_error() {
        let err = join_documents_str(
            r#"{ "hospitals": [] }"#,
            r#"{ "beds": [] }"#,
            r#"{ "appointments": [] }"#,
            &DirectoryConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DirectoryError::Parse {
                resource: ResourceKind::Beds,
                ..
            }
        ));
    }

    #[test]
    fn value_join_attaches_beds() {
        let directory = join_documents_value(
            serde_json::json!({ "hospitals": [
                { "name": "City Hospital" },
                { "name": "River Clinic" }
            ] }),
            serde_json::json!({ "Beds": [
                { "name": "River Clinic", "Available Free Critical Bed (with ventilator)": 2 }
            ] }),
            serde_json::json!({ "appointments": [] }),
            &DirectoryConfig::default(),
        )
        .unwrap();

        assert_eq!(directory.hospitals.len(), 2);
        assert_eq!(
            directory.hospitals[0].beds.display(BedCategory::CriticalWithVentilator),
            NOT_AVAILABLE
        );
        assert_eq!(
            directory.hospitals[1].beds.display(BedCategory::CriticalWithVentilator),
            "2"
        );
    }

    #[test]
    fn fs_source_reports_missing_file_as_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsSource::new(dir.path());
        let err = futures::executor::block_on(load_directory(&source, &DirectoryConfig::default()))
            .unwrap_err();

        assert!(matches!(err, DirectoryError::Fetch { .. }));
    }
}
