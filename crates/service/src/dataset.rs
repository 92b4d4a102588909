use std::path::Path;

use models::Facility;
use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::errors::ServiceError;

/// Immutable, validated collection of facilities loaded once at startup.
///
/// Dataset order is preserved; it is the order results are returned in.
#[derive(Debug, Clone, Default)]
pub struct FacilityDataset {
    facilities: Vec<Facility>,
}

impl FacilityDataset {
    /// Read a JSON array of facility records from `path`.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .map_err(|e| ServiceError::Dataset(format!("cannot read {}: {e}", path.display())))?;
        let dataset = Self::from_json_slice(&bytes)
            .map_err(|e| ServiceError::Dataset(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), facilities = dataset.len(), "facility dataset loaded");
        Ok(dataset)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ServiceError> {
        let raw: Vec<Value> = serde_json::from_slice(bytes)
            .map_err(|e| ServiceError::Dataset(format!("expected a JSON array of facilities: {e}")))?;
        let facilities = raw
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::from_value::<Facility>(v)
                    .map_err(|e| ServiceError::Dataset(format!("record {i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_facilities(facilities)
    }

    pub fn from_facilities(facilities: Vec<Facility>) -> Result<Self, ServiceError> {
        for (i, f) in facilities.iter().enumerate() {
            f.validate()
                .map_err(|e| ServiceError::Dataset(format!("record {i} ({:?}): {e}", f.name)))?;
        }
        if facilities.is_empty() {
            warn!("facility dataset is empty; every query will return no results");
        }
        Ok(Self { facilities })
    }

    pub fn len(&self) -> usize { self.facilities.len() }

    pub fn is_empty(&self) -> bool { self.facilities.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    pub fn facilities(&self) -> &[Facility] { &self.facilities }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"name": "A", "location": {"lat": 40.7128, "lng": -74.0060}, "vicinity": "Lower Manhattan", "rating": 4.2},
        {"name": "B", "location": {"lat": 34.0522, "lng": -118.2437}}
    ]"#;

    #[tokio::test]
    async fn load_reads_file_in_order() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("facilities_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, SAMPLE).await?;

        let ds = FacilityDataset::load(&tmp).await?;
        let names: Vec<_> = ds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(ds.facilities()[0].extra["vicinity"], "Lower Manhattan");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_a_dataset_error() {
        let tmp = std::env::temp_dir().join(format!("absent_{}.json", uuid::Uuid::new_v4()));
        let err = FacilityDataset::load(&tmp).await.unwrap_err();
        assert!(matches!(err, ServiceError::Dataset(_)));
    }

    #[test]
    fn non_array_is_rejected() {
        let err = FacilityDataset::from_json_slice(br#"{"name": "A"}"#).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn bad_record_reports_its_index() {
        let json = br#"[
            {"name": "ok", "location": {"lat": 1.0, "lng": 1.0}},
            {"name": "broken", "location": {"lat": "north", "lng": 1.0}}
        ]"#;
        let err = FacilityDataset::from_json_slice(json).unwrap_err();
        assert!(err.to_string().contains("record 1"), "{err}");
    }

    #[test]
    fn out_of_range_record_is_rejected() {
        let err = FacilityDataset::from_facilities(vec![
            Facility::new("ok", 0.0, 0.0),
            Facility::new("too far north", 91.0, 0.0),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("record 1"), "{err}");
    }

    #[test]
    fn empty_dataset_is_allowed() {
        let ds = FacilityDataset::from_json_slice(b"[]").expect("empty array");
        assert!(ds.is_empty());
    }
}
