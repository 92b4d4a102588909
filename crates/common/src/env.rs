//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the facility dataset file exists and is a regular file.
///
/// A missing dataset is fatal: the service has nothing to answer with.
pub async fn ensure_env(dataset_path: &Path) -> anyhow::Result<()> {
    let meta = tokio::fs::metadata(dataset_path).await.map_err(|e| {
        anyhow::anyhow!("facility dataset {} not readable: {e}", dataset_path.display())
    })?;
    if !meta.is_file() {
        return Err(anyhow::anyhow!(
            "facility dataset {} is not a regular file",
            dataset_path.display()
        ));
    }
    if meta.len() == 0 {
        warn!(path = %dataset_path.display(), "facility dataset file is empty");
    }
    info!(path = %dataset_path.display(), bytes = meta.len(), "facility dataset present");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_dataset_is_an_error() {
        let path = std::env::temp_dir().join(format!("missing_{}.json", uuid::Uuid::new_v4()));
        let err = ensure_env(&path).await.unwrap_err();
        assert!(err.to_string().contains("not readable"));
    }

    #[tokio::test]
    async fn directory_is_not_a_dataset() {
        let err = ensure_env(&std::env::temp_dir()).await.unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[tokio::test]
    async fn existing_file_passes() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("dataset_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"[]").await?;
        ensure_env(&path).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
