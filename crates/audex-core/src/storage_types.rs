use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Selected once at startup from `STORAGE_BACKEND`. `Gcs` talks to Google Cloud
/// Storage; `Local` maps buckets to subdirectories of a local root and is meant
/// for development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Gcs,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gcs" | "gs" => Ok(StorageBackend::Gcs),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Gcs => write!(f, "gcs"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends_case_insensitively() {
        assert_eq!("GCS".parse::<StorageBackend>().unwrap(), StorageBackend::Gcs);
        assert_eq!("gs".parse::<StorageBackend>().unwrap(), StorageBackend::Gcs);
        assert_eq!(" local ".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(StorageBackend::Gcs.to_string(), "gcs");
        assert_eq!(StorageBackend::Local.to_string(), "local");
    }
}
