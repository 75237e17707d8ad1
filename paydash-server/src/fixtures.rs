//! Static dashboard fixtures
//!
//! The transactions, payment-volume, and customers feeds are served from
//! JSON files loaded at request time. There is no caching; the files are
//! small and reads are rare.

use std::path::{Path, PathBuf};

use paydash_core::Transaction;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads fixture files from the configured directory
#[derive(Debug, Clone)]
pub struct FixtureStore {
    dir: PathBuf,
}

impl FixtureStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Raw fixture contents, returned verbatim to the client
    pub fn load_raw(&self, name: &str) -> Result<Value, FixtureError> {
        let text = self.read(name)?;
        serde_json::from_str(&text).map_err(|source| FixtureError::Parse {
            name: name.to_string(),
            source,
        })
    }

    /// The transaction history feed
    pub fn transactions(&self) -> Result<Vec<Transaction>, FixtureError> {
        let text = self.read("transactions.json")?;
        serde_json::from_str(&text).map_err(|source| FixtureError::Parse {
            name: "transactions.json".to_string(),
            source,
        })
    }

    fn read(&self, name: &str) -> Result<String, FixtureError> {
        std::fs::read_to_string(self.dir.join(name)).map_err(|source| FixtureError::Io {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let store = FixtureStore::new("/nonexistent");

        assert!(matches!(
            store.load_raw("transactions.json"),
            Err(FixtureError::Io { .. })
        ));
    }
}
