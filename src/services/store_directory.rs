//! Store reference data loaded once at startup.
//!
//! The file is a delimited table with a header row followed by rows of
//! `area_code, store_name, store_id`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const FIELDS_PER_RECORD: usize = 3;

/// Descriptive metadata for a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub store_name: String,
    pub area_code: String,
}

/// Read-only store lookup table.
#[derive(Debug, Default)]
pub struct StoreDirectory {
    stores: HashMap<String, StoreInfo>,
}

impl StoreDirectory {
    /// Load the directory from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreDirectoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreDirectoryError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse the directory from any reader. The first row is discarded as a header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreDirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = csv_reader.records();

        let header = records
            .next()
            .ok_or(StoreDirectoryError::MissingHeader)?
            .map_err(StoreDirectoryError::Header)?;
        check_field_count(&header, 1)?;

        let mut stores = HashMap::new();
        for (idx, record) in records.enumerate() {
            let record = record.map_err(StoreDirectoryError::Record)?;
            let line = record.position().map_or(idx as u64 + 2, |p| p.line());
            check_field_count(&record, line)?;

            stores.insert(
                record[2].to_string(),
                StoreInfo {
                    store_name: record[1].to_string(),
                    area_code: record[0].to_string(),
                },
            );
        }

        tracing::debug!(stores = stores.len(), "Store directory parsed");
        Ok(Self { stores })
    }

    pub fn lookup(&self, store_id: &str) -> Option<&StoreInfo> {
        self.stores.get(store_id)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl FromIterator<(String, StoreInfo)> for StoreDirectory {
    fn from_iter<I: IntoIterator<Item = (String, StoreInfo)>>(iter: I) -> Self {
        Self {
            stores: iter.into_iter().collect(),
        }
    }
}

fn check_field_count(record: &csv::StringRecord, line: u64) -> Result<(), StoreDirectoryError> {
    if record.len() != FIELDS_PER_RECORD {
        return Err(StoreDirectoryError::FieldCount {
            line,
            found: record.len(),
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum StoreDirectoryError {
    #[error("Failed to open store file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store file has no header row")]
    MissingHeader,

    #[error("Failed to read store file header: {0}")]
    Header(#[source] csv::Error),

    #[error("Failed to read store record: {0}")]
    Record(#[source] csv::Error),

    #[error("Store record on line {line} has {found} fields, expected 3")]
    FieldCount { line: u64, found: usize },
}
