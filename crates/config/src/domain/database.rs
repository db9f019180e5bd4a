//! Record database
//!
//! Maps primary-key ids to record fields. On disk it is a JSON or YAML map
//! keyed by id:
//!
//! ```json
//! {"17": {"moviename": "zootopia", "city": "seattle"}}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use usersim_core::{RecordLookup, SlotMap};

use super::{read_structured, FileFormat};
use crate::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct RecordDatabase {
    records: BTreeMap<i64, SlotMap>,
}

impl RecordDatabase {
    pub fn new(records: BTreeMap<i64, SlotMap>) -> Self {
        Self { records }
    }

    /// Load records from a JSON or YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = match FileFormat::from_path(path)? {
            FileFormat::Toml => {
                return Err(ConfigError::InvalidValue {
                    field: path.display().to_string(),
                    message: "Record database must be JSON or YAML".to_string(),
                })
            },
            other => other,
        };
        let records: BTreeMap<i64, SlotMap> = read_structured(path, format)?;

        tracing::info!(path = %path.display(), records = records.len(), "Loaded record database");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordLookup for RecordDatabase {
    fn lookup(&self, record_id: i64) -> Option<SlotMap> {
        self.records.get(&record_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use usersim_core::SlotValue;

    #[test]
    fn test_load_json_database() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"17": {"moviename": "zootopia", "numberofpeople": 2}}"#)
            .unwrap();

        let db = RecordDatabase::load(file.path()).unwrap();
        assert_eq!(db.len(), 1);
        let record = db.lookup(17).unwrap();
        assert_eq!(record["moviename"], SlotValue::text("zootopia"));
        assert!(db.lookup(18).is_none());
    }

    #[test]
    fn test_toml_database_rejected() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(RecordDatabase::load(file.path()).is_err());
    }
}
