use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressBookError {
    #[error("can't access address book {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid address book {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Named contract ids and wasm hashes of a deployment
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressBook {
    #[serde(default)]
    ids: BTreeMap<String, String>,

    #[serde(default)]
    hashes: BTreeMap<String, String>,

    #[serde(skip)]
    path: PathBuf,
}

impl AddressBook {
    /// Reads the book at `path`; a missing file is an empty book
    pub fn load(path: &Path) -> Result<Self, AddressBookError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    path: path.to_owned(),
                    ..Default::default()
                })
            }
            Err(source) => {
                return Err(AddressBookError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        let mut book: Self = serde_json::from_str(&raw).map_err(|source| AddressBookError::Json {
            path: path.to_owned(),
            source,
        })?;

        book.path = path.to_owned();

        Ok(book)
    }

    pub fn save(&self) -> Result<(), AddressBookError> {
        let io = |source| AddressBookError::Io {
            path: self.path.clone(),
            source,
        };

        let raw = serde_json::to_string_pretty(self).map_err(|source| AddressBookError::Json {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, raw).map_err(io)
    }

    pub fn id(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    pub fn set_id(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.ids.insert(name.into(), id.into());
    }

    pub fn hash(&self, name: &str) -> Option<&str> {
        self.hashes.get(name).map(String::as_str)
    }

    pub fn set_hash(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.hashes.insert(name.into(), hash.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_book_starts_empty() {
        let dir = tempdir().unwrap();
        let book = AddressBook::load(&dir.path().join("book.json")).unwrap();

        assert_eq!(book.id("pool"), None);
        assert_eq!(book.hash("pool"), None);
    }

    #[test]
    fn entries_survive_a_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");

        let mut book = AddressBook::load(&path).unwrap();
        book.set_id("backstop", "aa11");
        book.set_hash("pool", "bb22");
        book.save().unwrap();

        let book = AddressBook::load(&path).unwrap();

        assert_eq!(book.id("backstop"), Some("aa11"));
        assert_eq!(book.hash("pool"), Some("bb22"));
        assert_eq!(book.id("pool"), None);
    }

    #[test]
    fn reads_files_with_a_single_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, r#"{"ids": {"emitter": "cc33"}}"#).unwrap();

        let book = AddressBook::load(&path).unwrap();

        assert_eq!(book.id("emitter"), Some("cc33"));
    }

    #[test]
    fn garbage_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AddressBook::load(&path).unwrap_err();

        assert!(matches!(err, AddressBookError::Json { .. }));
    }
}
