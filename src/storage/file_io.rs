//! Whole-document JSON files
//!
//! Reads tell a missing file apart from a broken one. Writes go to a
//! sibling temp file that is synced and renamed over the target, so a
//! reader sees either the old document or the new one.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AccountError, AccountResult};

fn storage_error(action: &str, path: &Path, err: impl fmt::Display) -> AccountError {
    AccountError::Storage(format!("could not {} {}: {}", action, path.display(), err))
}

/// Read a JSON document, or `None` if there is no file at `path`
///
/// Anything else that goes wrong, including a document that does not
/// deserialize, is a `Storage` error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AccountResult<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("parse", path, e))
}

/// Replace the document at `path` in one step
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> AccountResult<()> {
    let temp_path = path.with_extension("json.tmp");

    let result = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> AccountResult<()> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, data).map_err(|e| storage_error("write", path, e))?;

    let file = writer
        .into_inner()
        .map_err(|e| storage_error("flush", path, e.error()))?;
    file.sync_all().map_err(|e| storage_error("sync", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        value: i32,
    }

    fn sample() -> Doc {
        Doc {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");

        write_json_atomic(&path, &sample()).unwrap();

        assert_eq!(read_json::<Doc>(&path).unwrap(), Some(sample()));
    }

    #[test]
    fn test_overwrite_replaces_whole_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");

        write_json_atomic(&path, &sample()).unwrap();
        let updated = Doc {
            name: "x".into(),
            value: 1,
        };
        write_json_atomic(&path, &updated).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"name":"x","value":1}"#);
    }

    #[test]
    fn test_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");

        write_json_atomic(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("doc.json.tmp").exists());
    }

    #[test]
    fn test_failed_replace_keeps_nothing_half_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "").unwrap();

        let err = write_json_atomic(&path, &sample()).unwrap_err();
        assert!(matches!(err, AccountError::Storage(_)));
        assert!(!temp_dir.path().join("doc.json.tmp").exists());
    }

    #[test]
    fn test_missing_and_corrupt_are_different() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");

        assert_eq!(read_json::<Doc>(&path).unwrap(), None);

        fs::write(&path, "not json at all").unwrap();
        assert!(matches!(
            read_json::<Doc>(&path),
            Err(AccountError::Storage(_))
        ));
    }
}
