//! Directory index of generated fractal tilesets.
//!
//! Scans the immediate subdirectories of a directory for `tileset.json`,
//! pulls the display metadata out of the `3DTILES_metadata` extension and
//! writes the aggregate to `fractals.json`:
//!
//! ```json
//! {"fractals": [{"id": "...", "name": "...", "description": "..."}]}
//! ```
//!
//! Tilesets missing `id` or `name` are skipped with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;

/// File looked for in each subdirectory.
pub const TILESET_FILE: &str = "tileset.json";

/// File written by [`write_index`].
pub const INDEX_FILE: &str = "fractals.json";

/// Display metadata of one tileset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalInfo {
    /// Stable identifier.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Optional description, empty when absent.
    pub description: String,
}

/// The aggregate written to [`INDEX_FILE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalIndex {
    /// One entry per usable tileset, in subdirectory name order.
    pub fractals: Vec<FractalInfo>,
}

/// Paths of `tileset.json` files in the immediate subdirectories of `dir`.
///
/// # Errors
///
/// Returns an I/O error if `dir` cannot be read.
pub fn tileset_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let candidate = entry.path().join(TILESET_FILE);
        if candidate.is_file() {
            paths.push(candidate);
        }
    }
    paths.sort();
    debug!(count = paths.len(), dir = %dir.display(), "found tilesets");
    Ok(paths)
}

/// Extract display metadata from a parsed tileset.
///
/// Returns `None` if `id` or `name` is missing or not a string.
#[must_use]
pub fn extract_info(tileset: &Value) -> Option<FractalInfo> {
    let properties = tileset
        .get("extensions")?
        .get("3DTILES_metadata")?
        .get("tileset")?
        .get("properties")?;

    Some(FractalInfo {
        id: properties.get("id")?.as_str()?.to_string(),
        name: properties.get("name")?.as_str()?.to_string(),
        description: properties
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Build the index for all tilesets below `dir`.
///
/// # Errors
///
/// Returns an error if a directory or tileset cannot be read, or a tileset
/// is not valid JSON.
pub fn build_index(dir: &Path) -> Result<FractalIndex> {
    let mut fractals = Vec::new();
    for path in tileset_paths(dir)? {
        let tileset: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        match extract_info(&tileset) {
            Some(info) => fractals.push(info),
            None => warn!(path = %path.display(), "tileset lacks id or name, skipping"),
        }
    }
    Ok(FractalIndex { fractals })
}

/// Build the index for `dir` and write it to `dir/fractals.json`.
///
/// # Errors
///
/// Propagates the errors of [`build_index`] and any failure writing the file.
pub fn write_index(dir: &Path) -> Result<FractalIndex> {
    let index = build_index(dir)?;
    let target = dir.join(INDEX_FILE);
    fs::write(&target, serde_json::to_string(&index)?)?;
    info!(entries = index.fractals.len(), path = %target.display(), "wrote fractal index");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn tileset(properties: &Value) -> Value {
        json!({
            "asset": {"version": "1.1"},
            "extensions": {
                "3DTILES_metadata": {
                    "tileset": {"class": "fractal", "properties": properties}
                }
            }
        })
    }

    fn write_tileset(dir: &Path, name: &str, contents: &Value) {
        let sub = dir.join(name);
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join(TILESET_FILE), contents.to_string()).unwrap();
    }

    #[test]
    fn test_extract_info() {
        let info = extract_info(&tileset(&json!({
            "id": "sierpinski",
            "name": "Sierpinski",
            "description": "A gasket"
        })))
        .unwrap();
        assert_eq!(info.id, "sierpinski");
        assert_eq!(info.description, "A gasket");
    }

    #[test]
    fn test_extract_info_defaults_description() {
        let info = extract_info(&tileset(&json!({"id": "a", "name": "A"}))).unwrap();
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_extract_info_missing_keys() {
        assert!(extract_info(&tileset(&json!({"name": "No id"}))).is_none());
        assert!(extract_info(&json!({"asset": {}})).is_none());
    }

    #[test]
    fn test_write_index() {
        let dir = tempdir().unwrap();
        write_tileset(dir.path(), "b", &tileset(&json!({"id": "b", "name": "B"})));
        write_tileset(
            dir.path(),
            "a",
            &tileset(&json!({"id": "a", "name": "A", "description": "first"})),
        );
        write_tileset(dir.path(), "broken", &tileset(&json!({"id": "c"})));
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join(TILESET_FILE), "{}").unwrap();

        let index = write_index(dir.path()).unwrap();
        let ids: Vec<&str> = index.fractals.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let written: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap())
                .unwrap();
        assert_eq!(
            written,
            json!({"fractals": [
                {"id": "a", "name": "A", "description": "first"},
                {"id": "b", "name": "B", "description": ""}
            ]})
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("bad");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join(TILESET_FILE), "not json").unwrap();

        assert!(build_index(dir.path()).is_err());
    }
}
