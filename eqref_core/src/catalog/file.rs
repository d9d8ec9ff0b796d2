//! # Catalog Files
//!
//! Reads and writes catalog documents as JSON:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: documents carry a schema version
//! - **Lenient reads**: a bare array of equations is accepted as well
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "generatedAt": "2025-01-01T00:00:00Z",
//!   "equations": [ { "id": "eq_1", "name": "Ohm's Law", ... } ],
//!   "categories": ["Electrical Engineering"]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use eqref_core::catalog::{load_catalog, save_catalog};
//! use eqref_core::equations::builtin_catalog;
//! use std::path::Path;
//!
//! let path = Path::new("catalog.json");
//! save_catalog(path, &builtin_catalog(10))?;
//! let equations = load_catalog(path)?;
//! assert_eq!(equations.len(), 10);
//! # Ok::<(), eqref_core::errors::EqRefError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CatalogProvider;
use crate::equations::EquationDefinition;
use crate::errors::{EqRefError, EqRefResult};

/// Current catalog document schema version
pub const CATALOG_SCHEMA_VERSION: &str = "0.1.0";

/// A catalog as written to disk or served by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub equations: Vec<EquationDefinition>,
    /// Advisory; the registry derives its own category list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

fn default_version() -> String {
    CATALOG_SCHEMA_VERSION.to_string()
}

impl CatalogDocument {
    /// Wrap `equations` in a freshly stamped document
    pub fn new(equations: Vec<EquationDefinition>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for eq in &equations {
            if !categories.contains(&eq.category) {
                categories.push(eq.category.clone());
            }
        }

        CatalogDocument {
            version: CATALOG_SCHEMA_VERSION.to_string(),
            generated_at: Some(Utc::now()),
            equations,
            categories,
        }
    }
}

/// Either shape a catalog payload may take
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Document(CatalogDocument),
    Bare(Vec<EquationDefinition>),
}

/// Parse a catalog payload (document or bare array).
///
/// `origin` names the source in error messages.
pub fn parse_catalog_json(json: &str, origin: &str) -> EqRefResult<Vec<EquationDefinition>> {
    let payload: CatalogPayload = serde_json::from_str(json).map_err(|e| EqRefError::SerializationError {
        reason: format!("Invalid catalog JSON in {}: {}", origin, e),
    })?;

    match payload {
        CatalogPayload::Document(document) => {
            validate_version(&document.version)?;
            Ok(document.equations)
        }
        CatalogPayload::Bare(equations) => Ok(equations),
    }
}

/// Save `equations` as a catalog document with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_catalog(path: &Path, equations: &[EquationDefinition]) -> EqRefResult<()> {
    let document = CatalogDocument::new(equations.to_vec());
    let json = serde_json::to_string_pretty(&document).map_err(|e| EqRefError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| EqRefError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| EqRefError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| EqRefError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EqRefError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), equations = equations.len(), "saved catalog");
    Ok(())
}

/// Load the equations of a catalog file.
pub fn load_catalog(path: &Path) -> EqRefResult<Vec<EquationDefinition>> {
    let mut file =
        File::open(path).map_err(|e| EqRefError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| EqRefError::file_error("read", path.display().to_string(), e.to_string()))?;

    parse_catalog_json(&contents, &path.display().to_string())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a document version is compatible with the current schema.
fn validate_version(file_version: &str) -> EqRefResult<()> {
    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = CATALOG_SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || EqRefError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: CATALOG_SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x, a newer minor version is not readable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

/// Catalog document on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileCatalog {
    pub path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCatalog { path: path.into() }
    }
}

impl CatalogProvider for JsonFileCatalog {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>> {
        load_catalog(&self.path).map_err(|e| EqRefError::catalog_unavailable(self.path.display().to_string(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::builtin_catalog;
    use std::env::temp_dir;

    fn temp_catalog_path(name: &str) -> PathBuf {
        temp_dir().join(format!("eqref_test_{}.json", name))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_catalog_path("roundtrip");
        let equations = builtin_catalog(12);

        save_catalog(&path, &equations).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, equations);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_catalog_path("atomic");
        let tmp_path = tmp_path_for(&path);
        assert_eq!(tmp_path, temp_dir().join("eqref_test_atomic.json.tmp"));

        save_catalog(&path, &builtin_catalog(3)).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_saved_document_is_stamped() {
        let path = temp_catalog_path("stamped");
        save_catalog(&path, &builtin_catalog(3)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let document: CatalogDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(document.version, CATALOG_SCHEMA_VERSION);
        assert!(document.generated_at.is_some());
        assert_eq!(document.categories, vec!["Electrical Engineering".to_string()]);
        assert!(text.contains("\"resultVar\""), "fields should be camelCase");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{
            "id": "eq_1",
            "name": "Ohm's Law",
            "category": "Electrical Engineering",
            "variables": [
                { "id": "v", "symbol": "V", "name": "Voltage", "unit": "V" },
                { "id": "i", "symbol": "I", "name": "Current", "unit": "A" },
                { "id": "r", "symbol": "R", "name": "Resistance", "unit": "Ω" }
            ],
            "resultVar": "V"
        }]"#;
        let equations = parse_catalog_json(json, "test").unwrap();
        assert_eq!(equations.len(), 1);
        assert_eq!(equations[0].variables[2].unit, "Ω");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_catalog_json("{ not json", "test").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(CATALOG_SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("banana").is_err());
    }

    #[test]
    fn test_newer_document_is_rejected() {
        let json = r#"{ "version": "0.9.0", "equations": [] }"#;
        let err = parse_catalog_json(json, "test").unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_missing_file_is_catalog_unavailable() {
        let provider = JsonFileCatalog::new(temp_catalog_path("does_not_exist"));
        let err = provider.fetch().unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_UNAVAILABLE");
    }
}
