//! # Engine Settings
//!
//! Where the catalog comes from and how results are shown. Loaded from a JSON
//! file; every field is optional and falls back to its default.
//!
//! ```json
//! {
//!   "catalogPath": "equations.json",
//!   "remoteUrl": "http://localhost:8080",
//!   "remoteTimeoutSecs": 10,
//!   "builtinCount": 100,
//!   "displayPrecision": 3
//! }
//! ```
//!
//! Catalog selection: `remoteUrl` first, then `catalogPath`, then the builtin
//! catalog. The builtin catalog is always the fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{BuiltinCatalog, CatalogProvider, JsonFileCatalog};
use crate::equations::DEFAULT_BUILTIN_COUNT;
use crate::errors::{EqRefError, EqRefResult};
use crate::registry::{CatalogLoad, EquationRegistry};

/// Decimal places in displayed results
pub const DEFAULT_DISPLAY_PRECISION: usize = 3;

/// Seconds before a remote catalog request gives up
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Catalog document on disk
    pub catalog_path: Option<PathBuf>,
    /// Base URL of a catalog service
    pub remote_url: Option<String>,
    pub remote_timeout_secs: u64,
    /// Size of the locally generated catalog
    pub builtin_count: usize,
    pub display_precision: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            catalog_path: None,
            remote_url: None,
            remote_timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
            builtin_count: DEFAULT_BUILTIN_COUNT,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl EngineSettings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> EqRefResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EqRefError::file_error("read settings", path.display().to_string(), e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| EqRefError::SerializationError {
            reason: format!("Invalid settings in {}: {}", path.display(), e),
        })
    }

    /// The provider the settings select.
    ///
    /// A remote URL without the `remote` feature compiled in is an input error.
    pub fn primary_provider(&self) -> EqRefResult<Box<dyn CatalogProvider>> {
        if let Some(url) = &self.remote_url {
            return remote_provider(url, self.remote_timeout_secs);
        }
        if let Some(path) = &self.catalog_path {
            return Ok(Box::new(JsonFileCatalog::new(path.clone())));
        }
        Ok(Box::new(self.fallback_provider()))
    }

    pub fn fallback_provider(&self) -> BuiltinCatalog {
        BuiltinCatalog::new(self.builtin_count)
    }

    /// Load the registry from the selected provider, falling back to the builtin catalog
    pub fn load_registry(&self) -> EqRefResult<CatalogLoad> {
        let primary = self.primary_provider()?;
        Ok(EquationRegistry::load(primary.as_ref(), &self.fallback_provider()))
    }
}

#[cfg(all(feature = "remote", not(target_arch = "wasm32")))]
fn remote_provider(url: &str, timeout_secs: u64) -> EqRefResult<Box<dyn CatalogProvider>> {
    use crate::catalog::RemoteCatalog;
    use std::time::Duration;

    Ok(Box::new(
        RemoteCatalog::new(url).with_timeout(Duration::from_secs(timeout_secs)),
    ))
}

#[cfg(not(all(feature = "remote", not(target_arch = "wasm32"))))]
fn remote_provider(url: &str, _timeout_secs: u64) -> EqRefResult<Box<dyn CatalogProvider>> {
    Err(EqRefError::invalid_input(
        "remoteUrl",
        url,
        "remote catalogs need the `remote` feature",
    ))
}
