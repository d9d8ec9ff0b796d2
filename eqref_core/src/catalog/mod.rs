//! # Catalog Providers
//!
//! Where the equation catalog comes from. The registry only sees the
//! [`CatalogProvider`] trait; a provider may fail, and the registry falls back
//! to another one when it does.
//!
//! ## Providers
//!
//! - [`BuiltinCatalog`] - the locally generated catalog
//! - [`EmptyCatalog`] - nothing at all (last-resort fallback)
//! - [`JsonFileCatalog`] - a catalog document on disk
//! - `RemoteCatalog` - an HTTP service (`remote` feature)
//!
//! ## Example
//!
//! ```rust
//! use eqref_core::catalog::{BuiltinCatalog, CatalogProvider};
//!
//! let equations = BuiltinCatalog::new(20).fetch()?;
//! assert_eq!(equations.len(), 20);
//! # Ok::<(), eqref_core::errors::EqRefError>(())
//! ```

pub mod file;
#[cfg(all(feature = "remote", not(target_arch = "wasm32")))]
pub mod remote;

use crate::equations::{builtin_catalog, EquationDefinition, DEFAULT_BUILTIN_COUNT};
use crate::errors::EqRefResult;

pub use file::{
    load_catalog,
    parse_catalog_json,
    save_catalog,
    CatalogDocument,
    JsonFileCatalog,
    CATALOG_SCHEMA_VERSION,
};
#[cfg(all(feature = "remote", not(target_arch = "wasm32")))]
pub use remote::RemoteCatalog;

/// A source of equation definitions.
pub trait CatalogProvider {
    /// Short human-readable name used in logs and errors
    fn name(&self) -> &str;

    /// Retrieve the full catalog.
    ///
    /// Failures should be reported as `EqRefError::CatalogUnavailable`.
    fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>>;
}

/// The locally generated catalog of `count` equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinCatalog {
    pub count: usize,
}

impl BuiltinCatalog {
    pub fn new(count: usize) -> Self {
        BuiltinCatalog { count }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        BuiltinCatalog::new(DEFAULT_BUILTIN_COUNT)
    }
}

impl CatalogProvider for BuiltinCatalog {
    fn name(&self) -> &str {
        "builtin"
    }

    fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>> {
        Ok(builtin_catalog(self.count))
    }
}

/// Provider that always yields an empty catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyCatalog;

impl CatalogProvider for EmptyCatalog {
    fn name(&self) -> &str {
        "empty"
    }

    fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>> {
        Ok(Vec::new())
    }
}
