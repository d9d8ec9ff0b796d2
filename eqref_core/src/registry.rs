//! # Equation Registry
//!
//! Owns the catalog and answers the browsing queries:
//!
//! - lookup by identifier
//! - category list and category filter
//! - free-text search (name, category, variable symbol; case-insensitive)
//! - "related" equations sharing an exact variable symbol, over the full catalog
//!
//! The registry is built once from a provider and is read-only afterwards.
//! [`EquationRegistry::load`] never fails: if the primary provider is
//! unavailable (or hands back an invalid catalog) the fallback is used, and if
//! that fails too the registry is empty.
//!
//! ## Example
//!
//! ```rust
//! use eqref_core::catalog::{BuiltinCatalog, EmptyCatalog};
//! use eqref_core::registry::{CatalogOrigin, EquationRegistry};
//!
//! let load = EquationRegistry::load(&BuiltinCatalog::new(20), &EmptyCatalog);
//! assert_eq!(load.origin, CatalogOrigin::Primary);
//!
//! let registry = load.registry;
//! let electrical = registry.list_equations(Some("Electrical Engineering"), None);
//! assert_eq!(electrical.len(), 6);
//!
//! let with_r = registry.equations_by_symbol("R");
//! assert!(with_r.iter().all(|eq| eq.contains_symbol("R")));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::CatalogProvider;
use crate::equations::EquationDefinition;
use crate::errors::{EqRefError, EqRefResult};

/// Category name meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Number of search suggestions shown under the search box
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Read-only, validated equation catalog.
#[derive(Debug, Clone, Default)]
pub struct EquationRegistry {
    equations: Vec<EquationDefinition>,
    by_id: HashMap<String, usize>,
}

impl EquationRegistry {
    /// Build a registry, resolving family tags and validating the catalog.
    ///
    /// Rejects: invalid equations, duplicate equation ids, and variable ids
    /// repeated anywhere in the catalog.
    pub fn new(mut equations: Vec<EquationDefinition>) -> EqRefResult<Self> {
        let mut by_id = HashMap::with_capacity(equations.len());
        let mut variable_ids = HashSet::new();

        for (index, equation) in equations.iter_mut().enumerate() {
            equation.resolve_family();
            equation.validate()?;

            if by_id.insert(equation.id.clone(), index).is_some() {
                return Err(EqRefError::invalid_catalog(format!("duplicate equation id '{}'", equation.id)));
            }
            for var in &equation.variables {
                if !variable_ids.insert(var.id.clone()) {
                    return Err(EqRefError::invalid_catalog(format!(
                        "variable id '{}' in equation {} is already used",
                        var.id, equation.id
                    )));
                }
            }
        }

        Ok(EquationRegistry { equations, by_id })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch from `primary`, falling back to `fallback`, then to an empty catalog.
    pub fn load(primary: &dyn CatalogProvider, fallback: &dyn CatalogProvider) -> CatalogLoad {
        let primary_error = match Self::from_provider(primary) {
            Ok(registry) => {
                info!(provider = primary.name(), equations = registry.len(), "catalog loaded");
                return CatalogLoad {
                    registry,
                    origin: CatalogOrigin::Primary,
                };
            }
            Err(e) => e,
        };
        warn!(provider = primary.name(), error = %primary_error, "catalog unavailable, using fallback");

        let registry = match Self::from_provider(fallback) {
            Ok(registry) => {
                info!(provider = fallback.name(), equations = registry.len(), "fallback catalog loaded");
                registry
            }
            Err(e) => {
                warn!(provider = fallback.name(), error = %e, "fallback catalog unavailable, starting empty");
                Self::empty()
            }
        };

        CatalogLoad {
            registry,
            origin: CatalogOrigin::Fallback { error: primary_error },
        }
    }

    /// Fetch and validate, reporting any failure as `CatalogUnavailable`.
    fn from_provider(provider: &dyn CatalogProvider) -> EqRefResult<Self> {
        provider
            .fetch()
            .and_then(Self::new)
            .map_err(|e| match e {
                EqRefError::CatalogUnavailable { .. } => e,
                other => EqRefError::catalog_unavailable(provider.name(), other.to_string()),
            })
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Every equation, in catalog order
    pub fn all(&self) -> &[EquationDefinition] {
        &self.equations
    }

    pub fn get(&self, id: &str) -> Option<&EquationDefinition> {
        self.by_id.get(id).map(|&index| &self.equations[index])
    }

    /// Like [`get`](Self::get), but a missing id is an error
    pub fn require(&self, id: &str) -> EqRefResult<&EquationDefinition> {
        self.get(id).ok_or_else(|| EqRefError::equation_not_found(id))
    }

    /// `"All"` followed by each distinct category in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for eq in &self.equations {
            if !categories.contains(&eq.category) {
                categories.push(eq.category.clone());
            }
        }
        categories
    }

    /// Equations in `category` (exact; `None` or `"All"` = every category)
    /// matching `query` (blank or `None` = everything), in catalog order.
    pub fn list_equations(&self, category: Option<&str>, query: Option<&str>) -> Vec<&EquationDefinition> {
        let category = category.filter(|c| *c != ALL_CATEGORIES);
        let query = query.unwrap_or("");

        self.equations
            .iter()
            .filter(|eq| category.map_or(true, |c| eq.category == c))
            .filter(|eq| eq.matches_query(query))
            .collect()
    }

    /// First `limit` equations matching `query`, over the whole catalog.
    ///
    /// A blank query suggests nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&EquationDefinition> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.equations
            .iter()
            .filter(|eq| eq.matches_query(query))
            .take(limit)
            .collect()
    }

    /// Every equation with a variable whose symbol is exactly `symbol`.
    ///
    /// Runs over the full catalog regardless of any filter the caller applies.
    pub fn equations_by_symbol(&self, symbol: &str) -> Vec<&EquationDefinition> {
        self.equations.iter().filter(|eq| eq.contains_symbol(symbol)).collect()
    }

    /// Related equations for `equation`: those sharing any of its symbols, excluding itself.
    pub fn related(&self, equation: &EquationDefinition) -> Vec<&EquationDefinition> {
        self.equations
            .iter()
            .filter(|other| other.id != equation.id)
            .filter(|other| equation.variables.iter().any(|v| other.contains_symbol(&v.symbol)))
            .collect()
    }
}

/// Which provider the registry ended up with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum CatalogOrigin {
    Primary,
    /// The primary failed with `error`; the fallback (or nothing) was used
    Fallback { error: EqRefError },
}

/// Result of [`EquationRegistry::load`].
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub registry: EquationRegistry,
    pub origin: CatalogOrigin,
}

impl CatalogLoad {
    pub fn used_fallback(&self) -> bool {
        matches!(self.origin, CatalogOrigin::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuiltinCatalog, EmptyCatalog};
    use crate::equations::{builtin_catalog, EquationFamily, VariableSpec};

    struct FailingCatalog;

    impl CatalogProvider for FailingCatalog {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>> {
            Err(EqRefError::catalog_unavailable("failing", "connection refused"))
        }
    }

    struct FixedCatalog(Vec<EquationDefinition>);

    impl CatalogProvider for FixedCatalog {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>> {
            Ok(self.0.clone())
        }
    }

    fn registry(count: usize) -> EquationRegistry {
        EquationRegistry::new(builtin_catalog(count)).unwrap()
    }

    #[test]
    fn test_get_and_require() {
        let reg = registry(20);
        assert_eq!(reg.get("eq_11").unwrap().name, "Ohm's Law (Variant 2)");
        assert!(reg.get("eq_21").is_none());
        assert_eq!(reg.require("eq_21").unwrap_err().error_code(), "EQUATION_NOT_FOUND");
    }

    #[test]
    fn test_categories_all_first() {
        let reg = registry(100);
        assert_eq!(
            reg.categories(),
            vec![
                "All",
                "Electrical Engineering",
                "Fluid Mechanics",
                "Power Systems",
                "Thermodynamics",
                "Structural Analysis",
                "Signal Processing",
            ]
        );
        assert_eq!(EquationRegistry::empty().categories(), vec!["All"]);
    }

    #[test]
    fn test_list_by_category() {
        let reg = registry(100);
        assert_eq!(reg.list_equations(None, None).len(), 100);
        assert_eq!(reg.list_equations(Some(ALL_CATEGORIES), None).len(), 100);
        assert_eq!(reg.list_equations(Some("Thermodynamics"), None).len(), 20);
        assert!(reg.list_equations(Some("thermodynamics"), None).is_empty());
    }

    #[test]
    fn test_search_matches_name_category_and_symbol() {
        let reg = registry(10);

        let by_name = reg.list_equations(None, Some("reynolds"));
        assert_eq!(by_name.len(), 1);

        let by_category = reg.list_equations(None, Some("FLUID"));
        assert_eq!(by_category.len(), 2);

        // "T_H" appears only as a Carnot symbol
        let by_symbol = reg.list_equations(None, Some("t_h"));
        assert_eq!(by_symbol.len(), 1);
        assert_eq!(by_symbol[0].family, Some(EquationFamily::CarnotEfficiency));

        let combined = reg.list_equations(Some("Electrical Engineering"), Some("τ"));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].name, "RC Time Constant");
    }

    #[test]
    fn test_equations_by_symbol_exact_over_full_catalog() {
        let reg = registry(100);
        let with_r = reg.equations_by_symbol("R");

        // Ohm's Law, Power Dissipation, RC Time Constant and Ideal Gas Law, ten of each
        assert_eq!(with_r.len(), 40);
        for eq in reg.all() {
            assert_eq!(
                with_r.iter().any(|r| r.id == eq.id),
                eq.variables.iter().any(|v| v.symbol == "R"),
                "membership mismatch for {}",
                eq.id
            );
        }

        assert!(reg.equations_by_symbol("r").is_empty());
        assert!(reg.equations_by_symbol("Rx").is_empty());
    }

    #[test]
    fn test_related_excludes_self() {
        let reg = registry(10);
        let ohms = reg.get("eq_1").unwrap();
        let related = reg.related(ohms);
        assert!(related.iter().all(|eq| eq.id != "eq_1"));
        assert!(related.iter().any(|eq| eq.name == "Power Dissipation"));
        assert!(related.iter().any(|eq| eq.name == "Beam Deflection"), "shares I");
    }

    #[test]
    fn test_suggest_limits_results() {
        let reg = registry(100);
        assert_eq!(reg.suggest("law", DEFAULT_SUGGESTION_LIMIT).len(), 10);
        assert_eq!(reg.suggest("law", 3).len(), 3);
        assert!(reg.suggest("   ", 10).is_empty());
    }

    #[test]
    fn test_load_primary() {
        let load = EquationRegistry::load(&BuiltinCatalog::new(5), &EmptyCatalog);
        assert_eq!(load.origin, CatalogOrigin::Primary);
        assert!(!load.used_fallback());
        assert_eq!(load.registry.len(), 5);
    }

    #[test]
    fn test_load_falls_back_when_primary_fails() {
        let load = EquationRegistry::load(&FailingCatalog, &BuiltinCatalog::new(7));
        assert!(load.used_fallback());
        assert_eq!(load.registry.len(), 7);
        match load.origin {
            CatalogOrigin::Fallback { error } => assert_eq!(error.error_code(), "CATALOG_UNAVAILABLE"),
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_load_empty_when_everything_fails() {
        let load = EquationRegistry::load(&FailingCatalog, &FailingCatalog);
        assert!(load.used_fallback());
        assert!(load.registry.is_empty());
        assert_eq!(load.registry.categories(), vec!["All"]);
    }

    #[test]
    fn test_invalid_primary_triggers_fallback() {
        let mut equations = builtin_catalog(2);
        equations[1].variables.push(VariableSpec::new("V", "Again", "V", "").with_id("dup"));

        let load = EquationRegistry::load(&FixedCatalog(equations), &EmptyCatalog);
        match load.origin {
            CatalogOrigin::Fallback { error } => {
                assert_eq!(error.error_code(), "CATALOG_UNAVAILABLE");
                assert!(error.to_string().contains("repeats symbol"), "got {}", error);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut equations = builtin_catalog(2);
        equations[1].id = "eq_1".to_string();
        assert!(EquationRegistry::new(equations).is_err());

        let mut equations = builtin_catalog(2);
        equations[1].variables[0].id = equations[0].variables[0].id.clone();
        let err = EquationRegistry::new(equations).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATALOG");
    }

    #[test]
    fn test_family_resolved_from_name() {
        let mut equations = builtin_catalog(12);
        for eq in &mut equations {
            eq.family = None;
        }
        let reg = EquationRegistry::new(equations).unwrap();
        assert_eq!(reg.get("eq_12").unwrap().family, Some(EquationFamily::PowerDissipation));
    }
}
