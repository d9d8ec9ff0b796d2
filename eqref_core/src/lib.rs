//! # eqref_core - Engineering Equation Reference Engine
//!
//! `eqref_core` holds a catalog of engineering equations, decides from live
//! input text whether a single unknown can be computed, and computes it with a
//! hand-authored closed-form inverse. All types are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions over explicit inputs; no global mutable state
//! - **Closed-form only**: one authored inverse per (family, symbol); anything
//!   else is reported as "no closed form", never guessed
//! - **Failures are values**: not-known inputs and unsolvable states are
//!   display states, real failures are structured [`EqRefError`]s
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use eqref_core::catalog::{BuiltinCatalog, EmptyCatalog};
//! use eqref_core::registry::EquationRegistry;
//! use eqref_core::solvability::{evaluate, Evaluation};
//!
//! let registry = EquationRegistry::load(&BuiltinCatalog::default(), &EmptyCatalog).registry;
//! let ohms = registry.require("eq_1")?;
//!
//! let mut inputs = HashMap::new();
//! inputs.insert("OhmsLaw_I_0".to_string(), "2".to_string());
//! inputs.insert("OhmsLaw_R_0".to_string(), "100".to_string());
//!
//! match evaluate(ohms, &inputs) {
//!     Evaluation::Solved { result } => assert_eq!(result.value, 200.0),
//!     other => panic!("unexpected {:?}", other),
//! }
//! # Ok::<(), eqref_core::errors::EqRefError>(())
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Catalog records, families, inverse table, builtin catalog
//! - [`solvability`] - Input parsing, the single-unknown reducer, evaluation
//! - [`solver`] - Dispatch to the authored inverse
//! - [`registry`] - Catalog lookup, filtering, search, related equations
//! - [`catalog`] - Catalog providers and catalog files
//! - [`spreadsheet`] - Spreadsheet formula cell substitution
//! - [`markdown`] - Markdown reference export
//! - [`settings`] - Engine settings
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod equations;
pub mod errors;
pub mod markdown;
pub mod registry;
pub mod settings;
pub mod solvability;
pub mod solver;
pub mod spreadsheet;

// Re-export commonly used types at crate root for convenience
pub use equations::{EquationDefinition, EquationFamily, VariableSpec};
pub use errors::{EqRefError, EqRefResult};
pub use registry::{CatalogLoad, CatalogOrigin, EquationRegistry};
pub use settings::EngineSettings;
pub use solvability::{evaluate, parse_input, reduce_solvability, Evaluation, InputState, InputValueSet, Solvability};
pub use solver::{solve, SolveResult};
pub use spreadsheet::render_formula_template;
