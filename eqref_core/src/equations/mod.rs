//! # Engineering Equations
//!
//! Catalog records and the per-family closed-form inverses the solver uses.
//!
//! ## Modules
//!
//! - [`definition`] - `EquationDefinition`, `VariableSpec`, `WorkedExample`
//! - [`family`] - Stable family tags (`EquationFamily`) used for solver dispatch
//! - [`inverses`] - The `(family, symbol) -> inverse` lookup table
//! - [`builtin`] - Locally generated catalog (one template per family)
//!
//! ## Conventions
//!
//! - All arithmetic is `f64`; every inverse is closed-form
//! - Physical quantities under a root are taken as non-negative (positive root)
//! - Constants keep their rounded display value in the catalog; inverses use
//!   full precision where the two differ (√3)

pub mod builtin;
pub mod definition;
pub mod family;
pub mod inverses;

pub use builtin::{builtin_catalog, template, DEFAULT_BUILTIN_COUNT};
pub use definition::{EquationDefinition, VariableSpec, WorkedExample};
pub use family::{EquationFamily, ALL_FAMILIES};
pub use inverses::{
    canonical_symbol,
    lookup,
    solvable_symbols,
    InverseFailure,
    InverseFn,
    Knowns,
    BEAM_CENTER_LOAD_FACTOR,
    GAS_CONSTANT,
    NYQUIST_FACTOR,
    SQRT_3,
    STANDARD_GRAVITY,
};
