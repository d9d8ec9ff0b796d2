//! # Equation Definitions
//!
//! Read-only catalog records. An [`EquationDefinition`] owns its ordered list of
//! [`VariableSpec`]s; both are created once at load time and never mutated.
//!
//! Field names serialize in camelCase so the same types read the remote
//! catalog payload (`resultVar`, `excelFormula`, `isConstant`, ...).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::family::EquationFamily;
use crate::errors::{EqRefError, EqRefResult};

// ============================================================================
// Variables
// ============================================================================

/// One variable of an equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSpec {
    /// Identifier, unique across the whole catalog
    #[serde(default)]
    pub id: String,
    /// Algebraic token (e.g. "R", "f_{max}", "ρ"); unique within one equation
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Unit string ("" for dimensionless)
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
    /// Spreadsheet cell the formula template uses for this variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cell: Option<String>,
    /// Constants are never user-editable and always known
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_constant: bool,
    /// Fixed (display) value of a constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<f64>,
    /// Where the constant comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_derivation: Option<String>,
}

impl VariableSpec {
    /// A user-editable variable. The id is assigned when the equation joins a catalog.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        VariableSpec {
            id: String::new(),
            symbol: symbol.into(),
            name: name.into(),
            unit: unit.into(),
            description: description.into(),
            default_cell: None,
            is_constant: false,
            constant_value: None,
            constant_derivation: None,
        }
    }

    /// A constant with a fixed value and its derivation.
    pub fn constant(
        symbol: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        value: f64,
        derivation: impl Into<String>,
    ) -> Self {
        VariableSpec {
            is_constant: true,
            constant_value: Some(value),
            constant_derivation: Some(derivation.into()),
            ..VariableSpec::new(symbol, name, unit, description)
        }
    }

    /// Set the default spreadsheet cell
    pub fn with_cell(mut self, cell: impl Into<String>) -> Self {
        self.default_cell = Some(cell.into());
        self
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The fixed value if this is a constant
    pub fn fixed_value(&self) -> Option<f64> {
        if self.is_constant {
            self.constant_value
        } else {
            None
        }
    }
}

// ============================================================================
// Worked Example
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub given: String,
    pub result: String,
}

impl WorkedExample {
    pub fn new(given: impl Into<String>, result: impl Into<String>) -> Self {
        WorkedExample {
            given: given.into(),
            result: result.into(),
        }
    }
}

// ============================================================================
// Equation Definition
// ============================================================================

/// A catalog entry: one formula with its variables and reference material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationDefinition {
    /// Unique identifier (e.g. "eq_1")
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub description: String,
    /// Display-only formula (LaTeX)
    #[serde(default)]
    pub latex: String,
    /// Ordered variable list, owned by this equation
    pub variables: Vec<VariableSpec>,
    /// Symbol of the natural result variable
    pub result_var: String,
    /// Spreadsheet formula template with default cell references
    #[serde(default)]
    pub excel_formula: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<WorkedExample>,
    /// Solver tag. Resolved from the name at load time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<EquationFamily>,
}

impl EquationDefinition {
    /// Look up a variable by identifier
    pub fn variable(&self, id: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Look up a variable by exact symbol
    pub fn variable_by_symbol(&self, symbol: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.symbol == symbol)
    }

    /// Variable that matches `key` as an id first, then as a symbol
    pub fn find_variable(&self, key: &str) -> Option<&VariableSpec> {
        self.variable(key).or_else(|| self.variable_by_symbol(key))
    }

    /// The natural result variable, if the record lists it
    pub fn result_variable(&self) -> Option<&VariableSpec> {
        self.variable_by_symbol(&self.result_var)
    }

    /// User-editable variables in declaration order
    pub fn input_variables(&self) -> impl Iterator<Item = &VariableSpec> {
        self.variables.iter().filter(|v| !v.is_constant)
    }

    /// Constant variables in declaration order
    pub fn constants(&self) -> impl Iterator<Item = &VariableSpec> {
        self.variables.iter().filter(|v| v.is_constant)
    }

    /// Exact, case-sensitive symbol membership
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.variables.iter().any(|v| v.symbol == symbol)
    }

    /// Case-insensitive substring match against name, category and variable symbols.
    ///
    /// A blank query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
            || self
                .variables
                .iter()
                .any(|v| v.symbol.to_lowercase().contains(&query))
    }

    /// Spreadsheet cell for the variable at `index`: its default, else `C{index+1}`
    pub fn default_cell(&self, index: usize) -> String {
        self.variables
            .get(index)
            .and_then(|v| v.default_cell.clone())
            .unwrap_or_else(|| format!("C{}", index + 1))
    }

    /// Fill in the family tag from the display name if the record has none.
    pub fn resolve_family(&mut self) {
        if self.family.is_none() {
            self.family = EquationFamily::from_name(&self.name);
        }
    }

    /// Check the structural invariants of a single equation.
    ///
    /// - id, name and every variable id/symbol are non-blank
    /// - symbols are unique within the equation
    /// - variable ids are unique within the equation
    /// - every constant carries a finite value
    pub fn validate(&self) -> EqRefResult<()> {
        if self.id.trim().is_empty() {
            return Err(EqRefError::invalid_catalog(format!(
                "equation '{}' has an empty id",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(EqRefError::invalid_catalog(format!(
                "equation {} has an empty name",
                self.id
            )));
        }

        let mut symbols = HashSet::new();
        let mut ids = HashSet::new();
        for var in &self.variables {
            if var.symbol.trim().is_empty() || var.id.trim().is_empty() {
                return Err(EqRefError::invalid_catalog(format!(
                    "equation {} has a variable with an empty id or symbol",
                    self.id
                )));
            }
            if !symbols.insert(var.symbol.as_str()) {
                return Err(EqRefError::invalid_catalog(format!(
                    "equation {} repeats symbol '{}'",
                    self.id, var.symbol
                )));
            }
            if !ids.insert(var.id.as_str()) {
                return Err(EqRefError::invalid_catalog(format!(
                    "equation {} repeats variable id '{}'",
                    self.id, var.id
                )));
            }
            if var.is_constant && !var.constant_value.is_some_and(f64::is_finite) {
                return Err(EqRefError::invalid_catalog(format!(
                    "constant '{}' in equation {} has no finite value",
                    var.symbol, self.id
                )));
            }
        }

        Ok(())
    }
}
