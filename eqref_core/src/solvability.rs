//! # Solvability
//!
//! Decides, from the live text of an equation's input fields, whether a solve is
//! currently well-posed, and runs it when it is.
//!
//! Everything here is pure and re-run on every input change:
//!
//! 1. [`parse_input`] classifies each field as known or not known
//! 2. [`InputValueSet::from_text`] collects known values and injects constants
//! 3. [`reduce_solvability`] finds the single unknown, if there is exactly one
//! 4. [`evaluate`] combines the above with [`solve`](crate::solver::solve)
//!
//! A blank field and a non-numeric field are both simply "not known"; neither
//! is an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{EquationDefinition, VariableSpec};
use crate::errors::EqRefError;
use crate::solver::{solve, SolveResult};

// ============================================================================
// Input Parsing
// ============================================================================

/// State of one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputState {
    Known(f64),
    /// Blank, non-numeric, or not finite
    NotKnown,
}

impl InputState {
    pub fn value(&self) -> Option<f64> {
        match self {
            InputState::Known(value) => Some(*value),
            InputState::NotKnown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, InputState::Known(_))
    }
}

/// Classify the text of an input field.
///
/// Surrounding whitespace is ignored. The whole remaining text must parse as a
/// finite `f64`.
///
/// ```rust
/// use eqref_core::solvability::{parse_input, InputState};
///
/// assert_eq!(parse_input(" 2.5 "), InputState::Known(2.5));
/// assert_eq!(parse_input("1e3"), InputState::Known(1000.0));
/// assert_eq!(parse_input(""), InputState::NotKnown);
/// assert_eq!(parse_input("abc"), InputState::NotKnown);
/// assert_eq!(parse_input("inf"), InputState::NotKnown);
/// ```
pub fn parse_input(text: &str) -> InputState {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => InputState::Known(value),
        _ => InputState::NotKnown,
    }
}

// ============================================================================
// Input Value Set
// ============================================================================

/// Known values of one equation view, keyed by variable id.
///
/// Ephemeral: rebuilt from the input fields on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputValueSet {
    values: HashMap<String, f64>,
}

impl InputValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the equation's constants
    pub fn with_constants(equation: &EquationDefinition) -> Self {
        let mut set = Self::new();
        set.inject_constants(equation);
        set
    }

    /// Build the set from raw field text keyed by variable id.
    ///
    /// Only non-constant variables are read from `raw`; constants always take
    /// their fixed value. Ids in `raw` that the equation does not have are ignored.
    pub fn from_text(equation: &EquationDefinition, raw: &HashMap<String, String>) -> Self {
        let mut set = Self::new();
        for var in equation.input_variables() {
            if let Some(value) = raw.get(&var.id).and_then(|text| parse_input(text).value()) {
                set.insert(&var.id, value);
            }
        }
        set.inject_constants(equation);
        set
    }

    /// Add every constant of `equation` at its fixed value
    pub fn inject_constants(&mut self, equation: &EquationDefinition) {
        for var in equation.constants() {
            if let Some(value) = var.fixed_value() {
                self.insert(&var.id, value);
            }
        }
    }

    pub fn insert(&mut self, variable_id: &str, value: f64) {
        self.values.insert(variable_id.to_string(), value);
    }

    pub fn remove(&mut self, variable_id: &str) -> Option<f64> {
        self.values.remove(variable_id)
    }

    pub fn get(&self, variable_id: &str) -> Option<f64> {
        self.values.get(variable_id).copied()
    }

    pub fn is_known(&self, variable_id: &str) -> bool {
        self.values.contains_key(variable_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Whether the current inputs support a unique solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Solvability {
    /// Zero unknowns: every value is entered, nothing to solve for
    AllKnown,
    /// Two or more unknowns (ids in declaration order)
    Unsolvable { unknowns: Vec<String> },
    /// Exactly one unknown
    ReadyToSolve { variable_id: String },
}

/// Decide solvability over `variables`, given which ids are known.
///
/// Constants are skipped: they are always known.
pub fn reduce_solvability(variables: &[VariableSpec], known: &InputValueSet) -> Solvability {
    let mut unknowns: Vec<String> = variables
        .iter()
        .filter(|v| !v.is_constant && !known.is_known(&v.id))
        .map(|v| v.id.clone())
        .collect();

    let solvability = match unknowns.len() {
        0 => Solvability::AllKnown,
        1 => Solvability::ReadyToSolve {
            variable_id: unknowns.remove(0),
        },
        _ => Solvability::Unsolvable { unknowns },
    };
    debug!(?solvability, "reduced input state");
    solvability
}

// ============================================================================
// Evaluation
// ============================================================================

/// What the result panel should show for the current inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Evaluation {
    /// Exactly one unknown, and its inverse produced a finite value
    Solved { result: SolveResult },
    /// Every input is entered
    AllValuesEntered,
    /// Two or more inputs are still missing
    AwaitingInput { unknowns: Vec<String> },
    /// Exactly one unknown, but it cannot be computed
    CannotCalculate { reason: EqRefError },
}

impl Evaluation {
    /// One-line summary in the style of the result panel
    pub fn headline(&self, precision: usize) -> String {
        match self {
            Evaluation::Solved { result } => format!("{} = {}", result.symbol, result.display(precision)),
            Evaluation::AllValuesEntered => "All values entered".to_string(),
            Evaluation::AwaitingInput { .. } => "___".to_string(),
            Evaluation::CannotCalculate { .. } => "Cannot calculate".to_string(),
        }
    }
}

/// Evaluate an equation from raw field text keyed by variable id.
pub fn evaluate(equation: &EquationDefinition, raw: &HashMap<String, String>) -> Evaluation {
    evaluate_values(equation, &InputValueSet::from_text(equation, raw))
}

/// Evaluate an equation from already-parsed known values.
pub fn evaluate_values(equation: &EquationDefinition, known: &InputValueSet) -> Evaluation {
    match reduce_solvability(&equation.variables, known) {
        Solvability::AllKnown => Evaluation::AllValuesEntered,
        Solvability::Unsolvable { unknowns } => Evaluation::AwaitingInput { unknowns },
        Solvability::ReadyToSolve { variable_id } => match solve(equation, known, &variable_id) {
            Ok(result) => Evaluation::Solved { result },
            Err(reason) => Evaluation::CannotCalculate { reason },
        },
    }
}
