//! # Solver Dispatch
//!
//! Given an equation, a fully known-value map and the id of the single unknown
//! variable, look up the authored inverse for `(family, symbol)` and run it.
//!
//! Failures are reported distinctly:
//!
//! - [`EqRefError::NoClosedForm`] - no inverse authored for the pair, the
//!   equation has no family tag, or the inverse has no real root
//! - [`EqRefError::NonFinite`] - the inverse produced NaN or an infinity
//!   (division by zero, square root of a negative)
//! - [`EqRefError::MissingValue`] - a value the inverse needs is not known
//!
//! ## Example
//!
//! ```rust
//! use eqref_core::equations::builtin_catalog;
//! use eqref_core::solvability::InputValueSet;
//! use eqref_core::solver::solve;
//!
//! let catalog = builtin_catalog(1);
//! let ohms = &catalog[0];
//!
//! let mut known = InputValueSet::with_constants(ohms);
//! known.insert("OhmsLaw_I_0", 2.0);
//! known.insert("OhmsLaw_R_0", 100.0);
//!
//! let result = solve(ohms, &known, "OhmsLaw_V_0")?;
//! assert_eq!(result.value, 200.0);
//! assert_eq!(result.display(3), "200.000 V");
//! # Ok::<(), eqref_core::errors::EqRefError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{lookup, EquationDefinition, InverseFailure, Knowns};
use crate::errors::{EqRefError, EqRefResult};
use crate::solvability::InputValueSet;

/// A successfully computed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Id of the variable solved for
    pub variable_id: String,
    /// Symbol of the variable solved for
    pub symbol: String,
    pub unit: String,
    pub value: f64,
}

impl SolveResult {
    /// Value with `precision` decimals followed by the unit, e.g. `"200.000 V"`
    pub fn display(&self, precision: usize) -> String {
        if self.unit.is_empty() {
            format!("{:.*}", precision, self.value)
        } else {
            format!("{:.*} {}", precision, self.value, self.unit)
        }
    }
}

/// Solve `equation` for the variable `unknown_id`.
///
/// `known` is keyed by variable id and already includes injected constants.
/// Any value recorded for the unknown itself is ignored.
pub fn solve(equation: &EquationDefinition, known: &InputValueSet, unknown_id: &str) -> EqRefResult<SolveResult> {
    let target = equation
        .variable(unknown_id)
        .ok_or_else(|| EqRefError::variable_not_found(&equation.id, unknown_id))?;

    let inverse = equation
        .family
        .and_then(|family| lookup(family, &target.symbol))
        .ok_or_else(|| EqRefError::no_closed_form(&equation.id, &target.symbol))?;

    let knowns: Knowns = equation
        .variables
        .iter()
        .filter(|v| v.id != target.id)
        .filter_map(|v| known.get(&v.id).map(|value| (v.symbol.as_str(), value)))
        .collect();

    debug!(
        equation = %equation.id,
        symbol = %target.symbol,
        known = knowns.len(),
        "dispatching closed-form inverse"
    );

    let value = inverse(&knowns).map_err(|failure| match failure {
        InverseFailure::Missing(symbol) => EqRefError::missing_value(&equation.id, symbol),
        InverseFailure::NoRealRoot => EqRefError::no_closed_form(&equation.id, &target.symbol),
    })?;

    if !value.is_finite() {
        return Err(EqRefError::non_finite(&equation.id, &target.symbol, value));
    }

    Ok(SolveResult {
        variable_id: target.id.clone(),
        symbol: target.symbol.clone(),
        unit: target.unit.clone(),
        value,
    })
}

/// Solve for a variable named by symbol rather than id.
pub fn solve_for_symbol(equation: &EquationDefinition, known: &InputValueSet, symbol: &str) -> EqRefResult<SolveResult> {
    let target = equation
        .variable_by_symbol(symbol)
        .ok_or_else(|| EqRefError::variable_not_found(&equation.id, symbol))?;
    solve(equation, known, &target.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{builtin_catalog, solvable_symbols, EquationFamily, ALL_FAMILIES};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// Base catalog entry of a family (first pass, index = family position)
    fn equation(family: EquationFamily) -> EquationDefinition {
        let index = ALL_FAMILIES.iter().position(|f| *f == family).unwrap();
        builtin_catalog(ALL_FAMILIES.len()).swap_remove(index)
    }

    fn known(eq: &EquationDefinition, values: &[(&str, f64)]) -> InputValueSet {
        let mut set = InputValueSet::with_constants(eq);
        for (symbol, value) in values {
            let var = eq.variable_by_symbol(symbol).unwrap();
            set.insert(&var.id, *value);
        }
        set
    }

    #[test]
    fn test_ohms_law_both_directions() {
        let eq = equation(EquationFamily::OhmsLaw);
        let v = solve_for_symbol(&eq, &known(&eq, &[("I", 2.0), ("R", 100.0)]), "V").unwrap();
        assert_eq!(v.value, 200.0);

        let i = solve_for_symbol(&eq, &known(&eq, &[("V", 200.0), ("R", 100.0)]), "I").unwrap();
        assert_eq!(i.value, 2.0);
        assert_eq!(i.unit, "A");
    }

    #[test]
    fn test_power_dissipation_exact() {
        let eq = equation(EquationFamily::PowerDissipation);
        let p = solve_for_symbol(&eq, &known(&eq, &[("I", 2.0), ("R", 50.0)]), "P").unwrap();
        assert_eq!(p.value, 200.0);
    }

    #[test]
    fn test_power_current_negative_radicand_is_non_finite() {
        let eq = equation(EquationFamily::PowerDissipation);
        let err = solve_for_symbol(&eq, &known(&eq, &[("P", -200.0), ("R", 50.0)]), "I").unwrap_err();
        match err {
            EqRefError::NonFinite { ref symbol, .. } => assert_eq!(symbol, "I"),
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }

    #[test]
    fn test_reynolds_number_exact() {
        let eq = equation(EquationFamily::ReynoldsNumber);
        let values = [("ρ", 1000.0), ("v", 2.0), ("D", 0.1), ("μ", 0.001)];
        let re = solve_for_symbol(&eq, &known(&eq, &values), "Re").unwrap();
        assert_relative_eq!(re.value, 200_000.0, max_relative = 1e-12);
        assert_eq!(re.display(0), "200000");
    }

    #[test]
    fn test_reynolds_division_by_zero_is_non_finite() {
        let eq = equation(EquationFamily::ReynoldsNumber);

        // Zero viscosity in the denominator
        let values = [("ρ", 1000.0), ("v", 2.0), ("D", 0.1), ("μ", 0.0)];
        let err = solve_for_symbol(&eq, &known(&eq, &values), "Re").unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE");

        // 0 / 0 is NaN
        let values = [("Re", 0.0), ("μ", 0.001), ("v", 2.0), ("D", 0.0)];
        let err = solve_for_symbol(&eq, &known(&eq, &values), "ρ").unwrap_err();
        assert!(matches!(err, EqRefError::NonFinite { .. }), "got {:?}", err);

        // A zero numerator is a legitimate zero
        let values = [("Re", 200_000.0), ("ρ", 1000.0), ("v", 0.0), ("D", 0.1)];
        let mu = solve_for_symbol(&eq, &known(&eq, &values), "μ").unwrap();
        assert_eq!(mu.value, 0.0);
    }

    #[test]
    fn test_beam_length_negative_radicand_has_no_closed_form() {
        let eq = equation(EquationFamily::BeamDeflection);
        let values = [("δ", 0.0034), ("F", -1000.0), ("E", 200e9), ("I", 8.33e-6)];
        let err = solve_for_symbol(&eq, &known(&eq, &values), "L").unwrap_err();
        assert!(matches!(err, EqRefError::NoClosedForm { .. }), "got {:?}", err);
    }

    #[test]
    fn test_beam_length_real_cube_root() {
        let eq = equation(EquationFamily::BeamDeflection);
        let delta = 1000.0 * 27.0 / (48.0 * 200e9 * 8.33e-6);
        let values = [("δ", delta), ("F", 1000.0), ("E", 200e9), ("I", 8.33e-6)];
        let l = solve_for_symbol(&eq, &known(&eq, &values), "L").unwrap();
        assert_relative_eq!(l.value, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_unauthored_symbol_has_no_closed_form() {
        let eq = equation(EquationFamily::BernoulliHeadLoss);
        let values = [
            ("P_2", 150_000.0),
            ("V_1", 3.0),
            ("V_2", 2.0),
            ("Z_1", 10.0),
            ("Z_2", 6.0),
            (r"\gamma", 9810.0),
            ("h_L", 9.35),
        ];
        let err = solve_for_symbol(&eq, &known(&eq, &values), "P_1").unwrap_err();
        assert_eq!(err, EqRefError::no_closed_form(&eq.id, "P_1"));

        let eq = equation(EquationFamily::ThreePhasePower);
        let values = [("P", 6790.0), ("V_L", 400.0), ("I_L", 10.0)];
        assert!(solve_for_symbol(&eq, &known(&eq, &values), r"\phi").is_err());
    }

    #[test]
    fn test_untagged_equation_has_no_closed_form() {
        let mut eq = equation(EquationFamily::OhmsLaw);
        eq.family = None;
        let err = solve_for_symbol(&eq, &known(&eq, &[("I", 2.0), ("R", 100.0)]), "V").unwrap_err();
        assert_eq!(err.error_code(), "NO_CLOSED_FORM");
    }

    #[test]
    fn test_missing_value_is_reported() {
        let eq = equation(EquationFamily::OhmsLaw);
        let err = solve_for_symbol(&eq, &known(&eq, &[("I", 2.0)]), "V").unwrap_err();
        assert_eq!(err, EqRefError::missing_value(&eq.id, "R"));
    }

    #[test]
    fn test_unknown_value_is_ignored() {
        let eq = equation(EquationFamily::OhmsLaw);
        let set = known(&eq, &[("V", 999.0), ("I", 2.0), ("R", 100.0)]);
        let v = solve_for_symbol(&eq, &set, "V").unwrap();
        assert_eq!(v.value, 200.0);
    }

    #[test]
    fn test_unknown_variable_id() {
        let eq = equation(EquationFamily::OhmsLaw);
        let err = solve(&eq, &InputValueSet::new(), "nope").unwrap_err();
        assert_eq!(err.error_code(), "VARIABLE_NOT_FOUND");
    }

    #[test]
    fn test_nyquist_boundary() {
        let eq = equation(EquationFamily::NyquistFrequency);
        let fs = solve_for_symbol(&eq, &known(&eq, &[("f_{max}", 1000.0)]), "f_s").unwrap();
        assert_eq!(fs.value, 2000.0);
        let fmax = solve_for_symbol(&eq, &known(&eq, &[("f_s", 2000.0)]), "f_{max}").unwrap();
        assert_eq!(fmax.value, 1000.0);
    }

    #[test]
    fn test_carnot_and_ideal_gas() {
        let eq = equation(EquationFamily::CarnotEfficiency);
        let eta = solve_for_symbol(&eq, &known(&eq, &[("T_C", 300.0), ("T_H", 600.0)]), "η").unwrap();
        assert_relative_eq!(eta.value, 0.5);
        assert_eq!(eta.display(3), "0.500");

        let eq = equation(EquationFamily::IdealGasLaw);
        let p = solve_for_symbol(&eq, &known(&eq, &[("n", 1.0), ("T", 273.0), ("V", 0.0224)]), "P").unwrap();
        assert_relative_eq!(p.value, 101_326.875, max_relative = 1e-9);
    }

    /// Positive sample values for every symbol used by the builtin families.
    fn sample_values(eq: &EquationDefinition, seed: &[f64]) -> Vec<(String, f64)> {
        eq.input_variables()
            .enumerate()
            .map(|(i, v)| {
                let raw = seed[i % seed.len()];
                let value = match v.symbol.as_str() {
                    // Keep cos(φ) well away from zero and η below one
                    r"\phi" => raw / 10.0,
                    "η" => raw / 20.0,
                    _ => raw,
                };
                (v.symbol.clone(), value)
            })
            .collect()
    }

    proptest! {
        /// Solve the natural result forward, then recover every authored
        /// input symbol from that result.
        #[test]
        fn prop_round_trip_law(seed in prop::collection::vec(0.5f64..10.0, 9)) {
            for family in ALL_FAMILIES {
                let eq = equation(*family);
                let result_var = eq.result_variable().unwrap().clone();
                let inputs = sample_values(&eq, &seed);

                let forward_inputs: Vec<(&str, f64)> = inputs
                    .iter()
                    .filter(|(s, _)| *s != result_var.symbol)
                    .map(|(s, v)| (s.as_str(), *v))
                    .collect();
                let forward = solve_for_symbol(&eq, &known(&eq, &forward_inputs), &result_var.symbol).unwrap();

                for symbol in solvable_symbols(*family) {
                    let target = eq.input_variables().find(|v| crate::equations::canonical_symbol(&v.symbol) == symbol).unwrap();
                    if target.symbol == result_var.symbol {
                        continue;
                    }
                    let original = inputs.iter().find(|(s, _)| *s == target.symbol).unwrap().1;
                    let mut back_inputs: Vec<(&str, f64)> = forward_inputs
                        .iter()
                        .copied()
                        .filter(|(s, _)| *s != target.symbol)
                        .collect();
                    back_inputs.push((result_var.symbol.as_str(), forward.value));

                    let back = solve_for_symbol(&eq, &known(&eq, &back_inputs), &target.symbol).unwrap();
                    prop_assert!(
                        (back.value - original).abs() <= 1e-9 * original.abs().max(1.0),
                        "{:?} {}: {} != {}", family, symbol, back.value, original
                    );
                }
            }
        }
    }
}
