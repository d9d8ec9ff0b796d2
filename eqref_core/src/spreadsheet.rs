//! # Spreadsheet Formulas
//!
//! Rewrites an equation's spreadsheet formula template so it points at the
//! cells the user actually keeps each variable in. Pure text substitution; the
//! formula is never evaluated.
//!
//! ## Tokens
//!
//! A cell reference is a maximal run of ASCII letters followed by a run of
//! digits (`C1`, `AB12`), not preceded by a letter, digit or `_`. Everything
//! else is copied through untouched, so:
//!
//! - `C1` never matches inside `C10`
//! - function names (`COS(`) and numeric literals (`1.732`, `9.81`) are left alone
//! - a substituted cell is never substituted again (single left-to-right pass)
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use eqref_core::equations::builtin_catalog;
//! use eqref_core::spreadsheet::render_formula_template;
//!
//! let catalog = builtin_catalog(1);
//! let ohms = &catalog[0];
//!
//! let mut cells = HashMap::new();
//! cells.insert("I".to_string(), "B7".to_string());
//!
//! let formula = render_formula_template(&ohms.excel_formula, &ohms.variables, &cells);
//! assert_eq!(formula, "=B7*C3");
//! ```

use std::collections::HashMap;

use crate::equations::{EquationDefinition, VariableSpec};

/// Substitute cell references in `template`.
///
/// `assignments` is keyed by variable id or symbol (id wins). A blank
/// assignment keeps the default cell.
pub fn render_formula_template(
    template: &str,
    variables: &[VariableSpec],
    assignments: &HashMap<String, String>,
) -> String {
    // default cell -> replacement
    let mut replacements: HashMap<String, &str> = HashMap::new();
    for (index, var) in variables.iter().enumerate() {
        let default = var.default_cell.clone().unwrap_or_else(|| format!("C{}", index + 1));
        let assigned = assignments
            .get(&var.id)
            .or_else(|| assignments.get(&var.symbol))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty());
        if let Some(cell) = assigned {
            replacements.insert(default.to_ascii_uppercase(), cell);
        }
    }

    if replacements.is_empty() {
        return template.to_string();
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut prev: Option<char> = None;

    while let Some(ch) = rest.chars().next() {
        let boundary = !prev.is_some_and(|p| p.is_alphanumeric() || p == '_');
        if boundary && ch.is_ascii_alphabetic() {
            if let Some(len) = cell_token_len(rest) {
                let token = &rest[..len];
                match replacements.get(&token.to_ascii_uppercase()) {
                    Some(cell) => output.push_str(cell),
                    None => output.push_str(token),
                }
                prev = token.chars().last();
                rest = &rest[len..];
                continue;
            }
        }

        output.push(ch);
        prev = Some(ch);
        rest = &rest[ch.len_utf8()..];
    }

    output
}

/// Length of the cell reference at the start of `text`, if there is one.
///
/// Letters then digits, and the run must not continue into a letter, digit
/// or `_` (so `C1` is not a token inside `C1X` or `C1_`).
fn cell_token_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let letters = bytes.iter().take_while(|b| b.is_ascii_alphabetic()).count();
    let digits = bytes[letters..].iter().take_while(|b| b.is_ascii_digit()).count();
    if letters == 0 || digits == 0 {
        return None;
    }

    let end = letters + digits;
    match text[end..].chars().next() {
        Some(next) if next.is_alphanumeric() || next == '_' => None,
        _ => Some(end),
    }
}

impl EquationDefinition {
    /// This equation's spreadsheet formula with user cell assignments applied
    pub fn render_formula(&self, assignments: &HashMap<String, String>) -> String {
        render_formula_template(&self.excel_formula, &self.variables, assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{builtin_catalog, EquationFamily, ALL_FAMILIES};

    fn cells(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn equation(family: EquationFamily) -> EquationDefinition {
        let index = ALL_FAMILIES.iter().position(|f| *f == family).unwrap();
        builtin_catalog(ALL_FAMILIES.len()).swap_remove(index)
    }

    fn vars(n: usize) -> Vec<VariableSpec> {
        (0..n)
            .map(|i| VariableSpec::new(format!("x{}", i + 1), "x", "", "").with_id(format!("x{}", i + 1)))
            .collect()
    }

    #[test]
    fn test_no_assignments_keeps_template() {
        let eq = equation(EquationFamily::BeamDeflection);
        assert_eq!(eq.render_formula(&HashMap::new()), "=(C2*C3^3)/(48*C5*C6)");
    }

    #[test]
    fn test_c1_does_not_match_inside_c10() {
        let template = "=C1+C10";
        let out = render_formula_template(template, &vars(10), &cells(&[("x1", "Z9")]));
        assert_eq!(out, "=Z9+C10");

        let out = render_formula_template(template, &vars(10), &cells(&[("x10", "B2")]));
        assert_eq!(out, "=C1+B2");
    }

    #[test]
    fn test_no_re_substitution() {
        // C2 -> C3 and C3 -> C4 must not chain into C2 -> C4
        let out = render_formula_template("=C2*C3", &vars(3), &cells(&[("x2", "C3"), ("x3", "C4")]));
        assert_eq!(out, "=C3*C4");
    }

    #[test]
    fn test_function_names_and_literals_untouched() {
        let eq = equation(EquationFamily::ThreePhasePower);
        let out = eq.render_formula(&cells(&[("V_L", "D3"), (r"\phi", "E5")]));
        assert_eq!(out, "=1.732*D3*C4*COS(E5)");

        let eq = equation(EquationFamily::BernoulliHeadLoss);
        let out = eq.render_formula(&cells(&[(r"\gamma", "G1")]));
        assert_eq!(out, "=(C1/G1+C3^2/(2*9.81)+C5)-(C2/G1+C4^2/(2*9.81)+C6)");
    }

    #[test]
    fn test_assignment_by_id_wins_over_symbol() {
        let eq = equation(EquationFamily::OhmsLaw);
        let id = eq.variable_by_symbol("R").unwrap().id.clone();
        let out = eq.render_formula(&cells(&[("R", "A1"), (id.as_str(), "B1")]));
        assert_eq!(out, "=C2*B1");
    }

    #[test]
    fn test_blank_assignment_keeps_default() {
        let eq = equation(EquationFamily::OhmsLaw);
        let out = eq.render_formula(&cells(&[("I", "  "), ("R", " F4 ")]));
        assert_eq!(out, "=C2*F4");
    }

    #[test]
    fn test_token_boundaries() {
        let vars = vars(2);
        let assign = cells(&[("x1", "Q1")]);
        assert_eq!(render_formula_template("=SUM(C1:C2)", &vars, &assign), "=SUM(Q1:C2)");
        assert_eq!(render_formula_template("=C1_X+XC1+C1", &vars, &assign), "=C1_X+XC1+Q1");
        assert_eq!(render_formula_template("=c1*2", &vars, &assign), "=Q1*2");
        assert_eq!(render_formula_template("=LOG10(C1)", &vars, &assign), "=LOG10(Q1)");
    }
}
