//! # Catalog Reference Document
//!
//! Renders a registry as a markdown reference, grouped by category, so the
//! catalog can be reviewed without the browser.

use crate::equations::solvable_symbols;
use crate::registry::EquationRegistry;

/// Generate the markdown reference for every equation in `registry`.
///
/// # Example
///
/// ```rust
/// use eqref_core::equations::builtin_catalog;
/// use eqref_core::markdown::generate_catalog_markdown;
/// use eqref_core::registry::EquationRegistry;
///
/// let registry = EquationRegistry::new(builtin_catalog(10))?;
/// let markdown = generate_catalog_markdown(&registry);
/// assert!(markdown.contains("# Engineering Equations Reference"));
/// assert!(markdown.contains("## Fluid Mechanics"));
/// # Ok::<(), eqref_core::errors::EqRefError>(())
/// ```
pub fn generate_catalog_markdown(registry: &EquationRegistry) -> String {
    let mut output = String::with_capacity(4_000 + registry.len() * 1_500);

    output.push_str(
        r#"# Engineering Equations Reference

> **Auto-generated from the equation catalog. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

Each equation lists its formula, variables, constants (with where they come
from), the spreadsheet formula, solution steps and a worked example.

---

"#,
    );

    for category in registry.categories().iter().skip(1) {
        let equations = registry.list_equations(Some(category.as_str()), None);

        output.push_str(&format!("## {}\n\n", category));

        for eq in equations {
            output.push_str(&format!("### {}\n\n", eq.name));

            if !eq.subcategory.is_empty() {
                output.push_str(&format!("*{}* · `{}`\n\n", eq.subcategory, eq.id));
            }

            if !eq.description.is_empty() {
                output.push_str(&format!("{}\n\n", eq.description));
            }

            output.push_str(&format!("**Formula:** `{}`\n\n", eq.latex));

            if !eq.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Name | Units | Description |\n");
                output.push_str("|--------|------|-------|-------------|\n");
                for var in &eq.variables {
                    let unit = if var.unit.is_empty() { "-" } else { var.unit.as_str() };
                    output.push_str(&format!(
                        "| `{}` | {} | {} | {} |\n",
                        var.symbol, var.name, unit, var.description
                    ));
                }
                output.push('\n');
            }

            let constants: Vec<_> = eq.constants().collect();
            if !constants.is_empty() {
                output.push_str("**Constants:**\n\n");
                for var in constants {
                    let value = var.fixed_value().map(|v| v.to_string()).unwrap_or_default();
                    output.push_str(&format!("- `{}` = {} {}", var.symbol, value, var.unit).trim_end());
                    if let Some(derivation) = &var.constant_derivation {
                        output.push_str(&format!(": {}", derivation));
                    }
                    output.push('\n');
                }
                output.push('\n');
            }

            let solvable = eq.family.map(solvable_symbols).unwrap_or_default();
            if solvable.is_empty() {
                output.push_str("**Solvable for:** none (reference only)\n\n");
            } else {
                output.push_str(&format!("**Solvable for:** {}\n\n", solvable.join(", ")));
            }

            if !eq.excel_formula.is_empty() {
                output.push_str(&format!("**Spreadsheet:** `{}`\n\n", eq.excel_formula));
            }

            if !eq.steps.is_empty() {
                output.push_str("**Steps:**\n");
                for (i, step) in eq.steps.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, step));
                }
                output.push('\n');
            }

            if let Some(example) = &eq.example {
                output.push_str(&format!("**Example:** {} ⇒ {}\n\n", example.given, example.result));
            }

            output.push_str("---\n\n");
        }
    }

    let variable_count: usize = registry.all().iter().map(|eq| eq.variables.len()).sum();
    let constant_count: usize = registry.all().iter().map(|eq| eq.constants().count()).sum();

    output.push_str("## Statistics\n\n");
    output.push_str(&format!("- **Total Equations:** {}\n", registry.len()));
    output.push_str(&format!("- **Categories:** {}\n", registry.categories().len() - 1));
    output.push_str(&format!("- **Variables:** {}\n", variable_count));
    output.push_str(&format!("- **Constants:** {}\n", constant_count));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::builtin_catalog;

    #[test]
    fn test_generate_catalog_markdown() {
        let registry = EquationRegistry::new(builtin_catalog(10)).unwrap();
        let markdown = generate_catalog_markdown(&registry);

        assert!(markdown.contains("Auto-generated from the equation catalog"), "Missing auto-gen notice");

        // Every category
        assert!(markdown.contains("## Electrical Engineering"), "Missing Electrical Engineering");
        assert!(markdown.contains("## Signal Processing"), "Missing Signal Processing");
        assert!(!markdown.contains("## All"), "'All' is not a real category");

        // Equations with formulas
        assert!(markdown.contains("### Ohm's Law"), "Missing Ohm's Law");
        assert!(markdown.contains(r"`V = I \cdot R`"), "Missing Ohm's Law formula");

        // Constants with derivations
        assert!(markdown.contains("- `g` = 9.81 m/s²: Standard gravity"), "Missing gravity constant");

        // Solver coverage
        assert!(markdown.contains("**Solvable for:** h_L\n"), "Bernoulli solves the aggregate only");

        assert!(markdown.contains("- **Total Equations:** 10"), "Missing statistics");
        assert!(markdown.contains("- **Categories:** 6"), "Wrong category count");
    }

    #[test]
    fn test_empty_registry_markdown() {
        let markdown = generate_catalog_markdown(&EquationRegistry::empty());
        assert!(markdown.contains("- **Total Equations:** 0"));
        assert!(markdown.contains("- **Categories:** 0"));
    }
}
