//! # Builtin Catalog
//!
//! The locally generated catalog: one authored template per [`EquationFamily`],
//! cycled to fill a catalog of any size. It stands in for the remote provider
//! when that is unavailable.
//!
//! ```rust
//! use eqref_core::equations::builtin_catalog;
//!
//! let equations = builtin_catalog(12);
//! assert_eq!(equations[0].id, "eq_1");
//! assert_eq!(equations[0].name, "Ohm's Law");
//! assert_eq!(equations[10].name, "Ohm's Law (Variant 2)");
//! ```

use super::definition::{EquationDefinition, VariableSpec, WorkedExample};
use super::family::{EquationFamily, ALL_FAMILIES};

/// Default size of the builtin catalog
pub const DEFAULT_BUILTIN_COUNT: usize = 100;

/// Generate `count` equations, cycling through the family templates.
///
/// - ids are `eq_1 ..= eq_count`
/// - the first pass keeps the family name; later passes append `" (Variant k)"`
/// - variable ids are `<NameChars>_<SymbolChars>_<index>`, unique across the catalog
pub fn builtin_catalog(count: usize) -> Vec<EquationDefinition> {
    (0..count)
        .map(|i| {
            let family = ALL_FAMILIES[i % ALL_FAMILIES.len()];
            let mut equation = template(family);
            let base_name = equation.name.clone();

            equation.id = format!("eq_{}", i + 1);
            if i >= ALL_FAMILIES.len() {
                equation.name = format!("{} (Variant {})", base_name, i / ALL_FAMILIES.len() + 1);
            }
            for var in &mut equation.variables {
                var.id = format!("{}_{}_{}", id_chars(&base_name), id_chars(&var.symbol), i);
            }
            equation
        })
        .collect()
}

/// Keep letters and digits (any script) so Greek symbols stay distinct.
fn id_chars(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// The authored template for a family, without ids.
pub fn template(family: EquationFamily) -> EquationDefinition {
    let name = family.display_name().to_string();
    match family {
        EquationFamily::OhmsLaw => EquationDefinition {
            id: String::new(),
            name,
            category: "Electrical Engineering".to_string(),
            subcategory: "Basic Circuits".to_string(),
            description: "Fundamental relationship between voltage, current, and resistance in an electrical circuit.".to_string(),
            latex: r"V = I \cdot R".to_string(),
            variables: vec![
                VariableSpec::new("V", "Voltage", "V", "Electric potential difference across the resistor").with_cell("C1"),
                VariableSpec::new("I", "Current", "A", "Electric current flowing through the resistor").with_cell("C2"),
                VariableSpec::new("R", "Resistance", "Ω", "Electrical resistance of the component").with_cell("C3"),
            ],
            result_var: "V".to_string(),
            excel_formula: "=C2*C3".to_string(),
            steps: steps(&[
                "Multiply current (I) by resistance (R)",
                "The result is voltage (V) in volts",
            ]),
            example: Some(WorkedExample::new("I = 2 A, R = 100 Ω", "V = 200 V")),
            family: Some(family),
        },

        EquationFamily::PowerDissipation => EquationDefinition {
            id: String::new(),
            name,
            category: "Electrical Engineering".to_string(),
            subcategory: "Power".to_string(),
            description: "Power dissipated in a resistive element.".to_string(),
            latex: r"P = I^2 \cdot R".to_string(),
            variables: vec![
                VariableSpec::new("P", "Power", "W", "Power dissipated as heat").with_cell("C1"),
                VariableSpec::new("I", "Current", "A", "Electric current through the resistor").with_cell("C2"),
                VariableSpec::new("R", "Resistance", "Ω", "Electrical resistance").with_cell("C3"),
            ],
            result_var: "P".to_string(),
            excel_formula: "=C2^2*C3".to_string(),
            steps: steps(&[
                "Square the current: I²",
                "Multiply by resistance: I² × R",
                "Result is power in watts",
            ]),
            example: Some(WorkedExample::new("I = 2 A, R = 50 Ω", "P = 200 W")),
            family: Some(family),
        },

        EquationFamily::RcTimeConstant => EquationDefinition {
            id: String::new(),
            name,
            category: "Electrical Engineering".to_string(),
            subcategory: "Circuits".to_string(),
            description: "Time constant for RC circuits determining charging/discharging rate.".to_string(),
            latex: r"\tau = R \cdot C".to_string(),
            variables: vec![
                VariableSpec::new("τ", "Time Constant", "s", "Time to charge to 63.2% of final value").with_cell("C1"),
                VariableSpec::new("R", "Resistance", "Ω", "Circuit resistance").with_cell("C2"),
                VariableSpec::new("C", "Capacitance", "F", "Circuit capacitance").with_cell("C3"),
            ],
            result_var: "τ".to_string(),
            excel_formula: "=C2*C3".to_string(),
            steps: steps(&[
                "Multiply resistance (R) by capacitance (C)",
                "Result is time constant in seconds",
            ]),
            example: Some(WorkedExample::new("R = 10 kΩ, C = 100 µF", "τ = 1 s")),
            family: Some(family),
        },

        EquationFamily::BernoulliHeadLoss => EquationDefinition {
            id: String::new(),
            name,
            category: "Fluid Mechanics".to_string(),
            subcategory: "Flow".to_string(),
            description: "Conservation of energy in flowing fluids - Head loss between points 1 and 2.".to_string(),
            latex: r"h_L = \left(\frac{P_1}{\gamma} + \frac{V_1^2}{2g} + Z_1\right) - \left(\frac{P_2}{\gamma} + \frac{V_2^2}{2g} + Z_2\right)".to_string(),
            variables: vec![
                VariableSpec::new("P_1", "Upstream pressure", "Pa", "Static pressure at point 1").with_cell("C1"),
                VariableSpec::new("P_2", "Downstream pressure", "Pa", "Static pressure at point 2").with_cell("C2"),
                VariableSpec::new("V_1", "Upstream velocity", "m/s", "Flow velocity at point 1").with_cell("C3"),
                VariableSpec::new("V_2", "Downstream velocity", "m/s", "Flow velocity at point 2").with_cell("C4"),
                VariableSpec::new("Z_1", "Upstream elevation", "m", "Elevation at point 1").with_cell("C5"),
                VariableSpec::new("Z_2", "Downstream elevation", "m", "Elevation at point 2").with_cell("C6"),
                VariableSpec::new(r"\gamma", "Specific weight", "N/m³", "Fluid specific weight").with_cell("C7"),
                VariableSpec::constant(
                    "g",
                    "Gravity",
                    "m/s²",
                    "Gravitational acceleration",
                    9.81,
                    "Standard gravity at Earth's surface. Derived from Newton's law of universal gravitation: \
                     g = GM/R² where G is gravitational constant (6.674×10⁻¹¹ m³/kg·s²), M is Earth's mass \
                     (5.972×10²⁴ kg), and R is Earth's radius (6.371×10⁶ m).",
                )
                .with_cell("C8"),
                VariableSpec::new("h_L", "Head loss", "m", "Energy head lost between points 1 and 2").with_cell("C9"),
            ],
            result_var: "h_L".to_string(),
            excel_formula: "=(C1/C7+C3^2/(2*9.81)+C5)-(C2/C7+C4^2/(2*9.81)+C6)".to_string(),
            steps: steps(&[
                "Compute the upstream energy head: h₁ = P₁/γ + V₁²/(2g) + Z₁",
                "Compute the downstream energy head: h₂ = P₂/γ + V₂²/(2g) + Z₂",
                "Subtract: h_L = h₁ - h₂ to get the head loss between the two sections",
            ]),
            example: Some(WorkedExample::new(
                "P₁ = 200 kPa, P₂ = 150 kPa, V₁ = 3 m/s, V₂ = 2 m/s, Z₁ = 10 m, Z₂ = 6 m, γ = 9810 N/m³, g = 9.81 m/s²",
                "h_L ≈ 9.35 m of fluid",
            )),
            family: Some(family),
        },

        EquationFamily::ReynoldsNumber => EquationDefinition {
            id: String::new(),
            name,
            category: "Fluid Mechanics".to_string(),
            subcategory: "Dimensionless Numbers".to_string(),
            description: "Ratio of inertial forces to viscous forces, predicting flow regime.".to_string(),
            latex: r"Re = \frac{\rho v D}{\mu}".to_string(),
            variables: vec![
                VariableSpec::new("Re", "Reynolds Number", "", "Dimensionless parameter indicating turbulence").with_cell("C1"),
                VariableSpec::new("ρ", "Density", "kg/m³", "Fluid density").with_cell("C2"),
                VariableSpec::new("v", "Velocity", "m/s", "Characteristic velocity").with_cell("C3"),
                VariableSpec::new("D", "Diameter", "m", "Characteristic length (pipe diameter)").with_cell("C4"),
                VariableSpec::new("μ", "Viscosity", "Pa·s", "Dynamic viscosity").with_cell("C5"),
            ],
            result_var: "Re".to_string(),
            excel_formula: "=(C2*C3*C4)/C5".to_string(),
            steps: steps(&[
                "Multiply density (ρ) × velocity (v) × diameter (D)",
                "Divide by dynamic viscosity (μ)",
                "Result is dimensionless Reynolds number",
            ]),
            example: Some(WorkedExample::new(
                "ρ = 1000 kg/m³, v = 2 m/s, D = 0.1 m, μ = 0.001 Pa·s",
                "Re = 200,000 (turbulent flow)",
            )),
            family: Some(family),
        },

        EquationFamily::ThreePhasePower => EquationDefinition {
            id: String::new(),
            name,
            category: "Power Systems".to_string(),
            subcategory: "AC Power".to_string(),
            description: "Real power in balanced three-phase systems.".to_string(),
            latex: r"P = \sqrt{3} \cdot V_L \cdot I_L \cdot \cos(\phi)".to_string(),
            variables: vec![
                VariableSpec::new("P", "Real Power", "W", "Total three-phase real power").with_cell("C1"),
                VariableSpec::constant(
                    r"\sqrt{3}",
                    "Three-phase factor",
                    "",
                    "Geometric relationship between line and phase quantities",
                    1.732,
                    "Square root of 3 (≈1.732) appears in three-phase calculations due to the geometric \
                     relationship between line and phase quantities. In a balanced three-phase system, line \
                     voltage = √3 × phase voltage. This factor comes from vector addition of three 120° \
                     displaced phasors.",
                )
                .with_cell("C2"),
                VariableSpec::new("V_L", "Line Voltage", "V", "RMS line-to-line voltage").with_cell("C3"),
                VariableSpec::new("I_L", "Line Current", "A", "RMS line current").with_cell("C4"),
                VariableSpec::new(r"\phi", "Phase Angle", "rad", "Angle between voltage and current").with_cell("C5"),
            ],
            result_var: "P".to_string(),
            excel_formula: "=1.732*C3*C4*COS(C5)".to_string(),
            steps: steps(&[
                "Multiply √3 × VL × IL × cos(φ)",
                "Result is total three-phase real power in watts",
            ]),
            example: Some(WorkedExample::new("VL = 400 V, IL = 10 A, φ = 0.2 rad", "P ≈ 6790 W")),
            family: Some(family),
        },

        EquationFamily::CarnotEfficiency => EquationDefinition {
            id: String::new(),
            name,
            category: "Thermodynamics".to_string(),
            subcategory: "Heat Engines".to_string(),
            description: "Maximum theoretical efficiency of a heat engine.".to_string(),
            latex: r"\eta = 1 - \frac{T_C}{T_H}".to_string(),
            variables: vec![
                VariableSpec::new("η", "Efficiency", "", "Thermal efficiency (0 to 1)").with_cell("C1"),
                VariableSpec::new("T_C", "Cold Temperature", "K", "Absolute temperature of cold reservoir").with_cell("C2"),
                VariableSpec::new("T_H", "Hot Temperature", "K", "Absolute temperature of hot reservoir").with_cell("C3"),
            ],
            result_var: "η".to_string(),
            excel_formula: "=1-C2/C3".to_string(),
            steps: steps(&[
                "Divide cold temperature by hot temperature: TC/TH",
                "Subtract from 1: η = 1 - TC/TH",
                "Result is efficiency (0 to 1, or multiply by 100 for %)",
            ]),
            example: Some(WorkedExample::new("TC = 300 K, TH = 600 K", "η = 0.5 (50% efficiency)")),
            family: Some(family),
        },

        EquationFamily::IdealGasLaw => EquationDefinition {
            id: String::new(),
            name,
            category: "Thermodynamics".to_string(),
            subcategory: "Gas Properties".to_string(),
            description: "Equation of state for an ideal gas.".to_string(),
            latex: "PV = nRT".to_string(),
            variables: vec![
                VariableSpec::new("P", "Pressure", "Pa", "Absolute pressure of the gas").with_cell("C1"),
                VariableSpec::new("V", "Volume", "m³", "Volume occupied by gas").with_cell("C2"),
                VariableSpec::new("n", "Amount", "mol", "Number of moles of gas").with_cell("C3"),
                VariableSpec::constant(
                    "R",
                    "Gas Constant",
                    "J/(mol·K)",
                    "Universal gas constant",
                    8.314,
                    "Universal gas constant derived from Boltzmann constant (k = 1.381×10⁻²³ J/K) and \
                     Avogadro's number (NA = 6.022×10²³ mol⁻¹): R = k × NA = 8.314 J/(mol·K). Fundamental \
                     constant relating energy, temperature, and amount of substance.",
                )
                .with_cell("C4"),
                VariableSpec::new("T", "Temperature", "K", "Absolute temperature").with_cell("C5"),
            ],
            result_var: "P".to_string(),
            excel_formula: "=(C3*8.314*C5)/C2".to_string(),
            steps: steps(&["Multiply n × R × T", "Divide by V", "Result is pressure P in pascals"]),
            example: Some(WorkedExample::new(
                "n = 1 mol, R = 8.314 J/(mol·K), T = 273 K, V = 0.0224 m³",
                "P ≈ 101,325 Pa (1 atm)",
            )),
            family: Some(family),
        },

        EquationFamily::BeamDeflection => EquationDefinition {
            id: String::new(),
            name,
            category: "Structural Analysis".to_string(),
            subcategory: "Beams".to_string(),
            description: "Maximum deflection of a simply supported beam with center load.".to_string(),
            latex: r"\delta = \frac{FL^3}{48EI}".to_string(),
            variables: vec![
                VariableSpec::new("δ", "Deflection", "m", "Maximum vertical displacement").with_cell("C1"),
                VariableSpec::new("F", "Force", "N", "Applied load at center").with_cell("C2"),
                VariableSpec::new("L", "Length", "m", "Beam span length").with_cell("C3"),
                VariableSpec::constant(
                    "48",
                    "Beam constant",
                    "",
                    "Integration constant from Euler-Bernoulli theory",
                    48.0,
                    "The constant 48 comes from integrating the bending moment equation twice for a simply \
                     supported beam with central point load. From Euler-Bernoulli beam theory: M(x) = F×x/2 \
                     for 0<x<L/2. Double integration with boundary conditions yields δmax = FL³/48EI at \
                     center (x=L/2).",
                )
                .with_cell("C4"),
                VariableSpec::new("E", "Young's Modulus", "Pa", "Material elastic modulus").with_cell("C5"),
                VariableSpec::new("I", "Moment of Inertia", "m⁴", "Second moment of area").with_cell("C6"),
            ],
            result_var: "δ".to_string(),
            excel_formula: "=(C2*C3^3)/(48*C5*C6)".to_string(),
            steps: steps(&[
                "Cube the beam length: L³",
                "Multiply by force: F × L³",
                "Divide by 48 × E × I",
                "Result is maximum deflection at center",
            ]),
            example: Some(WorkedExample::new(
                "F = 1000 N, L = 3 m, E = 200 GPa, I = 8.33e-6 m⁴",
                "δ ≈ 0.00034 m (0.34 mm)",
            )),
            family: Some(family),
        },

        EquationFamily::NyquistFrequency => EquationDefinition {
            id: String::new(),
            name,
            category: "Signal Processing".to_string(),
            subcategory: "Sampling".to_string(),
            description: "Minimum sampling rate to avoid aliasing.".to_string(),
            latex: r"f_s \geq 2f_{max}".to_string(),
            variables: vec![
                VariableSpec::new("f_s", "Sampling Frequency", "Hz", "Rate at which signal is sampled").with_cell("C1"),
                VariableSpec::constant(
                    "2",
                    "Nyquist factor",
                    "",
                    "Sampling theorem multiplier",
                    2.0,
                    "Nyquist-Shannon sampling theorem states that a signal must be sampled at twice its \
                     highest frequency component to perfectly reconstruct it. Proven by Harry Nyquist (1928) \
                     and Claude Shannon (1949).",
                )
                .with_cell("C2"),
                VariableSpec::new("f_{max}", "Maximum Frequency", "Hz", "Highest frequency in signal").with_cell("C3"),
            ],
            result_var: "f_s".to_string(),
            excel_formula: "=2*C3".to_string(),
            steps: steps(&[
                "Double the maximum frequency: 2 × fmax",
                "Result is minimum sampling frequency to avoid aliasing",
            ]),
            example: Some(WorkedExample::new("fmax = 1000 Hz", "fs = 2000 Hz (minimum)")),
            family: Some(family),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_size_and_ids() {
        let equations = builtin_catalog(DEFAULT_BUILTIN_COUNT);
        assert_eq!(equations.len(), 100);
        assert_eq!(equations[99].id, "eq_100");
        assert_eq!(equations[99].name, "Nyquist Frequency (Variant 10)");
    }

    #[test]
    fn test_every_template_validates() {
        for equation in builtin_catalog(ALL_FAMILIES.len()) {
            equation
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", equation.name, e));
            assert!(
                equation.result_variable().is_some(),
                "{} does not list its result variable",
                equation.name
            );
        }
    }

    #[test]
    fn test_variable_ids_unique_across_catalog() {
        let equations = builtin_catalog(30);
        let mut seen = HashSet::new();
        for var in equations.iter().flat_map(|eq| eq.variables.iter()) {
            assert!(seen.insert(var.id.clone()), "duplicate variable id {}", var.id);
        }
    }

    #[test]
    fn test_greek_symbols_keep_distinct_ids() {
        let equations = builtin_catalog(ALL_FAMILIES.len());
        let reynolds = &equations[4];
        assert_eq!(reynolds.variable_by_symbol("ρ").unwrap().id, "ReynoldsNumber_ρ_4");
        assert_eq!(reynolds.variable_by_symbol("μ").unwrap().id, "ReynoldsNumber_μ_4");
    }

    #[test]
    fn test_empty_catalog() {
        assert!(builtin_catalog(0).is_empty());
    }
}
