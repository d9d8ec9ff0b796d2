//! # Authored Closed-Form Inverses
//!
//! Each equation family has a small, fixed, hand-authored set of inverses, one
//! per solvable symbol. The dispatch is a lookup table
//! `(family, symbol) -> fn(&Knowns) -> value`, built once on first use.
//!
//! Nothing here does algebra. A (family, symbol) pair without an entry has no
//! closed form, and the solver must say so rather than guess.
//!
//! ## Symbol spelling
//!
//! Catalog symbols arrive in several spellings (`\gamma` vs `γ`, `f_{max}` vs
//! `f_max`). Both the table keys and the known values go through
//! [`canonical_symbol`] so either spelling resolves to the same entry.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::family::{EquationFamily, ALL_FAMILIES};

/// Standard gravity, used when Bernoulli's `g` is not supplied (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Universal gas constant, used when the Ideal Gas `R` is not supplied (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Euler-Bernoulli constant for a centre point load on a simple span
pub const BEAM_CENTER_LOAD_FACTOR: f64 = 48.0;

/// Nyquist-Shannon sampling factor
pub const NYQUIST_FACTOR: f64 = 2.0;

/// √3 to full f64 precision; catalogs display it rounded as 1.732
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Why an authored inverse could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverseFailure {
    /// A required known value is absent (canonical symbol)
    Missing(&'static str),
    /// The inverse has no real solution for these inputs
    NoRealRoot,
}

/// An authored inverse: computes one variable from the known others.
pub type InverseFn = fn(&Knowns) -> Result<f64, InverseFailure>;

// ============================================================================
// Symbols
// ============================================================================

const GREEK: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("eta", "η"),
    ("theta", "θ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("phi", "φ"),
    ("omega", "ω"),
];

/// Normalize a symbol spelling.
///
/// Braces are dropped and a LaTeX Greek command becomes its character.
///
/// ```rust
/// use eqref_core::equations::canonical_symbol;
///
/// assert_eq!(canonical_symbol("\\gamma"), "γ");
/// assert_eq!(canonical_symbol("f_{max}"), "f_max");
/// assert_eq!(canonical_symbol(" R "), "R");
/// ```
pub fn canonical_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    let unbraced: String = trimmed.chars().filter(|c| *c != '{' && *c != '}').collect();

    if let Some(command) = unbraced.strip_prefix('\\') {
        if let Some((_, greek)) = GREEK.iter().find(|(name, _)| *name == command) {
            return (*greek).to_string();
        }
    }
    unbraced
}

// ============================================================================
// Known Values
// ============================================================================

/// Known values of one equation, keyed by canonical symbol.
#[derive(Debug, Clone, Default)]
pub struct Knowns {
    by_symbol: HashMap<String, f64>,
}

impl Knowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value under the canonical form of `symbol`
    pub fn insert(&mut self, symbol: &str, value: f64) {
        self.by_symbol.insert(canonical_symbol(symbol), value);
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.by_symbol.get(symbol).copied()
    }

    /// A value the inverse cannot do without
    pub fn require(&self, symbol: &'static str) -> Result<f64, InverseFailure> {
        self.get(symbol).ok_or(InverseFailure::Missing(symbol))
    }

    /// A physical constant that defaults when not supplied
    pub fn or_default(&self, symbol: &str, default: f64) -> f64 {
        self.get(symbol).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Knowns {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        let mut knowns = Knowns::new();
        for (symbol, value) in iter {
            knowns.insert(symbol, value);
        }
        knowns
    }
}

// ============================================================================
// Lookup Table
// ============================================================================

static INVERSES: Lazy<HashMap<(EquationFamily, String), InverseFn>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for family in ALL_FAMILIES {
        for (symbol, inverse) in authored(*family) {
            table.insert((*family, canonical_symbol(symbol)), *inverse);
        }
    }
    table
});

/// The authored inverse for `symbol` in `family`, if any
pub fn lookup(family: EquationFamily, symbol: &str) -> Option<InverseFn> {
    INVERSES.get(&(family, canonical_symbol(symbol))).copied()
}

/// Canonical symbols of the family that have an authored inverse
pub fn solvable_symbols(family: EquationFamily) -> Vec<&'static str> {
    authored(family).iter().map(|(symbol, _)| *symbol).collect()
}

/// Authored inverses per family. Adding a family forces an entry here.
fn authored(family: EquationFamily) -> &'static [(&'static str, InverseFn)] {
    match family {
        EquationFamily::OhmsLaw => OHMS_LAW,
        EquationFamily::PowerDissipation => POWER_DISSIPATION,
        EquationFamily::RcTimeConstant => RC_TIME_CONSTANT,
        EquationFamily::BernoulliHeadLoss => BERNOULLI_HEAD_LOSS,
        EquationFamily::ReynoldsNumber => REYNOLDS_NUMBER,
        EquationFamily::ThreePhasePower => THREE_PHASE_POWER,
        EquationFamily::CarnotEfficiency => CARNOT_EFFICIENCY,
        EquationFamily::IdealGasLaw => IDEAL_GAS_LAW,
        EquationFamily::BeamDeflection => BEAM_DEFLECTION,
        EquationFamily::NyquistFrequency => NYQUIST_FREQUENCY,
    }
}

const OHMS_LAW: &[(&str, InverseFn)] = &[
    ("V", ohms::voltage),
    ("I", ohms::current),
    ("R", ohms::resistance),
];

const POWER_DISSIPATION: &[(&str, InverseFn)] = &[
    ("P", power::power),
    ("I", power::current),
    ("R", power::resistance),
];

const RC_TIME_CONSTANT: &[(&str, InverseFn)] = &[
    ("τ", rc::time_constant),
    ("R", rc::resistance),
    ("C", rc::capacitance),
];

// Only the aggregate is authored; individual terms have no inverse.
const BERNOULLI_HEAD_LOSS: &[(&str, InverseFn)] = &[("h_L", bernoulli::head_loss)];

const REYNOLDS_NUMBER: &[(&str, InverseFn)] = &[
    ("Re", reynolds::reynolds_number),
    ("ρ", reynolds::density),
    ("v", reynolds::velocity),
    ("D", reynolds::diameter),
    ("μ", reynolds::viscosity),
];

// φ has no authored inverse.
const THREE_PHASE_POWER: &[(&str, InverseFn)] = &[
    ("P", three_phase::power),
    ("V_L", three_phase::line_voltage),
    ("I_L", three_phase::line_current),
];

const CARNOT_EFFICIENCY: &[(&str, InverseFn)] = &[
    ("η", carnot::efficiency),
    ("T_C", carnot::cold_temperature),
    ("T_H", carnot::hot_temperature),
];

const IDEAL_GAS_LAW: &[(&str, InverseFn)] = &[
    ("P", ideal_gas::pressure),
    ("V", ideal_gas::volume),
    ("n", ideal_gas::amount),
    ("T", ideal_gas::temperature),
];

const BEAM_DEFLECTION: &[(&str, InverseFn)] = &[
    ("δ", beam::deflection),
    ("F", beam::force),
    ("L", beam::length),
];

const NYQUIST_FREQUENCY: &[(&str, InverseFn)] = &[
    ("f_s", nyquist::sampling_frequency),
    ("f_max", nyquist::max_frequency),
];

// ============================================================================
// Families
// ============================================================================

mod ohms {
    use super::{InverseFailure, Knowns};

    pub fn voltage(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("I")? * k.require("R")?)
    }

    pub fn current(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("V")? / k.require("R")?)
    }

    pub fn resistance(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("V")? / k.require("I")?)
    }
}

mod power {
    use super::{InverseFailure, Knowns};

    pub fn power(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("I")?.powi(2) * k.require("R")?)
    }

    /// Positive root; a negative P/R yields NaN and is rejected upstream.
    pub fn current(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok((k.require("P")? / k.require("R")?).sqrt())
    }

    pub fn resistance(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("P")? / k.require("I")?.powi(2))
    }
}

mod rc {
    use super::{InverseFailure, Knowns};

    pub fn time_constant(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("R")? * k.require("C")?)
    }

    pub fn resistance(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("τ")? / k.require("C")?)
    }

    pub fn capacitance(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("τ")? / k.require("R")?)
    }
}

mod bernoulli {
    use super::{InverseFailure, Knowns, STANDARD_GRAVITY};

    /// h_L = h_1 - h_2, with h = P/γ + V²/2g + Z
    pub fn head_loss(k: &Knowns) -> Result<f64, InverseFailure> {
        let gamma = k.require("γ")?;
        let g = k.or_default("g", STANDARD_GRAVITY);

        let h1 = k.require("P_1")? / gamma + k.require("V_1")?.powi(2) / (2.0 * g) + k.require("Z_1")?;
        let h2 = k.require("P_2")? / gamma + k.require("V_2")?.powi(2) / (2.0 * g) + k.require("Z_2")?;
        Ok(h1 - h2)
    }
}

mod reynolds {
    use super::{InverseFailure, Knowns};

    pub fn reynolds_number(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("ρ")? * k.require("v")? * k.require("D")? / k.require("μ")?)
    }

    pub fn density(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("Re")? * k.require("μ")? / (k.require("v")? * k.require("D")?))
    }

    pub fn velocity(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("Re")? * k.require("μ")? / (k.require("ρ")? * k.require("D")?))
    }

    pub fn diameter(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("Re")? * k.require("μ")? / (k.require("ρ")? * k.require("v")?))
    }

    pub fn viscosity(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("ρ")? * k.require("v")? * k.require("D")? / k.require("Re")?)
    }
}

/// The catalog shows √3 as 1.732; these always use the full-precision constant.
mod three_phase {
    use super::{InverseFailure, Knowns, SQRT_3};

    pub fn power(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(SQRT_3 * k.require("V_L")? * k.require("I_L")? * k.require("φ")?.cos())
    }

    pub fn line_voltage(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("P")? / (SQRT_3 * k.require("I_L")? * k.require("φ")?.cos()))
    }

    pub fn line_current(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("P")? / (SQRT_3 * k.require("V_L")? * k.require("φ")?.cos()))
    }
}

mod carnot {
    use super::{InverseFailure, Knowns};

    pub fn efficiency(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(1.0 - k.require("T_C")? / k.require("T_H")?)
    }

    pub fn cold_temperature(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("T_H")? * (1.0 - k.require("η")?))
    }

    pub fn hot_temperature(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("T_C")? / (1.0 - k.require("η")?))
    }
}

mod ideal_gas {
    use super::{InverseFailure, Knowns, GAS_CONSTANT};

    fn gas_constant(k: &Knowns) -> f64 {
        k.or_default("R", GAS_CONSTANT)
    }

    pub fn pressure(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("n")? * gas_constant(k) * k.require("T")? / k.require("V")?)
    }

    pub fn volume(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("n")? * gas_constant(k) * k.require("T")? / k.require("P")?)
    }

    pub fn amount(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("P")? * k.require("V")? / (gas_constant(k) * k.require("T")?))
    }

    pub fn temperature(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("P")? * k.require("V")? / (k.require("n")? * gas_constant(k)))
    }
}

mod beam {
    use super::{InverseFailure, Knowns, BEAM_CENTER_LOAD_FACTOR};

    fn factor(k: &Knowns) -> f64 {
        k.or_default("48", BEAM_CENTER_LOAD_FACTOR)
    }

    pub fn deflection(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("F")? * k.require("L")?.powi(3) / (factor(k) * k.require("E")? * k.require("I")?))
    }

    pub fn force(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("δ")? * factor(k) * k.require("E")? * k.require("I")? / k.require("L")?.powi(3))
    }

    /// Real cube root of a non-negative radicand only.
    pub fn length(k: &Knowns) -> Result<f64, InverseFailure> {
        let radicand = k.require("δ")? * factor(k) * k.require("E")? * k.require("I")? / k.require("F")?;
        if radicand < 0.0 {
            return Err(InverseFailure::NoRealRoot);
        }
        Ok(radicand.cbrt())
    }
}

/// The inequality f_s ≥ 2·f_max is solved at its boundary.
mod nyquist {
    use super::{InverseFailure, Knowns, NYQUIST_FACTOR};

    pub fn sampling_frequency(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.or_default("2", NYQUIST_FACTOR) * k.require("f_max")?)
    }

    pub fn max_frequency(k: &Knowns) -> Result<f64, InverseFailure> {
        Ok(k.require("f_s")? / k.or_default("2", NYQUIST_FACTOR))
    }
}
