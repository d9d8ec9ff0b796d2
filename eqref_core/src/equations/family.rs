//! # Equation Families
//!
//! A family is a named physical relationship (e.g. Ohm's Law) with one fixed set
//! of variables and a fixed set of authored inverses. Catalog records carry the
//! family as a stable tag so the solver never dispatches on display names.

use serde::{Deserialize, Serialize};

/// All equation families known to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationFamily {
    /// V = I * R
    OhmsLaw,
    /// P = I^2 * R
    PowerDissipation,
    /// tau = R * C
    RcTimeConstant,
    /// h_L = (P1/gamma + V1^2/2g + Z1) - (P2/gamma + V2^2/2g + Z2)
    BernoulliHeadLoss,
    /// Re = rho * v * D / mu
    ReynoldsNumber,
    /// P = sqrt(3) * V_L * I_L * cos(phi)
    ThreePhasePower,
    /// eta = 1 - T_C / T_H
    CarnotEfficiency,
    /// P * V = n * R * T
    IdealGasLaw,
    /// delta = F * L^3 / (48 * E * I)
    BeamDeflection,
    /// f_s >= 2 * f_max, solved at the boundary
    NyquistFrequency,
}

/// All families, in builtin catalog order
pub static ALL_FAMILIES: &[EquationFamily] = &[
    EquationFamily::OhmsLaw,
    EquationFamily::PowerDissipation,
    EquationFamily::RcTimeConstant,
    EquationFamily::BernoulliHeadLoss,
    EquationFamily::ReynoldsNumber,
    EquationFamily::ThreePhasePower,
    EquationFamily::CarnotEfficiency,
    EquationFamily::IdealGasLaw,
    EquationFamily::BeamDeflection,
    EquationFamily::NyquistFrequency,
];

impl EquationFamily {
    /// Display name used for the family's base catalog entry
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationFamily::OhmsLaw => "Ohm's Law",
            EquationFamily::PowerDissipation => "Power Dissipation",
            EquationFamily::RcTimeConstant => "RC Time Constant",
            EquationFamily::BernoulliHeadLoss => "Bernoulli's Equation",
            EquationFamily::ReynoldsNumber => "Reynolds Number",
            EquationFamily::ThreePhasePower => "Three-Phase Power",
            EquationFamily::CarnotEfficiency => "Carnot Efficiency",
            EquationFamily::IdealGasLaw => "Ideal Gas Law",
            EquationFamily::BeamDeflection => "Beam Deflection",
            EquationFamily::NyquistFrequency => "Nyquist Frequency",
        }
    }

    /// Resolve a family from a catalog display name.
    ///
    /// Used once at load time for records that arrive without a family tag.
    /// A trailing `" (Variant N)"` suffix is ignored.
    ///
    /// ```rust
    /// use eqref_core::equations::EquationFamily;
    ///
    /// assert_eq!(EquationFamily::from_name("Ohm's Law (Variant 3)"), Some(EquationFamily::OhmsLaw));
    /// assert_eq!(EquationFamily::from_name("Hooke's Law"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<EquationFamily> {
        let base = strip_variant_suffix(name.trim());
        ALL_FAMILIES
            .iter()
            .copied()
            .find(|family| family.display_name().eq_ignore_ascii_case(base))
    }
}

impl std::fmt::Display for EquationFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn strip_variant_suffix(name: &str) -> &str {
    if let Some(open) = name.rfind(" (Variant ") {
        let tail = &name[open + " (Variant ".len()..];
        if let Some(number) = tail.strip_suffix(')') {
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                return &name[..open];
            }
        }
    }
    name
}
