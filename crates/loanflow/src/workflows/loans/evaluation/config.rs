use serde::{Deserialize, Serialize};

/// Eligibility policy with both threshold sets the evaluation exposes: the
/// detailed verdict rules and the coarse gate that decides whether scheme
/// matching runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub verdict: VerdictThresholds,
    pub gate: GateThresholds,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            verdict: VerdictThresholds::default(),
            gate: GateThresholds::default(),
        }
    }
}

/// Thresholds backing the detailed verdict rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    pub minimum_age: u8,
    pub maximum_age: u8,
    pub minimum_annual_income: f64,
    /// Requested amount may be at most this multiple of annual income before
    /// the verdict is downgraded.
    pub income_ratio_cap: f64,
    /// Below this credit score the verdict is at best conditional.
    pub cibil_floor: u16,
    /// Below this credit score the verdict is rejected outright.
    pub cibil_reject_below: u16,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            minimum_age: 21,
            maximum_age: 65,
            minimum_annual_income: 300_000.0,
            income_ratio_cap: 5.0,
            cibil_floor: 650,
            cibil_reject_below: 550,
        }
    }
}

/// Thresholds backing the coarse gate. Intentionally stricter than the
/// verdict set for the clear tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    pub clear_cibil: u16,
    pub clear_ratio_cap: f64,
    pub clear_minimum_income: f64,
    pub clear_employment: Vec<String>,
    pub conditional_cibil: u16,
    pub conditional_ratio_cap: f64,
    pub conditional_minimum_income: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            clear_cibil: 750,
            clear_ratio_cap: 5.0,
            clear_minimum_income: 300_000.0,
            clear_employment: vec!["Salaried".to_string(), "Self-employed".to_string()],
            conditional_cibil: 650,
            conditional_ratio_cap: 7.0,
            conditional_minimum_income: 200_000.0,
        }
    }
}
