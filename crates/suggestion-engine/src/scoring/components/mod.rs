pub(crate) mod hit;
pub(crate) mod impact;
pub(crate) mod price;
pub(crate) mod relevance;
pub(crate) mod role;
pub(crate) mod tradeoff;

pub use hit::{HitInput, HitLikelihoodDetail};
pub use impact::ImpactInput;

use serde::{Deserialize, Serialize};

use super::weights::ComponentKind;

/// Numeric contribution of one component plus the reasons behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentResult {
    pub score: i16,
    pub breakdown: Vec<String>,
}

impl ComponentResult {
    /// Clamps `raw` into the component's cap, noting the clamp only when it changed the value.
    pub(crate) fn bounded(kind: ComponentKind, raw: i16, mut breakdown: Vec<String>) -> Self {
        let score = kind.cap().clamp(raw);
        if score != raw {
            breakdown.push(format!("{} clamped from {raw} to {score}", kind.label()));
        }
        Self { score, breakdown }
    }

    /// One display line summarizing the breakdown.
    pub fn explanation(&self) -> String {
        if self.breakdown.is_empty() {
            "no signal".to_string()
        } else {
            self.breakdown.join("; ")
        }
    }
}
