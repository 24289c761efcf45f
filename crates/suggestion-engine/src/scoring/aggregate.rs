use serde::{Deserialize, Serialize};

use super::category::CategoryAdjustment;
use super::components::{ComponentResult, HitLikelihoodDetail};
use super::weights::{self, ComponentKind, FINAL_SCORE};

/// Ordinal classification of a final score, lowest first so `Ord` follows quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Poor,
    Marginal,
    Viable,
    Good,
    Excellent,
    Perfect,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        weights::tier::THRESHOLDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::Poor)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Viable => "viable",
            Tier::Marginal => "marginal",
            Tier::Poor => "poor",
        }
    }
}

/// The six always-present component results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub base_relevance: ComponentResult,
    pub role_alignment: ComponentResult,
    pub axis_a: ComponentResult,
    pub axis_b: ComponentResult,
    pub tradeoff: ComponentResult,
    pub price: ComponentResult,
}

impl ScoreComponents {
    pub fn entries(&self) -> [(ComponentKind, &ComponentResult); 6] {
        [
            (ComponentKind::BaseRelevance, &self.base_relevance),
            (ComponentKind::RoleAlignment, &self.role_alignment),
            (ComponentKind::AxisA, &self.axis_a),
            (ComponentKind::AxisB, &self.axis_b),
            (ComponentKind::Tradeoff, &self.tradeoff),
            (ComponentKind::Price, &self.price),
        ]
    }

    pub fn sum(&self) -> i32 {
        self.entries()
            .iter()
            .map(|(_, result)| i32::from(result.score))
            .sum()
    }
}

/// Display-ready line for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentExplanation {
    pub component: ComponentKind,
    pub score: i16,
    pub explanation: String,
}

/// The engine's sole output for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: ScoreComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryAdjustment>,
    pub hit_detail: HitLikelihoodDetail,
    pub final_score: u8,
    pub tier: Tier,
    pub component_explanations: Vec<ComponentExplanation>,
}

/// Saturating sum of every component, clamped to the final score range.
pub(crate) fn aggregate(
    components: ScoreComponents,
    category: Option<CategoryAdjustment>,
    hit_detail: HitLikelihoodDetail,
) -> ScoreBreakdown {
    let category_score = category
        .as_ref()
        .map(|adjustment| i32::from(adjustment.adjustment))
        .unwrap_or(0);
    let total = components.sum() + category_score;
    let final_score = total.clamp(i32::from(FINAL_SCORE.min), i32::from(FINAL_SCORE.max)) as u8;

    let mut component_explanations: Vec<ComponentExplanation> = components
        .entries()
        .iter()
        .map(|(kind, result)| ComponentExplanation {
            component: *kind,
            score: result.score,
            explanation: result.explanation(),
        })
        .collect();

    if let Some(adjustment) = &category {
        component_explanations.push(ComponentExplanation {
            component: ComponentKind::Category,
            score: adjustment.adjustment,
            explanation: format!(
                "{} (confidence {:.1})",
                adjustment.explanation, adjustment.confidence
            ),
        });
    }

    ScoreBreakdown {
        components,
        category,
        hit_detail,
        final_score,
        tier: Tier::from_score(final_score),
        component_explanations,
    }
}
