//! Bounded additive scoring for equipment suggestions.
//!
//! Every component returns a capped `{score, breakdown}` pair; the aggregator sums
//! them and clamps the result to `0..=100` before mapping it to a [`Tier`]. Scores
//! are combined by saturating addition only, so each component stays explainable in
//! one line and no single signal can decide a ranking on its own.
//!
//! The engine is pure: identical inputs always produce an identical [`ScoreBreakdown`].

pub mod aggregate;
pub mod category;
pub mod components;
pub mod domain;
pub mod weights;

#[cfg(test)]
mod tests;

pub use aggregate::{ComponentExplanation, ScoreBreakdown, ScoreComponents, Tier};
pub use category::{
    partition, CategoryAdjustment, CategorySignal, MechanicalClassifier, PeerBaseline,
    PeerClassifier, PeerGroup,
};
pub use components::{ComponentResult, HitInput, HitLikelihoodDetail, ImpactInput};
pub use domain::{
    Attribute, CharacterContext, CombatRole, DamageExpression, DamageType, ItemDescriptor, ItemId,
    PlaystyleHint, PriceCategory, RangeCategory, TraitProfile,
};
pub use weights::{Cap, ComponentKind};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use aggregate::aggregate;
use components::hit::score_hit_likelihood;
use components::impact::score_impact;
use components::price::score_price;
use components::relevance::score_base_relevance;
use components::role::score_role_alignment;
use components::tradeoff::{score_tradeoff, TradeoffInput};

/// Per-call options for a single scoring request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreOptions<'a> {
    /// Role hint from a higher-level coordinator, used when the item carries no role.
    pub implied_role: Option<CombatRole>,
    /// Peer group for category normalization; `None` skips the category adjustment.
    pub peer_group: Option<PeerGroup<'a>>,
}

/// Options shared by every candidate in one ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    pub implied_role: Option<CombatRole>,
    pub category_normalization: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            implied_role: None,
            category_normalization: true,
        }
    }
}

/// One ranked entry produced by [`ScoringEngine::rank`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSuggestion {
    pub rank: usize,
    pub item_id: ItemId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_group: Option<String>,
    pub breakdown: ScoreBreakdown,
}

/// Stateless scorer; the only configurable piece is the peer-group classifier.
#[derive(Clone)]
pub struct ScoringEngine {
    classifier: Arc<dyn PeerClassifier>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine").finish_non_exhaustive()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::with_classifier(Arc::new(MechanicalClassifier))
    }

    pub fn with_classifier(classifier: Arc<dyn PeerClassifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &dyn PeerClassifier {
        self.classifier.as_ref()
    }

    /// Scores one candidate from explicit axis inputs.
    pub fn compute_score(
        &self,
        item: &ItemDescriptor,
        character: &CharacterContext,
        impact_input: &ImpactInput,
        hit_input: &HitInput,
        options: &ScoreOptions<'_>,
    ) -> ScoreBreakdown {
        let base_relevance = score_base_relevance(item, character);
        let item_role = item
            .role
            .filter(CombatRole::is_known)
            .or(options.implied_role);
        let role_alignment = score_role_alignment(item_role, character.primary_role);
        let impact = score_impact(impact_input, character);
        let (axis_b, hit_detail) = score_hit_likelihood(hit_input, character);
        let tradeoff = score_tradeoff(
            &TradeoffInput {
                axis_a: impact.result.score,
                band: impact.band,
                axis_b: axis_b.score,
                traits: hit_input.traits,
            },
            character,
        );
        let price = score_price(item);
        let category = options
            .peer_group
            .map(|group| category::normalize(item, group));

        let breakdown = aggregate(
            ScoreComponents {
                base_relevance,
                role_alignment,
                axis_a: impact.result,
                axis_b,
                tradeoff,
                price,
            },
            category,
            hit_detail,
        );

        tracing::debug!(
            item = %item.id,
            final_score = breakdown.final_score,
            tier = breakdown.tier.label(),
            "scored candidate"
        );

        breakdown
    }

    /// Scores one candidate, deriving both axis inputs from the item itself.
    pub fn score_item(
        &self,
        item: &ItemDescriptor,
        character: &CharacterContext,
        options: &ScoreOptions<'_>,
    ) -> ScoreBreakdown {
        let impact_input = ImpactInput::from_item(item);
        let hit_input = HitInput::from_item(item);
        self.compute_score(item, character, &impact_input, &hit_input, options)
    }

    /// One ranking pass: partition once, score every item, sort best first (ties by name).
    pub fn rank(
        &self,
        items: &[ItemDescriptor],
        character: &CharacterContext,
        options: &RankingOptions,
    ) -> Vec<RankedSuggestion> {
        let groups = if options.category_normalization {
            partition(items, self.classifier())
        } else {
            Default::default()
        };
        let membership: HashMap<&ItemId, &str> = groups
            .iter()
            .flat_map(|(name, members)| {
                members
                    .iter()
                    .map(move |member| (&member.id, name.as_str()))
            })
            .collect();

        let mut ranked: Vec<RankedSuggestion> = items
            .iter()
            .map(|item| {
                let peer_group = membership
                    .get(&item.id)
                    .and_then(|name| groups.get(*name).map(|members| PeerGroup::new(*name, members)));
                let breakdown = self.score_item(
                    item,
                    character,
                    &ScoreOptions {
                        implied_role: options.implied_role,
                        peer_group,
                    },
                );
                RankedSuggestion {
                    rank: 0,
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    peer_group: peer_group.map(|group| group.name.to_string()),
                    breakdown,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.breakdown
                .final_score
                .cmp(&a.breakdown.final_score)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        for (index, entry) in ranked.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        tracing::info!(
            candidates = ranked.len(),
            peer_groups = groups.len(),
            "ranking pass complete"
        );

        ranked
    }
}
