use serde::{Deserialize, Serialize};

use super::ComponentResult;
use crate::scoring::domain::{
    Attribute, CharacterContext, ItemDescriptor, PlaystyleHint, RangeCategory, TraitProfile,
};
use crate::scoring::weights::{hit, ComponentKind};

/// Attack facts Axis B needs, derivable from an item or supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HitInput {
    pub attack_attribute: Attribute,
    pub traits: TraitProfile,
    pub range: Option<RangeCategory>,
}

impl HitInput {
    pub fn from_item(item: &ItemDescriptor) -> Self {
        Self {
            attack_attribute: item.primary_attribute(),
            traits: item.trait_profile(),
            range: item.range,
        }
    }
}

/// Sub-scores behind Axis B, kept so callers can see whether the unit clamp fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitLikelihoodDetail {
    pub attribute: i16,
    pub accuracy: i16,
    pub range: i16,
    pub raw_total: i16,
    pub clamped: bool,
}

pub(crate) fn score_hit_likelihood(
    input: &HitInput,
    character: &CharacterContext,
) -> (ComponentResult, HitLikelihoodDetail) {
    let mut breakdown = Vec::new();

    let (attribute, note) = attribute_alignment(input.attack_attribute, character);
    breakdown.push(note);

    let (accuracy, notes) = accuracy_traits(&input.traits, character);
    breakdown.extend(notes);

    let (range, note) = range_compatibility(input.range, character);
    breakdown.push(note);

    let detail = combine_sub_scores(attribute, accuracy, range);
    if detail.clamped {
        breakdown.push(format!(
            "hit likelihood clamped from {} to {}",
            detail.raw_total,
            ComponentKind::AxisB.cap().clamp(detail.raw_total)
        ));
    }

    let result = ComponentResult {
        score: ComponentKind::AxisB.cap().clamp(detail.raw_total),
        breakdown,
    };
    (result, detail)
}

/// Sums the three sub-scores and applies the Axis B cap once, to the total.
pub(crate) fn combine_sub_scores(attribute: i16, accuracy: i16, range: i16) -> HitLikelihoodDetail {
    let raw_total = attribute.saturating_add(accuracy).saturating_add(range);
    let clamped = ComponentKind::AxisB.cap().clamp(raw_total) != raw_total;
    HitLikelihoodDetail {
        attribute,
        accuracy,
        range,
        raw_total,
        clamped,
    }
}

fn attribute_alignment(primary: Attribute, character: &CharacterContext) -> (i16, String) {
    let (primary_mod, other_mod) = match (
        character.modifier(primary),
        character.modifier(primary.other()),
    ) {
        (Some(primary_mod), Some(other_mod)) => (primary_mod, other_mod),
        (None, None) => return (0, "no attribute data".to_string()),
        _ => return (0, "incomplete attribute data".to_string()),
    };

    let differential = i16::from(primary_mod) - i16::from(other_mod);
    let (score, label) = hit::ATTRIBUTE_STEPS
        .iter()
        .find(|(minimum, _, _)| differential >= *minimum)
        .map(|(_, score, label)| (*score, *label))
        .unwrap_or((hit::ATTRIBUTE_FLOOR, "strong disadvantage"));

    (
        score,
        format!(
            "{label}: {} {differential:+} over {}",
            primary.abbreviation(),
            primary.other().abbreviation()
        ),
    )
}

fn accuracy_traits(traits: &TraitProfile, character: &CharacterContext) -> (i16, Vec<String>) {
    let mut score = 0;
    let mut notes = Vec::new();

    if traits.accurate {
        score += hit::ACCURATE;
        notes.push("accurate trait".to_string());
    }
    if traits.inaccurate {
        score += hit::INACCURATE;
        notes.push("inaccurate trait".to_string());
    }
    if traits.autofire {
        if character.has_controller_role() {
            score += hit::AUTOFIRE_WITH_CONTROLLER;
            notes.push("autofire suits a controller".to_string());
        } else {
            score += hit::AUTOFIRE_WITHOUT_CONTROLLER;
            notes.push("autofire works against precise single-target play".to_string());
        }
    }

    (score, notes)
}

fn range_compatibility(range: Option<RangeCategory>, character: &CharacterContext) -> (i16, String) {
    use RangeCategory::*;

    let Some(range) = range else {
        return (0, "unknown range".to_string());
    };

    let melee = character.has_hint(PlaystyleHint::MeleePreferred);
    let ranged = character.has_hint(PlaystyleHint::RangedPreferred);

    let fit = match (melee, ranged) {
        (true, false) => match range {
            Melee => Fit::Preferred,
            Short => Fit::Acceptable,
            Medium | Long => Fit::Mismatch,
        },
        (false, true) => match range {
            Medium | Long => Fit::Preferred,
            Short => Fit::Acceptable,
            Melee => Fit::Mismatch,
        },
        _ => {
            if character.has_hint(PlaystyleHint::Mobile) {
                match range {
                    Melee | Short => Fit::Acceptable,
                    Medium => Fit::Neutral,
                    Long => Fit::Mismatch,
                }
            } else if character.has_hint(PlaystyleHint::Stationary) {
                match range {
                    Medium | Long => Fit::Acceptable,
                    Short => Fit::Neutral,
                    Melee => Fit::Mismatch,
                }
            } else {
                Fit::Neutral
            }
        }
    };

    let (score, label) = match fit {
        Fit::Preferred => (hit::RANGE_PREFERRED, "preferred"),
        Fit::Acceptable => (hit::RANGE_ACCEPTABLE, "acceptable"),
        Fit::Mismatch => (hit::RANGE_MISMATCH, "mismatched"),
        Fit::Neutral => (0, "neutral"),
    };
    (score, format!("{} range is {label}", range.label()))
}

enum Fit {
    Preferred,
    Acceptable,
    Mismatch,
    Neutral,
}
