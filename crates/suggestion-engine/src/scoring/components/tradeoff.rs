use super::ComponentResult;
use crate::scoring::domain::{Attribute, CharacterContext, CombatRole, PlaystyleHint, TraitProfile};
use crate::scoring::weights::impact::DamageBand;
use crate::scoring::weights::{tradeoff, ComponentKind};

/// Intermediate axis results the correction rules inspect.
pub(crate) struct TradeoffInput {
    pub(crate) axis_a: i16,
    pub(crate) band: Option<DamageBand>,
    pub(crate) axis_b: i16,
    pub(crate) traits: TraitProfile,
}

/// Fixes known pathological pairings; new failure modes get a rule here, not an axis reweight.
pub(crate) fn score_tradeoff(input: &TradeoffInput, character: &CharacterContext) -> ComponentResult {
    // Strength-gated rules need a known modifier; an absent one is no evidence either way.
    let strength = character.modifier(Attribute::Strength);
    let mut score = 0;
    let mut breakdown = Vec::new();

    if input.band >= Some(DamageBand::MediumHigh)
        && strength.is_some_and(|strength| strength <= tradeoff::LOW_STRENGTH)
        && character.has_hint(PlaystyleHint::Mobile)
    {
        score += tradeoff::HEAVY_FOR_MOBILE_BUILD;
        breakdown.push("high-impact item for a low-strength mobile build".to_string());
    }

    if input.band == Some(DamageBand::Low)
        && strength.is_some_and(|strength| strength >= tradeoff::HIGH_STRENGTH)
        && character.has_hint(PlaystyleHint::Stationary)
    {
        score += tradeoff::LIGHT_FOR_STATIONARY_BUILD;
        breakdown.push("light item wastes a strong stationary build".to_string());
    }

    if input.traits.inaccurate && character.primary_role == Some(CombatRole::Sniper) {
        score += tradeoff::INACCURATE_FOR_SNIPER;
        breakdown.push("inaccurate item for a sniper".to_string());
    }

    let axis_a = normalized(input.axis_a, ComponentKind::AxisA);
    let axis_b = normalized(input.axis_b, ComponentKind::AxisB);
    if axis_a >= tradeoff::SYNERGY_THRESHOLD && axis_b >= tradeoff::SYNERGY_THRESHOLD {
        score += tradeoff::DUAL_AXIS_SYNERGY;
        breakdown.push("strong synergy on impact and hit likelihood".to_string());
    }

    if breakdown.is_empty() {
        breakdown.push("no tradeoff corrections".to_string());
    }

    ComponentResult::bounded(ComponentKind::Tradeoff, score, breakdown)
}

fn normalized(score: i16, kind: ComponentKind) -> f32 {
    let max = kind.cap().max;
    if max <= 0 {
        return 0.0;
    }
    f32::from(score) / f32::from(max)
}
