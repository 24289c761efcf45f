use serde::{Deserialize, Serialize};

use super::ComponentResult;
use crate::scoring::domain::{CharacterContext, DamageType, ItemDescriptor, PlaystyleHint};
use crate::scoring::weights::impact::{self, DamageBand};
use crate::scoring::weights::ComponentKind;

/// Damage facts Axis A needs, derivable from an item or supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactInput {
    pub average_damage: f32,
    pub damage_type: Option<DamageType>,
    pub area_effect: bool,
}

impl ImpactInput {
    pub fn from_item(item: &ItemDescriptor) -> Self {
        Self {
            average_damage: item.average_damage(),
            damage_type: item.damage_type,
            area_effect: item.trait_profile().area,
        }
    }
}

/// Axis A result plus the band it landed in, which the tradeoff rules inspect.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImpactScore {
    pub(crate) result: ComponentResult,
    pub(crate) band: Option<DamageBand>,
}

pub(crate) fn band_for(average_damage: f32) -> Option<(DamageBand, i16)> {
    if !average_damage.is_finite() || average_damage <= 0.0 {
        return None;
    }
    impact::BANDS
        .iter()
        .find(|(_, upper, _)| average_damage < *upper)
        .map(|(band, _, score)| (*band, *score))
}

pub(crate) fn score_impact(input: &ImpactInput, character: &CharacterContext) -> ImpactScore {
    let Some((band, band_score)) = band_for(input.average_damage) else {
        return ImpactScore {
            result: ComponentResult {
                score: 0,
                breakdown: vec!["no damage profile".to_string()],
            },
            band: None,
        };
    };

    let mut breakdown = vec![format!(
        "{} damage band (avg {:.1})",
        band.label(),
        input.average_damage
    )];
    let mut score = band_score;

    if input.area_effect && !character.has_controller_role() {
        score += impact::AREA_WITHOUT_CONTROLLER;
        breakdown.push("area effect without a controller role".to_string());
    }

    match input.damage_type {
        Some(DamageType::Stun) if character.has_hint(PlaystyleHint::Lethal) => {
            score += impact::STUN_FOR_LETHAL_BUILD;
            breakdown.push("stun damage for a lethal build".to_string());
        }
        Some(kind) if kind.is_exotic() && !character.has_feat_mentioning(kind.label()) => {
            score += impact::UNSUPPORTED_EXOTIC_DAMAGE;
            breakdown.push(format!("{} damage without a supporting feat", kind.label()));
        }
        _ => {}
    }

    // Raw impact is never actively bad, so dampening floors at zero.
    let cap = ComponentKind::AxisA.cap();
    let score = score.clamp(cap.min, band_score.min(cap.max));

    ImpactScore {
        result: ComponentResult { score, breakdown },
        band: Some(band),
    }
}
