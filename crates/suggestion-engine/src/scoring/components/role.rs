use super::ComponentResult;
use crate::scoring::domain::CombatRole;
use crate::scoring::weights::{role, ComponentKind};

/// Compares the item's role (or the implied-role hint) against the character's primary role.
pub(crate) fn score_role_alignment(
    item_role: Option<CombatRole>,
    character_role: Option<CombatRole>,
) -> ComponentResult {
    let item_role = item_role.filter(CombatRole::is_known);
    let character_role = character_role.filter(CombatRole::is_known);

    let (item_role, character_role) = match (item_role, character_role) {
        (Some(item), Some(character)) => (item, character),
        (None, _) => {
            return ComponentResult {
                score: 0,
                breakdown: vec!["item has no role signal".to_string()],
            }
        }
        (_, None) => {
            return ComponentResult {
                score: 0,
                breakdown: vec!["character has no primary role".to_string()],
            }
        }
    };

    if item_role == character_role {
        return ComponentResult::bounded(
            ComponentKind::RoleAlignment,
            role::EXACT_MATCH,
            vec![format!("{} role matches exactly", item_role.label())],
        );
    }

    let strength = overlap(item_role, character_role);
    let (score, note) = if strength >= role::STRONG_OVERLAP {
        (role::STRONG_PARTIAL, "strong partial")
    } else if strength >= role::MODERATE_OVERLAP {
        (role::MODERATE_PARTIAL, "moderate partial")
    } else if 1.0 - strength >= role::STRONG_MISMATCH_STRENGTH {
        (role::STRONG_MISMATCH, "strong mismatch")
    } else {
        (role::MILD_MISMATCH, "mild mismatch")
    };

    ComponentResult::bounded(
        ComponentKind::RoleAlignment,
        score,
        vec![format!(
            "{note}: {} item for {} character",
            item_role.label(),
            character_role.label()
        )],
    )
}

/// Symmetric overlap strength in `[0, 1]` between two distinct known roles.
pub(crate) fn overlap(a: CombatRole, b: CombatRole) -> f32 {
    use CombatRole::*;

    if a == b {
        return 1.0;
    }
    if a == Generalist || b == Generalist {
        return role::GENERALIST_OVERLAP;
    }
    if a.is_striker_family() && b.is_striker_family() {
        return role::FAMILY_OVERLAP;
    }

    match (a, b) {
        (Controller, Defender) | (Defender, Controller) => 0.5,
        (Controller, Support) | (Support, Controller) => 0.5,
        (Defender, Support) | (Support, Defender) => 0.3,
        (striker, Controller) | (Controller, striker) if striker.is_striker_family() => 0.3,
        (striker, Defender) | (Defender, striker) if striker.is_striker_family() => 0.3,
        _ => 0.0,
    }
}
