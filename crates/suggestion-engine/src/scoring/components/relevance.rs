use super::ComponentResult;
use crate::scoring::domain::{CharacterContext, ItemDescriptor};
use crate::scoring::weights::{relevance, ComponentKind};

/// Low-weight anchor that keeps unusable items from scoring competitively.
pub(crate) fn score_base_relevance(
    item: &ItemDescriptor,
    character: &CharacterContext,
) -> ComponentResult {
    let mut breakdown = Vec::new();
    let mut score = 0;

    let item_type = item.item_type.trim();
    if relevance::SCOREABLE_TYPES
        .iter()
        .any(|kind| kind.eq_ignore_ascii_case(item_type))
    {
        score += relevance::TYPE_MATCH;
        breakdown.push(format!("{} is a scoreable item type", item_type.to_ascii_lowercase()));
    } else {
        breakdown.push(format!("item type '{item_type}' is not a scored category"));
    }

    let group = item.group.as_deref().map(str::trim).filter(|g| !g.is_empty());
    match group.map(|group| (group, character.proficiency(group))) {
        Some((group, Some(true))) => {
            score += relevance::PROFICIENT;
            breakdown.push(format!("proficient with {group}"));
        }
        Some((group, Some(false))) => {
            score += relevance::NOT_PROFICIENT;
            breakdown.push(format!("not proficient with {group}"));
        }
        Some((group, None)) => {
            score += relevance::UNRECOGNIZED_GROUP;
            breakdown.push(format!("no proficiency entry for {group}"));
        }
        None => {
            score += relevance::UNRECOGNIZED_GROUP;
            breakdown.push("item has no proficiency group".to_string());
        }
    }

    score += relevance::USABLE;

    ComponentResult::bounded(ComponentKind::BaseRelevance, score, breakdown)
}
