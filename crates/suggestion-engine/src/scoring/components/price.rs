use super::ComponentResult;
use crate::scoring::domain::{ItemDescriptor, PriceCategory};
use crate::scoring::weights::{price, ComponentKind};

pub(crate) fn price_category(credits: u32) -> PriceCategory {
    price::BUCKETS
        .iter()
        .find(|(_, upper, _)| credits < *upper)
        .map(|(bucket, _, _)| *bucket)
        .unwrap_or(PriceCategory::VeryExpensive)
}

/// Small affordability nudge; never a gate.
pub(crate) fn score_price(item: &ItemDescriptor) -> ComponentResult {
    let (category, note) = match (item.price_category, item.listed_price()) {
        (Some(category), _) => (category, format!("tagged {}", category.label())),
        (None, Some(credits)) => {
            let category = price_category(credits);
            (category, format!("{} at {credits} credits", category.label()))
        }
        (None, None) => (
            PriceCategory::Average,
            "no listed price, treated as average".to_string(),
        ),
    };

    ComponentResult::bounded(ComponentKind::Price, price::bucket_score(category), vec![note])
}
