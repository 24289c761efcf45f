//! Peer-relative category normalization.
//!
//! Compares a candidate with the other members of its peer group and derives a
//! small adjustment that keeps trap items from floating to the top of their own
//! category. The adjustment is a nudge, never a verdict on the item.

mod baseline;
mod classifier;

pub use baseline::{Distribution, PeerBaseline, TraitFrequency};
pub use classifier::{partition, MechanicalClassifier, PeerClassifier};

use serde::{Deserialize, Serialize};

use super::domain::ItemDescriptor;
use super::weights::{category, ComponentKind};
use baseline::trait_count;

/// Named bucket of mechanically comparable items. Membership may include the candidate.
#[derive(Debug, Clone, Copy)]
pub struct PeerGroup<'a> {
    pub name: &'a str,
    pub members: &'a [ItemDescriptor],
}

impl<'a> PeerGroup<'a> {
    pub fn new(name: &'a str, members: &'a [ItemDescriptor]) -> Self {
        Self { name, members }
    }
}

/// Which normalization rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySignal {
    InsufficientPeers,
    Trap,
    ShortfallAtParity,
    CheapShortfall,
    OverpricedWeaker,
    Standout,
    GoodValue,
    SlightlyBelowPeers,
    InLine,
}

/// Outcome of comparing a candidate with its peer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAdjustment {
    pub group: String,
    pub adjustment: i16,
    /// Informational only; the adjustment magnitude is fixed by the rule that fired.
    pub confidence: f32,
    pub signal: CategorySignal,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<PeerBaseline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_ratio: Option<f32>,
}

impl CategoryAdjustment {
    fn insufficient(group: &str) -> Self {
        Self {
            group: group.to_string(),
            adjustment: 0,
            confidence: 0.0,
            signal: CategorySignal::InsufficientPeers,
            explanation: "insufficient peers to compare".to_string(),
            baseline: None,
            damage_ratio: None,
            price_ratio: None,
        }
    }
}

pub fn confidence_for(peer_count: usize) -> f32 {
    category::CONFIDENCE_STEPS
        .iter()
        .find(|(upper, _)| peer_count < *upper)
        .map(|(_, confidence)| *confidence)
        .unwrap_or(category::MAX_CONFIDENCE)
}

/// Ratio against a positive baseline; parity when either side carries no information.
fn ratio(value: Option<f32>, baseline: Option<f32>) -> f32 {
    match (value, baseline) {
        (Some(value), Some(baseline)) if value > 0.0 && baseline > 0.0 => value / baseline,
        _ => 1.0,
    }
}

pub fn normalize(item: &ItemDescriptor, group: PeerGroup<'_>) -> CategoryAdjustment {
    if group.members.len() < category::MIN_GROUP_SIZE {
        return CategoryAdjustment::insufficient(group.name);
    }

    let peers: Vec<&ItemDescriptor> = group
        .members
        .iter()
        .filter(|member| member.id != item.id)
        .collect();
    if peers.is_empty() {
        return CategoryAdjustment::insufficient(group.name);
    }

    let baseline = PeerBaseline::from_peers(&peers);
    let candidate_damage = Some(item.average_damage()).filter(|damage| *damage > 0.0);
    let candidate_price = item.listed_price().map(|price| price as f32);
    let damage_ratio = ratio(candidate_damage, baseline.damage.map(|d| d.median));
    let price_ratio = ratio(candidate_price, baseline.price.map(|p| p.median));

    let traits = trait_count(item);
    let expected = baseline.traits.expected_trait_count();
    let accurate = item.trait_profile().accurate;

    let (signal, adjustment) = classify_signal(damage_ratio, price_ratio, traits, expected, accurate);
    let adjustment = ComponentKind::Category.cap().clamp(adjustment);
    let confidence = confidence_for(baseline.peer_count);

    let explanation = match signal {
        CategorySignal::Trap => format!(
            "trap signal: weaker than {} peers, lacks their traits, and costs more",
            group.name
        ),
        CategorySignal::ShortfallAtParity => format!(
            "weaker than {} peers and missing expected traits at a similar price",
            group.name
        ),
        CategorySignal::CheapShortfall => format!(
            "weaker than {} peers and missing expected traits, but cheap",
            group.name
        ),
        CategorySignal::OverpricedWeaker => {
            format!("weaker than {} peers while priced above them", group.name)
        }
        CategorySignal::Standout => format!(
            "accurate and well above {} peer damage at or below median price",
            group.name
        ),
        CategorySignal::GoodValue => {
            format!("above {} peer damage for less than the median price", group.name)
        }
        CategorySignal::SlightlyBelowPeers => {
            format!("slightly below {} peer damage at a similar price", group.name)
        }
        CategorySignal::InLine | CategorySignal::InsufficientPeers => {
            format!("in line with {} peers", group.name)
        }
    };

    tracing::trace!(
        group = group.name,
        damage_ratio,
        price_ratio,
        traits,
        expected,
        adjustment,
        "category normalization"
    );

    CategoryAdjustment {
        group: group.name.to_string(),
        adjustment,
        confidence,
        signal,
        explanation,
        baseline: Some(baseline),
        damage_ratio: Some(damage_ratio),
        price_ratio: Some(price_ratio),
    }
}

/// Trap detection first, then the mild penalty and bonuses.
fn classify_signal(
    damage_ratio: f32,
    price_ratio: f32,
    traits: i16,
    expected: i16,
    accurate: bool,
) -> (CategorySignal, i16) {
    let weaker = damage_ratio < category::WEAK_DAMAGE_RATIO;
    let shortfall = weaker && traits < expected;

    if shortfall {
        return if price_ratio > category::PARITY_PRICE_RATIO {
            (CategorySignal::Trap, category::TRAP)
        } else if price_ratio > category::CHEAP_PRICE_RATIO {
            (CategorySignal::ShortfallAtParity, category::SHORTFALL_AT_PARITY)
        } else {
            (CategorySignal::CheapShortfall, category::CHEAP_SHORTFALL)
        };
    }

    if weaker && price_ratio > category::OVERPRICED_RATIO {
        return (CategorySignal::OverpricedWeaker, category::OVERPRICED_WEAKER);
    }

    if damage_ratio > category::STANDOUT_DAMAGE_RATIO
        && accurate
        && price_ratio <= category::PARITY_PRICE_RATIO
    {
        return (CategorySignal::Standout, category::STANDOUT);
    }

    if damage_ratio > category::ABOVE_MEDIAN_DAMAGE_RATIO
        && price_ratio <= category::BELOW_MEDIAN_PRICE_RATIO
    {
        return (CategorySignal::GoodValue, category::GOOD_VALUE);
    }

    if (category::WEAK_DAMAGE_RATIO..1.0).contains(&damage_ratio)
        && (price_ratio - 1.0).abs() <= category::PARITY_BAND
    {
        return (CategorySignal::SlightlyBelowPeers, category::SLIGHTLY_BELOW_PEERS);
    }

    (CategorySignal::InLine, 0)
}
