//! Capped constant tables for every scoring component.
//!
//! Each component clamps its own output against the [`Cap`] declared here before
//! returning. The tables below carry every band threshold, bonus, and penalty so
//! each constant can be audited against its component's cap in one place.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` bounds for a component's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cap {
    pub min: i16,
    pub max: i16,
}

impl Cap {
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i16) -> i16 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i16) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Largest absolute value the component can contribute.
    pub const fn magnitude(&self) -> i16 {
        let low = self.min.abs();
        let high = self.max.abs();
        if low > high {
            low
        } else {
            high
        }
    }
}

/// Range of the aggregated final score.
pub const FINAL_SCORE: Cap = Cap::new(0, 100);

/// No single component may swing the final score by more than a third of its range.
pub const MAX_COMPONENT_MAGNITUDE: i16 = (FINAL_SCORE.max - FINAL_SCORE.min) / 3;

/// Components contributing to the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    BaseRelevance,
    RoleAlignment,
    AxisA,
    AxisB,
    Tradeoff,
    Price,
    Category,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::BaseRelevance,
        ComponentKind::RoleAlignment,
        ComponentKind::AxisA,
        ComponentKind::AxisB,
        ComponentKind::Tradeoff,
        ComponentKind::Price,
        ComponentKind::Category,
    ];

    pub const fn cap(&self) -> Cap {
        match self {
            ComponentKind::BaseRelevance => Cap::new(10, 20),
            ComponentKind::RoleAlignment => Cap::new(-10, 25),
            ComponentKind::AxisA => Cap::new(0, 16),
            ComponentKind::AxisB => Cap::new(-15, 20),
            ComponentKind::Tradeoff => Cap::new(-10, 10),
            ComponentKind::Price => Cap::new(-6, 4),
            ComponentKind::Category => Cap::new(-6, 4),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::BaseRelevance => "base relevance",
            ComponentKind::RoleAlignment => "role alignment",
            ComponentKind::AxisA => "impact",
            ComponentKind::AxisB => "hit likelihood",
            ComponentKind::Tradeoff => "tradeoff",
            ComponentKind::Price => "price",
            ComponentKind::Category => "category",
        }
    }
}

pub mod relevance {
    pub const TYPE_MATCH: i16 = 5;
    pub const PROFICIENT: i16 = 10;
    pub const UNRECOGNIZED_GROUP: i16 = 5;
    pub const NOT_PROFICIENT: i16 = 0;
    pub const USABLE: i16 = 5;

    /// Item types the engine knows how to rank, matched case-insensitively.
    pub const SCOREABLE_TYPES: [&str; 5] =
        ["weapon", "armor", "equipment", "implant", "vehicle-weapon"];
}

pub mod role {
    pub const EXACT_MATCH: i16 = 25;
    pub const STRONG_PARTIAL: i16 = 15;
    pub const MODERATE_PARTIAL: i16 = 8;
    pub const MILD_MISMATCH: i16 = -5;
    pub const STRONG_MISMATCH: i16 = -10;

    pub const STRONG_OVERLAP: f32 = 0.8;
    pub const MODERATE_OVERLAP: f32 = 0.5;
    pub const STRONG_MISMATCH_STRENGTH: f32 = 0.8;

    /// Overlap between two members of the striker family.
    pub const FAMILY_OVERLAP: f32 = 0.8;
    /// Overlap between a generalist and any other known role.
    pub const GENERALIST_OVERLAP: f32 = 0.5;
}

pub mod impact {
    use serde::Serialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum DamageBand {
        Low,
        MediumLow,
        Medium,
        MediumHigh,
        High,
    }

    impl DamageBand {
        pub fn label(&self) -> &'static str {
            match self {
                DamageBand::Low => "low",
                DamageBand::MediumLow => "medium-low",
                DamageBand::Medium => "medium",
                DamageBand::MediumHigh => "medium-high",
                DamageBand::High => "high",
            }
        }
    }

    /// `(band, exclusive upper bound on average damage, score)`, ascending.
    pub const BANDS: [(DamageBand, f32, i16); 5] = [
        (DamageBand::Low, 5.0, 4),
        (DamageBand::MediumLow, 8.0, 7),
        (DamageBand::Medium, 12.0, 10),
        (DamageBand::MediumHigh, 16.0, 13),
        (DamageBand::High, f32::INFINITY, 16),
    ];

    pub const AREA_WITHOUT_CONTROLLER: i16 = -4;
    pub const STUN_FOR_LETHAL_BUILD: i16 = -3;
    pub const UNSUPPORTED_EXOTIC_DAMAGE: i16 = -2;
}

pub mod hit {
    /// `(minimum differential, score, label)`, checked in order.
    pub const ATTRIBUTE_STEPS: [(i16, i16, &str); 4] = [
        (4, 10, "strong advantage"),
        (2, 6, "moderate advantage"),
        (0, 2, "slight advantage"),
        (-2, -4, "slight disadvantage"),
    ];
    pub const ATTRIBUTE_FLOOR: i16 = -8;

    pub const ACCURATE: i16 = 4;
    pub const INACCURATE: i16 = -4;
    pub const AUTOFIRE_WITH_CONTROLLER: i16 = 5;
    pub const AUTOFIRE_WITHOUT_CONTROLLER: i16 = -5;

    pub const RANGE_PREFERRED: i16 = 3;
    pub const RANGE_ACCEPTABLE: i16 = 1;
    pub const RANGE_MISMATCH: i16 = -3;
}

pub mod tradeoff {
    pub const HEAVY_FOR_MOBILE_BUILD: i16 = -6;
    pub const LIGHT_FOR_STATIONARY_BUILD: i16 = -3;
    pub const INACCURATE_FOR_SNIPER: i16 = -4;
    pub const DUAL_AXIS_SYNERGY: i16 = 5;

    /// Strength modifier at or below which a build counts as low-strength.
    pub const LOW_STRENGTH: i8 = 0;
    /// Strength modifier at or above which a build counts as high-strength.
    pub const HIGH_STRENGTH: i8 = 3;
    /// Fraction of each axis maximum both axes must reach for the synergy bonus.
    pub const SYNERGY_THRESHOLD: f32 = 0.75;
}

pub mod price {
    use crate::scoring::domain::PriceCategory;

    /// `(bucket, exclusive upper bound in credits, score)`, ascending.
    pub const BUCKETS: [(PriceCategory, u32, i16); 6] = [
        (PriceCategory::Cheap, 250, 4),
        (PriceCategory::SomewhatCheap, 500, 2),
        (PriceCategory::Average, 1_000, 0),
        (PriceCategory::SomewhatExpensive, 2_000, -2),
        (PriceCategory::Expensive, 5_000, -4),
        (PriceCategory::VeryExpensive, u32::MAX, -6),
    ];

    pub fn bucket_score(category: PriceCategory) -> i16 {
        BUCKETS
            .iter()
            .find(|(bucket, _, _)| *bucket == category)
            .map(|(_, _, score)| *score)
            .unwrap_or(0)
    }
}

pub mod category {
    pub const MIN_GROUP_SIZE: usize = 2;

    pub const WEAK_DAMAGE_RATIO: f32 = 0.9;
    pub const STANDOUT_DAMAGE_RATIO: f32 = 1.15;
    pub const ABOVE_MEDIAN_DAMAGE_RATIO: f32 = 1.05;
    pub const CHEAP_PRICE_RATIO: f32 = 0.8;
    pub const PARITY_PRICE_RATIO: f32 = 1.0;
    pub const OVERPRICED_RATIO: f32 = 1.1;
    pub const BELOW_MEDIAN_PRICE_RATIO: f32 = 0.9;
    /// Price ratios within `[1 - band, 1 + band]` count as parity for the mild penalty.
    pub const PARITY_BAND: f32 = 0.1;
    /// Peers carrying a trait above this frequency make it expected.
    pub const EXPECTED_TRAIT_FREQUENCY: f32 = 0.5;

    pub const TRAP: i16 = -6;
    pub const SHORTFALL_AT_PARITY: i16 = -4;
    pub const CHEAP_SHORTFALL: i16 = -2;
    pub const OVERPRICED_WEAKER: i16 = -3;
    pub const SLIGHTLY_BELOW_PEERS: i16 = -1;
    pub const GOOD_VALUE: i16 = 2;
    pub const STANDOUT: i16 = 4;

    /// `(exclusive upper bound on peer count, confidence)`, ascending.
    pub const CONFIDENCE_STEPS: [(usize, f32); 3] = [(3, 0.3), (5, 0.5), (10, 0.7)];
    pub const MAX_CONFIDENCE: f32 = 0.9;
}

pub mod tier {
    use crate::scoring::aggregate::Tier;

    /// `(inclusive lower bound, tier)`, descending; anything below falls to `Poor`.
    pub const THRESHOLDS: [(u8, Tier); 5] = [
        (90, Tier::Perfect),
        (80, Tier::Excellent),
        (70, Tier::Good),
        (55, Tier::Viable),
        (35, Tier::Marginal),
    ];
}

/// Serializable snapshot of every cap, used by the API to document the contract.
#[derive(Debug, Clone, Serialize)]
pub struct CapTable {
    pub final_score: Cap,
    pub components: Vec<(ComponentKind, Cap)>,
}

pub fn cap_table() -> CapTable {
    CapTable {
        final_score: FINAL_SCORE,
        components: ComponentKind::ALL
            .iter()
            .map(|kind| (*kind, kind.cap()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_component_can_dominate_the_final_score() {
        for kind in ComponentKind::ALL {
            assert!(
                kind.cap().magnitude() <= MAX_COMPONENT_MAGNITUDE,
                "{} cap {:?} exceeds a third of the score range",
                kind.label(),
                kind.cap()
            );
        }
    }

    #[test]
    fn band_scores_stay_within_axis_a_cap() {
        let cap = ComponentKind::AxisA.cap();
        for (_, _, score) in impact::BANDS {
            assert!(cap.contains(score));
        }
        assert_eq!(impact::BANDS[4].2, cap.max);
    }

    #[test]
    fn price_buckets_never_exceed_price_cap() {
        let cap = ComponentKind::Price.cap();
        for (_, _, score) in price::BUCKETS {
            assert!(cap.contains(score));
        }
        assert!(cap.magnitude() < ComponentKind::RoleAlignment.cap().magnitude());
        assert!(cap.magnitude() < ComponentKind::AxisA.cap().magnitude());
        assert!(cap.magnitude() < ComponentKind::AxisB.cap().magnitude());
    }

    #[test]
    fn category_rule_magnitudes_fit_category_cap() {
        let cap = ComponentKind::Category.cap();
        for value in [
            category::TRAP,
            category::SHORTFALL_AT_PARITY,
            category::CHEAP_SHORTFALL,
            category::OVERPRICED_WEAKER,
            category::SLIGHTLY_BELOW_PEERS,
            category::GOOD_VALUE,
            category::STANDOUT,
        ] {
            assert!(cap.contains(value));
        }
    }

    #[test]
    fn role_constants_fit_role_cap() {
        let cap = ComponentKind::RoleAlignment.cap();
        assert_eq!(role::EXACT_MATCH, cap.max);
        assert_eq!(role::STRONG_MISMATCH, cap.min);
    }
}

