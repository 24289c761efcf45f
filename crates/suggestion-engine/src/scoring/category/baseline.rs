use serde::{Deserialize, Serialize};

use crate::scoring::domain::ItemDescriptor;
use crate::scoring::weights::category;

/// Summary statistics over one numeric attribute of a peer group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub median: f32,
    pub mean: f32,
    pub min: f32,
    pub max: f32,
}

impl Distribution {
    /// `None` when no finite values are present.
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        let mut values: Vec<f32> = values.into_iter().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f32::total_cmp);

        let len = values.len();
        let median = if len % 2 == 0 {
            (values[len / 2 - 1] + values[len / 2]) / 2.0
        } else {
            values[len / 2]
        };
        let mean = values.iter().sum::<f32>() / len as f32;

        Some(Self {
            median,
            mean,
            min: values[0],
            max: values[len - 1],
        })
    }
}

/// Share of peers carrying each notable trait, in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitFrequency {
    pub accurate: f32,
    pub inaccurate: f32,
    pub special: f32,
}

impl TraitFrequency {
    fn from_peers(peers: &[&ItemDescriptor]) -> Self {
        if peers.is_empty() {
            return Self::default();
        }
        let total = peers.len() as f32;
        let (mut accurate, mut inaccurate, mut special) = (0u32, 0u32, 0u32);
        for peer in peers {
            let traits = peer.trait_profile();
            accurate += u32::from(traits.accurate);
            inaccurate += u32::from(traits.inaccurate);
            special += u32::from(traits.special > 0);
        }
        Self {
            accurate: accurate as f32 / total,
            inaccurate: inaccurate as f32 / total,
            special: special as f32 / total,
        }
    }

    /// Net trait count a typical peer carries: a trait is expected when over half the peers have it.
    pub fn expected_trait_count(&self) -> i16 {
        let expected = |frequency: f32| i16::from(frequency > category::EXPECTED_TRAIT_FREQUENCY);
        expected(self.accurate) + expected(self.special) - expected(self.inaccurate)
    }
}

/// Peer-group baselines a candidate is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerBaseline {
    pub peer_count: usize,
    pub damage: Option<Distribution>,
    pub price: Option<Distribution>,
    pub traits: TraitFrequency,
}

impl PeerBaseline {
    pub fn from_peers(peers: &[&ItemDescriptor]) -> Self {
        let damage = Distribution::from_values(
            peers
                .iter()
                .map(|peer| peer.average_damage())
                .filter(|damage| *damage > 0.0),
        );
        let price = Distribution::from_values(
            peers
                .iter()
                .filter_map(|peer| peer.listed_price())
                .map(|price| price as f32),
        );

        Self {
            peer_count: peers.len(),
            damage,
            price,
            traits: TraitFrequency::from_peers(peers),
        }
    }
}

/// Net notable-trait count of a single item, on the same scale as the expected count.
pub(crate) fn trait_count(item: &ItemDescriptor) -> i16 {
    let traits = item.trait_profile();
    i16::from(traits.accurate) + i16::from(traits.special > 0) - i16::from(traits.inaccurate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_averages_the_middle_pair_for_even_counts() {
        let distribution =
            Distribution::from_values([10.0, 7.0, 8.0, 8.0]).expect("values present");
        assert_eq!(distribution.median, 8.0);
        assert_eq!(distribution.min, 7.0);
        assert_eq!(distribution.max, 10.0);
        assert_eq!(distribution.mean, 8.25);
    }

    #[test]
    fn empty_or_non_finite_values_yield_no_distribution() {
        assert!(Distribution::from_values(Vec::<f32>::new()).is_none());
        assert!(Distribution::from_values([f32::NAN]).is_none());
    }

    #[test]
    fn expected_trait_count_requires_a_majority() {
        let frequency = TraitFrequency {
            accurate: 0.6,
            inaccurate: 0.5,
            special: 0.2,
        };
        assert_eq!(frequency.expected_trait_count(), 1);
    }
}
