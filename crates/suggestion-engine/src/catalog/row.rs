use serde::{Deserialize, Deserializer};

use super::CatalogImportError;
use crate::scoring::{
    Attribute, CombatRole, DamageExpression, DamageType, ItemDescriptor, PriceCategory,
    RangeCategory,
};

#[derive(Debug, Deserialize)]
pub(super) struct CatalogRow {
    #[serde(rename = "Id", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    item_type: String,
    #[serde(rename = "Damage", default, deserialize_with = "empty_string_as_none")]
    damage: Option<String>,
    #[serde(
        rename = "Damage Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    damage_type: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(rename = "Traits", default)]
    traits: String,
    #[serde(rename = "Range", default, deserialize_with = "empty_string_as_none")]
    range: Option<String>,
    #[serde(rename = "Group", default, deserialize_with = "empty_string_as_none")]
    group: Option<String>,
    #[serde(rename = "Role", default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(
        rename = "Price Category",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    price_category: Option<String>,
    #[serde(
        rename = "Attack Attribute",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    attack_attribute: Option<String>,
}

impl CatalogRow {
    pub(super) fn into_descriptor(self, line: u64) -> Result<ItemDescriptor, CatalogImportError> {
        let id = self.id.ok_or(CatalogImportError::MissingId { line })?;
        let mut item = ItemDescriptor::new(id, self.name, self.item_type.to_ascii_lowercase());

        item.damage = self.damage.as_deref().and_then(|raw| {
            let parsed = DamageExpression::parse(raw);
            if parsed.is_none() {
                tracing::warn!(item = %item.id, damage = raw, "unreadable damage expression");
            }
            parsed
        });
        item.damage_type = self.damage_type.as_deref().and_then(DamageType::parse);
        item.price = self.price.as_deref().and_then(|raw| {
            let parsed = parse_price(raw);
            if parsed.is_none() {
                tracing::warn!(item = %item.id, price = raw, "unreadable price");
            }
            parsed
        });
        item.price_category = self.price_category.as_deref().and_then(parse_price_category);
        item.traits = self.traits;
        item.range = self.range.as_deref().and_then(RangeCategory::parse);
        item.group = self.group;
        item.role = self.role.as_deref().and_then(CombatRole::parse);
        item.attack_attribute = self.attack_attribute.as_deref().and_then(parse_attribute);

        Ok(item)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `1200`, `1,200` and `1200 cr`.
fn parse_price(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c.is_whitespace())
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    digits.parse().ok()
}

fn parse_price_category(raw: &str) -> Option<PriceCategory> {
    let normalized = raw
        .trim()
        .to_ascii_lowercase()
        .replace(['-', '_'], " ");
    let category = match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
        "cheap" => PriceCategory::Cheap,
        "somewhat cheap" => PriceCategory::SomewhatCheap,
        "average" => PriceCategory::Average,
        "somewhat expensive" => PriceCategory::SomewhatExpensive,
        "expensive" => PriceCategory::Expensive,
        "very expensive" => PriceCategory::VeryExpensive,
        _ => return None,
    };
    Some(category)
}

fn parse_attribute(raw: &str) -> Option<Attribute> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "str" | "strength" => Some(Attribute::Strength),
        "dex" | "dexterity" => Some(Attribute::Dexterity),
        _ => None,
    }
}
