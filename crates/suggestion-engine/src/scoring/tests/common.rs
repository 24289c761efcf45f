use std::collections::{BTreeMap, BTreeSet};

use crate::scoring::domain::{
    CharacterContext, CombatRole, DamageExpression, DamageType, ItemDescriptor, RangeCategory,
};
use crate::scoring::ScoringEngine;

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new()
}

/// Dexterity-leaning striker who prefers ranged combat and is trained with pistols.
pub(super) fn gunslinger() -> CharacterContext {
    let mut attributes = BTreeMap::new();
    attributes.insert("str".to_string(), 0);
    attributes.insert("dex".to_string(), 3);

    let mut proficiencies = BTreeMap::new();
    proficiencies.insert("Pistols".to_string(), true);
    proficiencies.insert("Rifles".to_string(), true);
    proficiencies.insert("Heavy Weapons".to_string(), false);

    CharacterContext {
        attributes,
        primary_role: Some(CombatRole::Striker),
        combat_roles: BTreeSet::new(),
        playstyle_hints: BTreeSet::from(["ranged-preferred".to_string()]),
        proficiencies,
        feats: BTreeSet::new(),
    }
}

pub(super) fn character_with(
    strength: i8,
    dexterity: i8,
    role: Option<CombatRole>,
    hints: &[&str],
) -> CharacterContext {
    let mut character = gunslinger();
    character.attributes.insert("str".to_string(), strength);
    character.attributes.insert("dex".to_string(), dexterity);
    character.primary_role = role;
    character.playstyle_hints = hints.iter().map(|hint| hint.to_string()).collect();
    character
}

/// 3d6 energy pistol (avg 10.5, medium band), average price, striker-tagged.
pub(super) fn blaster_pistol() -> ItemDescriptor {
    let mut item = ItemDescriptor::new("blaster-pistol", "Blaster Pistol", "weapon");
    item.damage = Some(DamageExpression::new(3, 6, 0));
    item.damage_type = Some(DamageType::Energy);
    item.price = Some(750);
    item.range = Some(RangeCategory::Short);
    item.group = Some("Pistols".to_string());
    item.role = Some(CombatRole::Striker);
    item
}

pub(super) fn pistol(id: &str, damage: DamageExpression, price: u32, traits: &str) -> ItemDescriptor {
    let mut item = ItemDescriptor::new(id, format!("Blaster Pistol {id}"), "weapon");
    item.damage = Some(damage);
    item.damage_type = Some(DamageType::Energy);
    item.price = Some(price);
    item.traits = traits.to_string();
    item.range = Some(RangeCategory::Short);
    item.group = Some("Pistols".to_string());
    item
}

/// Four comparison pistols: damage 7, 8, 8, 10 (median 8), all 500 credits, three accurate.
pub(super) fn pistol_peers() -> Vec<ItemDescriptor> {
    vec![
        pistol("peer-a", DamageExpression::new(2, 6, 0), 500, "Accurate"),
        pistol("peer-b", DamageExpression::new(2, 6, 1), 500, "Accurate"),
        pistol("peer-c", DamageExpression::new(2, 6, 1), 500, "Accurate"),
        pistol("peer-d", DamageExpression::new(2, 6, 3), 500, ""),
    ]
}

/// Peers plus the candidate, as a classifier would bucket them.
pub(super) fn group_with(candidate: &ItemDescriptor) -> Vec<ItemDescriptor> {
    let mut members = pistol_peers();
    members.push(candidate.clone());
    members
}
