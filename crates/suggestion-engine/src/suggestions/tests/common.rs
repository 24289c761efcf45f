use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::scoring::{
    CharacterContext, CombatRole, DamageExpression, DamageType, ItemDescriptor, ItemId,
    RangeCategory,
};
use crate::suggestions::{
    suggestion_router, CatalogError, ItemCatalog, ScoreRequest, SuggestionRequest,
    SuggestionService,
};

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    items: Vec<ItemDescriptor>,
}

impl MemoryCatalog {
    pub(super) fn with_items(items: Vec<ItemDescriptor>) -> Self {
        Self { items }
    }
}

impl ItemCatalog for MemoryCatalog {
    fn items(&self) -> Result<Vec<ItemDescriptor>, CatalogError> {
        Ok(self.items.clone())
    }

    fn fetch(&self, id: &ItemId) -> Result<Option<ItemDescriptor>, CatalogError> {
        Ok(self.items.iter().find(|item| &item.id == id).cloned())
    }
}

pub(super) struct UnavailableCatalog;

impl ItemCatalog for UnavailableCatalog {
    fn items(&self) -> Result<Vec<ItemDescriptor>, CatalogError> {
        Err(CatalogError::Unavailable("armory offline".to_string()))
    }

    fn fetch(&self, _id: &ItemId) -> Result<Option<ItemDescriptor>, CatalogError> {
        Err(CatalogError::Unavailable("armory offline".to_string()))
    }
}

fn weapon(
    id: &str,
    name: &str,
    damage: DamageExpression,
    price: u32,
    range: RangeCategory,
    group: &str,
) -> ItemDescriptor {
    let mut item = ItemDescriptor::new(id, name, "weapon");
    item.damage = Some(damage);
    item.damage_type = Some(DamageType::Energy);
    item.price = Some(price);
    item.range = Some(range);
    item.group = Some(group.to_string());
    item
}

pub(super) fn armory() -> Vec<ItemDescriptor> {
    let mut heavy = weapon(
        "bp-heavy",
        "Heavy Blaster Pistol",
        DamageExpression::new(3, 8, 0),
        750,
        RangeCategory::Short,
        "Pistols",
    );
    heavy.role = Some(CombatRole::Striker);

    let mut standard = weapon(
        "bp-standard",
        "Blaster Pistol",
        DamageExpression::new(3, 6, 0),
        500,
        RangeCategory::Short,
        "Pistols",
    );
    standard.traits = "Accurate".to_string();

    let sport = weapon(
        "bp-sport",
        "Sporting Blaster Pistol",
        DamageExpression::new(3, 4, 0),
        500,
        RangeCategory::Short,
        "Pistols",
    );

    let mut rifle = weapon(
        "br-1",
        "Blaster Rifle",
        DamageExpression::new(3, 8, 0),
        1_000,
        RangeCategory::Medium,
        "Rifles",
    );
    rifle.role = Some(CombatRole::Striker);

    let mut grenade = weapon(
        "frag",
        "Frag Grenade",
        DamageExpression::new(4, 6, 0),
        50,
        RangeCategory::Short,
        "Grenades",
    );
    grenade.traits = "Area Attack".to_string();
    grenade.damage_type = Some(DamageType::Kinetic);
    grenade.role = Some(CombatRole::Controller);

    let mut medpac = ItemDescriptor::new("medpac", "Medpac", "equipment");
    medpac.price = Some(100);

    vec![heavy, standard, sport, rifle, grenade, medpac]
}

pub(super) fn gunslinger() -> CharacterContext {
    CharacterContext {
        attributes: BTreeMap::from([("str".to_string(), 0), ("dex".to_string(), 3)]),
        primary_role: Some(CombatRole::Striker),
        combat_roles: BTreeSet::new(),
        playstyle_hints: BTreeSet::from(["ranged-preferred".to_string()]),
        proficiencies: BTreeMap::from([
            ("Pistols".to_string(), true),
            ("Rifles".to_string(), true),
        ]),
        feats: BTreeSet::new(),
    }
}

pub(super) fn suggestion_request(limit: Option<usize>) -> SuggestionRequest {
    SuggestionRequest {
        character: gunslinger(),
        implied_role: None,
        limit,
    }
}

pub(super) fn score_request() -> ScoreRequest {
    ScoreRequest {
        character: gunslinger(),
        implied_role: None,
    }
}

pub(super) fn build_service(config: ScoringConfig) -> SuggestionService<MemoryCatalog> {
    SuggestionService::new(Arc::new(MemoryCatalog::with_items(armory())), config)
}

pub(super) fn router_with_service(service: SuggestionService<MemoryCatalog>) -> axum::Router {
    suggestion_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
