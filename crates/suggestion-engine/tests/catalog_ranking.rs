//! End-to-end ranking over an imported CSV catalog, driven through the public engine API.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::sync::Arc;

use suggestion_engine::catalog::CatalogImporter;
use suggestion_engine::scoring::{
    partition, CategorySignal, CharacterContext, CombatRole, ItemDescriptor, MechanicalClassifier,
    RankingOptions, ScoringEngine, Tier,
};

const ARMORY: &str = "\
Id,Name,Type,Damage,Damage Type,Price,Traits,Range,Group,Role
bp-1,Blaster Pistol,Weapon,2d6,Energy,500,Accurate,Pistol,Pistols,
bp-2,Blaster Pistol Mk II,Weapon,2d6+1,Energy,500,Accurate,Pistol,Pistols,
bp-3,Blaster Pistol Mk III,Weapon,2d6+1,Energy,500,Accurate,Pistol,Pistols,
bp-4,Blaster Pistol Mk IV,Weapon,2d6+3,Energy,500,,Pistol,Pistols,
bp-trap,Blaster Pistol Deluxe,Weapon,2d4+1,Energy,600,,Pistol,Pistols,
br-1,Blaster Rifle,Weapon,3d8,Energy,1000,,Rifle,Rifles,Striker
kit,Field Kit,Equipment,,,80,,,,
";

fn armory() -> Vec<ItemDescriptor> {
    CatalogImporter::from_reader(Cursor::new(ARMORY)).expect("armory imports")
}

fn gunslinger() -> CharacterContext {
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

#[test]
fn imported_catalog_partitions_into_narrow_groups() {
    let items = armory();

    let groups = partition(&items, &MechanicalClassifier);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups["Blaster Pistols"].len(), 5);
    assert_eq!(groups["Blaster Rifles"].len(), 1);
}

#[test]
fn trap_pistol_is_flagged_and_sinks_within_its_group() {
    let engine = ScoringEngine::new();
    let items = armory();

    let ranked = engine.rank(&items, &gunslinger(), &RankingOptions::default());

    let trap = ranked
        .iter()
        .find(|entry| entry.item_id.0 == "bp-trap")
        .expect("trap ranked");
    let category = trap.breakdown.category.as_ref().expect("pistol group applied");
    assert_eq!(category.signal, CategorySignal::Trap);
    assert_eq!(category.adjustment, -6);
    assert!((category.confidence - 0.5).abs() < f32::EPSILON);

    let pistols: Vec<_> = ranked
        .iter()
        .filter(|entry| entry.peer_group.as_deref() == Some("Blaster Pistols"))
        .collect();
    assert_eq!(pistols.last().map(|entry| entry.item_id.0.as_str()), Some("bp-trap"));
}

#[test]
fn ranking_is_ordered_and_deterministic() {
    let engine = ScoringEngine::new();
    let items = armory();

    let first = engine.rank(&items, &gunslinger(), &RankingOptions::default());
    let second = engine.rank(&items, &gunslinger(), &RankingOptions::default());

    assert_eq!(first, second);
    assert_eq!(first.len(), items.len());
    for pair in first.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.breakdown.final_score > b.breakdown.final_score
                || (a.breakdown.final_score == b.breakdown.final_score && a.name <= b.name)
        );
    }
    assert_eq!(first[0].item_id.0, "br-1");
    assert!(first.iter().all(|entry| entry.breakdown.tier == Tier::from_score(entry.breakdown.final_score)));
}

#[test]
fn a_custom_classifier_replaces_the_mechanical_grouping() {
    let by_group = |item: &ItemDescriptor| item.group.clone();
    let engine = ScoringEngine::with_classifier(Arc::new(by_group));
    let items = armory();

    let ranked = engine.rank(&items, &gunslinger(), &RankingOptions::default());

    let rifle = ranked
        .iter()
        .find(|entry| entry.item_id.0 == "br-1")
        .expect("rifle ranked");
    assert_eq!(rifle.peer_group.as_deref(), Some("Rifles"));
    let kit = ranked
        .iter()
        .find(|entry| entry.item_id.0 == "kit")
        .expect("kit ranked");
    assert!(kit.peer_group.is_none());
    assert!(kit.breakdown.category.is_none());
}

#[test]
fn normalization_can_be_switched_off_per_pass() {
    let engine = ScoringEngine::new();
    let items = armory();
    let options = RankingOptions {
        implied_role: Some(CombatRole::Striker),
        category_normalization: false,
    };

    let ranked = engine.rank(&items, &gunslinger(), &options);

    assert!(ranked.iter().all(|entry| entry.breakdown.category.is_none()));
    let trap = ranked
        .iter()
        .find(|entry| entry.item_id.0 == "bp-trap")
        .expect("trap ranked");
    assert_eq!(trap.breakdown.components.role_alignment.score, 25);
}
