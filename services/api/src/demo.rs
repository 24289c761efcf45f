use crate::infra::{parse_role, InMemoryItemCatalog};
use crate::rank::render_suggestions;
use clap::Args;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::sync::Arc;
use suggestion_engine::catalog::CatalogImporter;
use suggestion_engine::config::ScoringConfig;
use suggestion_engine::error::AppError;
use suggestion_engine::scoring::{CharacterContext, CombatRole};
use suggestion_engine::suggestions::{SuggestionRequest, SuggestionService};

const SAMPLE_CATALOG: &str = "\
Id,Name,Type,Damage,Damage Type,Price,Traits,Range,Group,Role
bp-standard,Blaster Pistol,Weapon,3d6,Energy,500,,Pistol,Pistols,Striker
bp-heavy,Heavy Blaster Pistol,Weapon,3d8,Energy,750,,Pistol,Pistols,Striker
bp-hold-out,Hold-Out Blaster Pistol,Weapon,3d4,Energy,300,,Pistol,Pistols,
bp-sport,Sporting Blaster Pistol,Weapon,2d4+1,Energy,600,,Pistol,Pistols,
bp-ion,Ion Pistol,Weapon,3d6,Ion,250,,Pistol,Pistols,Controller
br-standard,Blaster Rifle,Weapon,3d8,Energy,1000,\"Autofire\",Rifle,Rifles,Striker
br-sporting,Sporting Blaster Rifle,Weapon,3d6,Energy,800,Accurate,Rifle,Rifles,Sniper
bc-standard,Blaster Carbine,Weapon,3d8,Energy,900,Autofire,Rifle,Rifles,
hw-repeater,Heavy Repeating Blaster,Weapon,3d10,Energy,4000,\"Autofire, Inaccurate\",Heavy,Heavy Weapons,Controller
gr-frag,Frag Grenade,Weapon,4d6,Kinetic,50,Area Attack,Thrown,Grenades,Controller
gr-stun,Stun Grenade,Weapon,4d6,Stun,25,Area Attack,Thrown,Grenades,Controller
vb-knife,Vibrodagger,Weapon,2d4,Kinetic,250,,Melee,Simple Weapons,Skirmisher
vb-blade,Vibroblade,Weapon,2d6,Kinetic,500,,Melee,Advanced Melee Weapons,Striker
ar-light,Combat Jumpsuit,Armor,,,1500,,,Light Armor,Defender
eq-medpac,Medpac,Equipment,,,100,,,,Support
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role hint applied to items that carry no role of their own
    #[arg(long, value_parser = parse_role)]
    pub(crate) implied_role: Option<CombatRole>,
    /// Maximum number of suggestions to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the per-component explanation under each suggestion
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn sample_catalog() -> Result<InMemoryItemCatalog, AppError> {
    let items = CatalogImporter::from_reader(Cursor::new(SAMPLE_CATALOG))?;
    Ok(InMemoryItemCatalog::from_items(items))
}

pub(crate) fn sample_character() -> CharacterContext {
    CharacterContext {
        attributes: BTreeMap::from([("str".to_string(), 1), ("dex".to_string(), 3)]),
        primary_role: Some(CombatRole::Striker),
        combat_roles: BTreeSet::from([CombatRole::Striker]),
        playstyle_hints: BTreeSet::from(["ranged-preferred".to_string()]),
        proficiencies: BTreeMap::from([
            ("Pistols".to_string(), true),
            ("Rifles".to_string(), true),
            ("Simple Weapons".to_string(), true),
            ("Heavy Weapons".to_string(), false),
            ("Light Armor".to_string(), true),
        ]),
        feats: BTreeSet::from(["Point-Blank Shot".to_string()]),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        implied_role,
        limit,
        explain,
    } = args;

    let catalog = sample_catalog()?;
    let candidates = catalog.len();
    let service = SuggestionService::new(
        Arc::new(catalog),
        ScoringConfig {
            category_normalization: true,
            suggestion_limit: candidates.max(1),
        },
    );

    let character = sample_character();
    println!("Suggestion engine demo");
    println!(
        "Character: {} | dex {:+} / str {:+} | prefers ranged combat",
        character
            .primary_role
            .map(|role| role.label())
            .unwrap_or("no role"),
        character.attributes.get("dex").copied().unwrap_or_default(),
        character.attributes.get("str").copied().unwrap_or_default()
    );

    let response = service.suggest(&SuggestionRequest {
        character,
        implied_role,
        limit,
    })?;
    render_suggestions(&response, explain);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use suggestion_engine::suggestions::ItemCatalog;

    #[test]
    fn sample_catalog_parses_every_row() {
        let catalog = sample_catalog().expect("sample catalog imports");

        assert_eq!(catalog.len(), 15);
        let items = catalog.items().expect("items listed");
        assert!(items.iter().all(|item| !item.name.is_empty()));
    }

    #[test]
    fn demo_ranking_stays_in_bounds_and_prefers_fitting_gear() {
        let catalog = sample_catalog().expect("sample catalog imports");
        let service = SuggestionService::new(Arc::new(catalog), ScoringConfig::default());

        let response = service
            .suggest(&SuggestionRequest {
                character: sample_character(),
                implied_role: None,
                limit: None,
            })
            .expect("ranking succeeds");

        assert_eq!(response.total_candidates, 15);
        assert!(response
            .suggestions
            .iter()
            .all(|entry| entry.breakdown.final_score <= 100));
        let medpac_rank = response
            .suggestions
            .iter()
            .find(|entry| entry.item_id.0 == "eq-medpac")
            .map(|entry| entry.rank)
            .expect("medpac ranked");
        let heavy_pistol_rank = response
            .suggestions
            .iter()
            .find(|entry| entry.item_id.0 == "bp-heavy")
            .map(|entry| entry.rank)
            .expect("heavy pistol ranked");
        assert!(heavy_pistol_rank < medpac_rank);
    }

    #[test]
    fn run_demo_prints_without_error() {
        run_demo(DemoArgs {
            implied_role: Some(CombatRole::Striker),
            limit: Some(5),
            explain: true,
        })
        .expect("demo runs");
    }
}
