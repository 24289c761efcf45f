use crate::infra::{load_character, parse_role, InMemoryItemCatalog};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use suggestion_engine::catalog::CatalogImporter;
use suggestion_engine::config::AppConfig;
use suggestion_engine::error::AppError;
use suggestion_engine::scoring::CombatRole;
use suggestion_engine::suggestions::{SuggestionRequest, SuggestionResponse, SuggestionService};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV catalog of candidate items
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// JSON file describing the character
    #[arg(long)]
    pub(crate) character: PathBuf,
    /// Role hint applied to items that carry no role of their own
    #[arg(long, value_parser = parse_role)]
    pub(crate) implied_role: Option<CombatRole>,
    /// Maximum number of suggestions to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the per-component explanation under each suggestion
    #[arg(long)]
    pub(crate) explain: bool,
    /// Skip the peer-group category adjustment
    #[arg(long)]
    pub(crate) no_category_normalization: bool,
    /// Emit the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        catalog,
        character,
        implied_role,
        limit,
        explain,
        no_category_normalization,
        json,
    } = args;

    let mut config = AppConfig::load()?.scoring;
    if no_category_normalization {
        config.category_normalization = false;
    }
    if let Some(limit) = limit {
        config.suggestion_limit = config.suggestion_limit.max(limit);
    }

    let items = CatalogImporter::from_path(&catalog)?;
    let character = load_character(&character)?;
    let service = SuggestionService::new(Arc::new(InMemoryItemCatalog::from_items(items)), config);

    let response = service.suggest(&SuggestionRequest {
        character,
        implied_role,
        limit,
    })?;

    if json {
        let rendered = serde_json::to_string_pretty(&response)
            .map_err(|err| AppError::Input(format!("unable to render ranking ({err})")))?;
        println!("{rendered}");
    } else {
        println!("Ranking {} candidates from {}", response.total_candidates, catalog.display());
        render_suggestions(&response, explain);
    }

    Ok(())
}

pub(crate) fn render_suggestions(response: &SuggestionResponse, explain: bool) {
    if response.suggestions.is_empty() {
        println!("No candidates to rank.");
        return;
    }

    println!("{:>4}  {:>5}  {:<10}  {:<32}  {}", "rank", "score", "tier", "item", "peer group");
    for entry in &response.suggestions {
        println!(
            "{:>4}  {:>5}  {:<10}  {:<32}  {}",
            entry.rank,
            entry.breakdown.final_score,
            entry.breakdown.tier.label(),
            entry.name,
            entry.peer_group.as_deref().unwrap_or("-")
        );

        if explain {
            for line in &entry.breakdown.component_explanations {
                println!(
                    "        {:+4} {}: {}",
                    line.score,
                    line.component.label(),
                    line.explanation
                );
            }
        }
    }

    let shown = response.suggestions.len();
    if shown < response.total_candidates {
        println!(
            "... {} more candidates not shown",
            response.total_candidates - shown
        );
    }
}
