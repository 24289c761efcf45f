use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::repository::{CatalogError, ItemCatalog};
use crate::config::ScoringConfig;
use crate::scoring::{
    partition, CharacterContext, CombatRole, ItemDescriptor, ItemId, PeerGroup, RankedSuggestion,
    RankingOptions, ScoreBreakdown, ScoreOptions, ScoringEngine,
};

/// Body of a ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub character: CharacterContext,
    #[serde(default)]
    pub implied_role: Option<CombatRole>,
    /// Capped by the configured suggestion limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Body of a single-item scoring request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub character: CharacterContext,
    #[serde(default)]
    pub implied_role: Option<CombatRole>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub total_candidates: usize,
    pub suggestions: Vec<RankedSuggestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemScoreView {
    pub item_id: ItemId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_group: Option<String>,
    pub breakdown: ScoreBreakdown,
}

/// Service composing the item catalog and the scoring engine.
pub struct SuggestionService<C> {
    catalog: Arc<C>,
    engine: Arc<ScoringEngine>,
    config: ScoringConfig,
}

impl<C> SuggestionService<C>
where
    C: ItemCatalog + 'static,
{
    pub fn new(catalog: Arc<C>, config: ScoringConfig) -> Self {
        Self::with_engine(catalog, Arc::new(ScoringEngine::new()), config)
    }

    pub fn with_engine(catalog: Arc<C>, engine: Arc<ScoringEngine>, config: ScoringConfig) -> Self {
        Self {
            catalog,
            engine,
            config,
        }
    }

    /// Rank the whole catalog for a character, best first.
    pub fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestionServiceError> {
        let limit = match request.limit {
            Some(0) => return Err(SuggestionServiceError::InvalidLimit),
            Some(limit) => limit.min(self.config.suggestion_limit),
            None => self.config.suggestion_limit,
        };

        let items = self.catalog.items()?;
        let options = RankingOptions {
            implied_role: request.implied_role,
            category_normalization: self.config.category_normalization,
        };

        let mut suggestions = self.engine.rank(&items, &request.character, &options);
        let total_candidates = suggestions.len();
        suggestions.truncate(limit);

        Ok(SuggestionResponse {
            total_candidates,
            suggestions,
        })
    }

    /// Score one catalog item, normalized against its catalog peers when enabled.
    pub fn score(
        &self,
        item_id: &ItemId,
        request: &ScoreRequest,
    ) -> Result<ItemScoreView, SuggestionServiceError> {
        let item = self
            .catalog
            .fetch(item_id)?
            .ok_or(CatalogError::NotFound)?;

        let groups = if self.config.category_normalization {
            let items = self.catalog.items()?;
            partition(&items, self.engine.classifier())
        } else {
            Default::default()
        };
        let peer_group = groups
            .iter()
            .find(|(_, members)| members.iter().any(|member| member.id == item.id))
            .map(|(name, members)| PeerGroup::new(name, members));

        let breakdown = self.engine.score_item(
            &item,
            &request.character,
            &ScoreOptions {
                implied_role: request.implied_role,
                peer_group,
            },
        );

        Ok(view(&item, peer_group.map(|group| group.name.to_string()), breakdown))
    }
}

fn view(item: &ItemDescriptor, peer_group: Option<String>, breakdown: ScoreBreakdown) -> ItemScoreView {
    ItemScoreView {
        item_id: item.id.clone(),
        name: item.name.clone(),
        peer_group,
        breakdown,
    }
}

/// Error raised by the suggestion service.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("limit must be at least 1")]
    InvalidLimit,
}
