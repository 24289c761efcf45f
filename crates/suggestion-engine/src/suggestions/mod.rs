//! Suggestion service: ranks a catalog of items for one character.
//!
//! The service composes an [`ItemCatalog`] with the pure [`ScoringEngine`](crate::scoring::ScoringEngine).
//! Catalog access is the only fallible step; scoring itself never fails.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{CatalogError, ItemCatalog};
pub use router::suggestion_router;
pub use service::{
    ItemScoreView, ScoreRequest, SuggestionRequest, SuggestionResponse, SuggestionService,
    SuggestionServiceError,
};
