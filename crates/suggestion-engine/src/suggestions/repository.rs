use crate::scoring::{ItemDescriptor, ItemId};

/// Storage abstraction so the service can be exercised against any item source.
pub trait ItemCatalog: Send + Sync {
    fn items(&self) -> Result<Vec<ItemDescriptor>, CatalogError>;
    fn fetch(&self, id: &ItemId) -> Result<Option<ItemDescriptor>, CatalogError>;
}

/// Error enumeration for catalog failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("item not found")]
    NotFound,
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
