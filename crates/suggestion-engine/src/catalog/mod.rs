//! CSV catalog import.
//!
//! Rows are read with headers `Id, Name, Type, Damage, Damage Type, Price, Traits,
//! Range, Group, Role`; `Price Category` and `Attack Attribute` are optional extra
//! columns. Cells the engine can live without (damage, price, range, role) degrade to
//! `None` with a warning instead of failing the import.

mod row;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::scoring::ItemDescriptor;
use row::CatalogRow;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {line} has no item id")]
    MissingId { line: u64 },
    #[error("catalog lists item '{id}' more than once")]
    DuplicateId { id: String },
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ItemDescriptor>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ItemDescriptor>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut items = Vec::new();
        let mut seen = HashSet::new();

        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;
            let line = items.len() as u64 + 2;
            let item = row.into_descriptor(line)?;
            if !seen.insert(item.id.0.clone()) {
                return Err(CatalogImportError::DuplicateId { id: item.id.0 });
            }
            items.push(item);
        }

        tracing::info!(items = items.len(), "catalog imported");
        Ok(items)
    }
}
