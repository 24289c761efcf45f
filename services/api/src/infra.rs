use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use suggestion_engine::error::AppError;
use suggestion_engine::scoring::{CharacterContext, CombatRole, ItemDescriptor, ItemId};
use suggestion_engine::suggestions::{CatalogError, ItemCatalog};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only catalog loaded once at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryItemCatalog {
    items: Arc<BTreeMap<ItemId, ItemDescriptor>>,
}

impl InMemoryItemCatalog {
    pub(crate) fn from_items(items: Vec<ItemDescriptor>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            items: Arc::new(items),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl ItemCatalog for InMemoryItemCatalog {
    fn items(&self) -> Result<Vec<ItemDescriptor>, CatalogError> {
        Ok(self.items.values().cloned().collect())
    }

    fn fetch(&self, id: &ItemId) -> Result<Option<ItemDescriptor>, CatalogError> {
        Ok(self.items.get(id).cloned())
    }
}

pub(crate) fn parse_role(raw: &str) -> Result<CombatRole, String> {
    CombatRole::parse(raw).ok_or_else(|| {
        format!(
            "unknown role '{raw}' (expected striker, skirmisher, sniper, controller, defender, support or generalist)"
        )
    })
}

pub(crate) fn load_character(path: &Path) -> Result<CharacterContext, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::Input(format!(
            "character file {} is not valid JSON ({err})",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_serves_items_by_id() {
        let catalog = InMemoryItemCatalog::from_items(vec![
            ItemDescriptor::new("b", "Blaster Rifle", "weapon"),
            ItemDescriptor::new("a", "Blaster Pistol", "weapon"),
        ]);

        assert_eq!(catalog.len(), 2);
        let fetched = catalog
            .fetch(&ItemId("a".to_string()))
            .expect("fetch succeeds")
            .expect("item present");
        assert_eq!(fetched.name, "Blaster Pistol");
        assert!(catalog
            .fetch(&ItemId("c".to_string()))
            .expect("fetch succeeds")
            .is_none());
    }

    #[test]
    fn parse_role_accepts_aliases() {
        assert_eq!(parse_role("Tank"), Ok(CombatRole::Defender));
        assert!(parse_role("bard").unwrap_err().contains("bard"));
    }

    #[test]
    fn load_character_reports_missing_files() {
        let error = load_character(Path::new("./no-such-character.json")).expect_err("io error");
        assert!(matches!(error, AppError::Io(_)));
    }
}
