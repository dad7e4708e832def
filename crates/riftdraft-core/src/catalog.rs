//! The item catalog and its loader seam.
//!
//! The catalog is loaded once per session, before the first draft runs,
//! and is immutable afterwards. Loading goes through the [`CatalogSource`]
//! trait so the transport layer can plug in a real remote loader; any
//! failure falls back to the built-in sample list and is never surfaced
//! to players.

use riftdraft_protocol::Item;

/// Failure of an external catalog source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog source failed: {0}")]
    Source(String),
}

/// An external supplier of the item list.
pub trait CatalogSource {
    async fn load(&self) -> std::result::Result<Vec<Item>, CatalogError>;
}

/// A source that returns a fixed list. Useful for tests and offline play.
#[derive(Debug, Clone)]
pub struct FixedCatalog(pub Vec<Item>);

impl CatalogSource for FixedCatalog {
    async fn load(&self) -> std::result::Result<Vec<Item>, CatalogError> {
        Ok(self.0.clone())
    }
}

/// Names for the built-in fallback list.
const SAMPLE_NAMES: [&str; 38] = [
    "Ahri", "Akali", "Ashe", "Azir", "Brand", "Caitlyn", "Darius", "Diana",
    "Ezreal", "Fiora", "Garen", "Graves", "Heimerdinger", "Irelia", "Jax",
    "Jinx", "Karma", "Katarina", "LeBlanc", "Lee Sin", "Lux", "Malphite",
    "Master Yi", "Morgana", "Nasus", "Orianna", "Pantheon", "Quinn",
    "Riven", "Sona", "Teemo", "Thresh", "Urgot", "Vayne", "Wukong",
    "Xerath", "Yasuo", "Zed",
];

/// An immutable list of selectable items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, dropping any item whose id repeats.
    pub fn new(items: Vec<Item>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        Self { items }
    }

    /// The built-in sample catalog used when no source is available.
    pub fn sample() -> Self {
        let items = SAMPLE_NAMES
            .iter()
            .map(|name| Item::new(slug(name), *name))
            .collect();
        Self { items }
    }

    /// Loads from `source`, falling back to the sample list on failure
    /// or an empty result. Load failure is recovered here, not reported.
    pub async fn load_or_sample<S: CatalogSource>(source: &S) -> Self {
        match source.load().await {
            Ok(items) if !items.is_empty() => {
                tracing::info!(count = items.len(), "catalog loaded");
                Self::new(items)
            }
            Ok(_) => {
                tracing::warn!("catalog source returned no items, using sample list");
                Self::sample()
            }
            Err(err) => {
                tracing::warn!(%err, "catalog load failed, using sample list");
                Self::sample()
            }
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// `"Lee Sin"` → `"leesin"`.
fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
