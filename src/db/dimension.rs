use std::collections::HashMap;
use std::fmt;

use crate::error::{AppError, Result};

/// Stand-in name for a missing ingredient or measure.
pub const SENTINEL: &str = "N/A";

/// Categorical values stored in their own lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Glass,
    Category,
    Alcoholic,
    Ingredient,
    Measure,
}

impl Dimension {
    pub fn table(self) -> &'static str {
        match self {
            Dimension::Glass => "glass",
            Dimension::Category => "category",
            Dimension::Alcoholic => "alcoholic",
            Dimension::Ingredient => "ingredients",
            Dimension::Measure => "measures",
        }
    }

    pub fn name_column(self) -> &'static str {
        match self {
            Dimension::Glass => "glass_name",
            Dimension::Category => "category_name",
            Dimension::Alcoholic => "alcohol",
            Dimension::Ingredient => "ingredient_name",
            Dimension::Measure => "measure_quantity",
        }
    }

    /// Whether a missing value resolves to [`SENTINEL`] instead of failing.
    pub fn allows_sentinel(self) -> bool {
        matches!(self, Dimension::Ingredient | Dimension::Measure)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Lookup and insert access to the dimension tables.
#[allow(async_fn_in_trait)]
pub trait DimensionStore {
    async fn find(&self, dimension: Dimension, name: &str) -> Result<Option<i64>>;
    async fn insert(&self, dimension: Dimension, name: &str) -> Result<i64>;
}

/// Lookup-or-create for dimension values, with keys cached for the whole run.
pub struct DimensionResolver<'s, S> {
    store: &'s S,
    cache: HashMap<(Dimension, String), i64>,
}

impl<'s, S: DimensionStore> DimensionResolver<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    /// Surrogate key for `name`, inserting a new row the first time a name is seen.
    /// Names compare case-insensitively and ignore surrounding whitespace.
    pub async fn resolve(&mut self, dimension: Dimension, name: Option<&str>) -> Result<i64> {
        let name = normalize(dimension, name)?;
        let key = (dimension, name);

        if let Some(&id) = self.cache.get(&key) {
            return Ok(id);
        }

        let id = match self.store.find(dimension, &key.1).await? {
            Some(id) => id,
            None => {
                let id = self.store.insert(dimension, &key.1).await?;
                tracing::debug!("Added {} [{}] with id [{}]", dimension, key.1, id);
                id
            }
        };

        self.cache.insert(key, id);
        Ok(id)
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

fn normalize(dimension: Dimension, name: Option<&str>) -> Result<String> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => Ok(n.to_lowercase()),
        None if dimension.allows_sentinel() => Ok(SENTINEL.to_lowercase()),
        None => Err(AppError::MissingDimension(dimension.table())),
    }
}
