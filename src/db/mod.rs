mod dimension;
mod repository;
mod schema;

pub use dimension::{Dimension, DimensionResolver, DimensionStore};
pub use repository::Repository;

#[cfg(test)]
pub(crate) use dimension::tests::MemoryStore;
