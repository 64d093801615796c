use std::fmt;

use uuid::Uuid;

use crate::db::Repository;
use crate::error::Result;
use crate::models::Table;

/// Per-table outcomes of loading one batch. Failures are kept as values.
#[derive(Debug)]
pub struct LoadReport {
    pub drinks: Result<usize>,
    pub instructions: Result<usize>,
    pub recipes: Result<usize>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.drinks.is_ok() && self.instructions.is_ok() && self.recipes.is_ok()
    }

    pub fn failed_tables(&self) -> usize {
        [&self.drinks, &self.instructions, &self.recipes]
            .iter()
            .filter(|r| r.is_err())
            .count()
    }

    pub fn drinks_loaded(&self) -> usize {
        self.drinks.as_ref().copied().unwrap_or(0)
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INSTRUCTIONS TABLE: {}, DRINKS TABLE: {}, RECIPE TABLE: {}",
            outcome(&self.instructions),
            outcome(&self.drinks),
            outcome(&self.recipes)
        )
    }
}

fn outcome(result: &Result<usize>) -> String {
    match result {
        Ok(rows) => format!("ok ({} rows)", rows),
        Err(e) => e.to_string(),
    }
}

/// Inserts one table. Errors are returned, never propagated past the caller.
pub async fn load_table(repo: &Repository, table: Table) -> Result<usize> {
    let name = table.name;
    let rows = table.len();
    let result = repo.bulk_insert(table).await;
    match &result {
        Ok(inserted) => tracing::debug!("Inserted {} of {} rows into {}", inserted, rows, name),
        Err(e) => tracing::warn!("Bulk insert into {} failed: {}", name, e),
    }
    result
}

/// Loads all three tables of a batch. Each table commits on its own and a
/// failure in one does not stop the others from being attempted.
pub async fn load_batch(
    repo: &Repository,
    drinks: Table,
    instructions: Table,
    recipes: Table,
    batch_id: Uuid,
) -> LoadReport {
    tracing::info!("Loading data for batch id: [{}]", batch_id);

    let report = LoadReport {
        drinks: load_table(repo, drinks).await,
        instructions: load_table(repo, instructions).await,
        recipes: load_table(repo, recipes).await,
    };

    if report.is_success() {
        tracing::info!(
            "Records for batch id: [{}] processed and loaded successfully",
            batch_id
        );
    } else {
        tracing::error!(
            "Errors encountered: [{}], while loading data for batch id: [{}]",
            report,
            batch_id
        );
    }

    report
}
