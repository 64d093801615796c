use uuid::Uuid;

use crate::api::DrinkSource;
use crate::db::{DimensionResolver, Repository};
use crate::error::Result;

use super::batch::process_batch;
use super::loader::load_batch;

/// Counters for one full run over the alphabet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub letters_searched: usize,
    pub letters_skipped: usize,
    pub drinks_loaded: usize,
    pub unprocessed: usize,
    pub batches_aborted: usize,
    pub failed_loads: usize,
}

/// Fetches, normalizes and loads each letter in turn.
///
/// A fetch error stops the run. A malformed record drops its batch and a
/// failed table load is only logged; the loop moves on to the next letter
/// in both cases.
pub async fn run<D: DrinkSource>(
    source: &D,
    repo: &Repository,
    letters: &[char],
) -> Result<RunSummary> {
    let mut resolver = DimensionResolver::new(repo);
    let mut summary = RunSummary::default();

    for &letter in letters {
        tracing::info!("Searching the alphabet [{}], with endpoint: [f={}]", letter, letter);
        summary.letters_searched += 1;

        let drinks = source.search_by_first_letter(letter).await?;
        if drinks.is_empty() {
            tracing::info!("Skipping endpoint: [f={}] as it returned no drinks", letter);
            summary.letters_skipped += 1;
            continue;
        }

        let batch_id = Uuid::new_v4();
        let output = match process_batch(&mut resolver, drinks, batch_id).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Batch id: [{}] for letter [{}] dropped: {}", batch_id, letter, e);
                summary.batches_aborted += 1;
                continue;
            }
        };
        summary.unprocessed += output.unprocessed.len();

        let report = load_batch(
            repo,
            output.drinks,
            output.instructions,
            output.recipes,
            batch_id,
        )
        .await;
        summary.drinks_loaded += report.drinks_loaded();
        summary.failed_loads += report.failed_tables();
    }

    tracing::info!(
        "Run finished: {} letters searched ({} empty), {} drinks loaded, {} unprocessed, {} batches aborted, {} failed table loads, {} dimension values cached",
        summary.letters_searched,
        summary.letters_skipped,
        summary.drinks_loaded,
        summary.unprocessed,
        summary.batches_aborted,
        summary.failed_loads,
        resolver.cached()
    );

    Ok(summary)
}
