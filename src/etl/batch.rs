use uuid::Uuid;

use crate::db::{DimensionResolver, DimensionStore};
use crate::error::Result;
use crate::models::{RawDrink, Table, REQUIRED_INSTRUCTIONS_FIELD};

use super::normalizer::normalize;

/// Result of normalizing one letter's worth of drinks.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    /// Records left out because they have no German instructions, untouched.
    pub unprocessed: Vec<RawDrink>,
    pub instructions: Table,
    pub drinks: Table,
    pub recipes: Table,
}

/// Normalizes `records` in input order. A malformed record fails the whole batch.
pub async fn process_batch<S: DimensionStore>(
    resolver: &mut DimensionResolver<'_, S>,
    records: Vec<RawDrink>,
    batch_id: Uuid,
) -> Result<BatchOutput> {
    tracing::info!(
        "batch id: [{}] processing [{}] number of records",
        batch_id,
        records.len()
    );

    let total = records.len();
    let mut unprocessed = Vec::new();
    let mut instructions = Vec::new();
    let mut drinks = Vec::new();
    let mut recipes = Vec::new();

    for record in records {
        let name = record.name().unwrap_or_default().to_string();
        let raw_id = record.raw_id().unwrap_or_default();

        if !record.has_required_instructions() {
            tracing::info!(
                "Skipping drink: [{}] with drink id: [{}] and batch id: [{}] because {} is missing",
                name,
                raw_id,
                batch_id,
                REQUIRED_INSTRUCTIONS_FIELD
            );
            unprocessed.push(record);
            continue;
        }

        tracing::info!(
            "Processing drink: [{}] with drink id: [{}] and batch id: [{}]",
            name,
            raw_id,
            batch_id
        );
        let normalized = normalize(resolver, &record).await.inspect_err(|e| {
            tracing::error!("Aborting batch id: [{}] at drink [{}]: {}", batch_id, name, e);
        })?;

        drinks.push(normalized.drink);
        instructions.push(normalized.instructions);
        recipes.extend(normalized.recipe);
    }

    tracing::info!(
        "Processed [{}] records with batch id: [{}] ({} loaded, {} unprocessed)",
        total,
        batch_id,
        drinks.len(),
        unprocessed.len()
    );

    Ok(BatchOutput {
        unprocessed,
        instructions: Table::from_rows(instructions),
        drinks: Table::from_rows(drinks),
        recipes: Table::from_rows(recipes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Dimension, MemoryStore};
    use crate::error::AppError;
    use crate::etl::normalizer::tests::mojito;
    use rusqlite::types::Value;
    use serde_json::json;

    fn drink(id: &str, name: &str, german: Option<&str>) -> RawDrink {
        serde_json::from_value(json!({
            "idDrink": id,
            "strDrink": name,
            "strGlass": "Cocktail glass",
            "strCategory": "Ordinary Drink",
            "strAlcoholic": "Alcoholic",
            "strInstructions": "Shake.",
            "strInstructionsDE": german,
            "strIngredient1": "Gin",
            "strMeasure1": "1 oz",
            "strIngredient3": "Lemon",
            "strMeasure3": "1 slice"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn records_without_german_instructions_are_set_aside() {
        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);
        let skipped = drink("2", "Skipped", None);

        let output = process_batch(
            &mut resolver,
            vec![drink("1", "Kept", Some("")), skipped.clone(), drink("3", "Also kept", Some("Schütteln."))],
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        assert_eq!(output.unprocessed, vec![skipped]);
        assert_eq!(output.drinks.len(), 2);
        assert_eq!(output.instructions.len(), 2);
        assert_eq!(output.recipes.len(), 4);
        assert_eq!(output.drinks.get(0, "id"), Some(&Value::Integer(1)));
        assert_eq!(output.drinks.get(1, "id"), Some(&Value::Integer(3)));
        assert!((0..output.recipes.len()).all(|i| output.recipes.get(i, "drink_id") != Some(&Value::Integer(2))));
    }

    #[tokio::test]
    async fn tables_keep_fixed_column_order() {
        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);

        // Same record with its keys inserted in reverse order.
        let mut reversed = serde_json::Map::new();
        for (k, v) in mojito().0.into_iter().rev() {
            reversed.insert(k, v);
        }
        let original_keys: Vec<String> = mojito().0.keys().cloned().collect();
        let reversed_keys: Vec<String> = reversed.keys().cloned().collect();
        assert_ne!(original_keys, reversed_keys);

        let output = process_batch(&mut resolver, vec![RawDrink(reversed)], Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(
            output.drinks.columns,
            [
                "drink_name",
                "alternate_drink_name",
                "date_modified",
                "glass_id",
                "category_id",
                "alcoholic_id",
                "id"
            ]
        );
        assert_eq!(
            output.instructions.columns,
            [
                "instructions_en",
                "instructions_es",
                "instructions_de",
                "instructions_fr",
                "instructions_it",
                "instructions_zh_hans",
                "instructions_zh_hant",
                "drink_id"
            ]
        );
        assert_eq!(output.recipes.columns, ["ingredient_id", "measure_id", "drink_id"]);
    }

    #[tokio::test]
    async fn unprocessed_records_keep_upstream_field_order() {
        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);
        let payload = r#"{"strInstructionsDE": null, "strDrink": "Zombie", "idDrink": "15", "dateModified": null}"#;
        let record: RawDrink = serde_json::from_str(payload).unwrap();

        let output = process_batch(&mut resolver, vec![record], Uuid::new_v4())
            .await
            .unwrap();

        let keys: Vec<&str> = output.unprocessed[0].0.keys().map(String::as_str).collect();
        assert_eq!(keys, ["strInstructionsDE", "strDrink", "idDrink", "dateModified"]);
        assert_eq!(serde_json::to_string(&output.unprocessed[0]).unwrap(), payload.replace(' ', ""));
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_tables() {
        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);

        let output = process_batch(&mut resolver, vec![drink("9", "Dry", None)], Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(output.unprocessed.len(), 1);
        assert!(output.drinks.is_empty());
        assert!(output.instructions.is_empty());
        assert!(output.recipes.is_empty());
        assert_eq!(output.drinks.columns.len(), 7);
        assert_eq!(output.instructions.columns.len(), 8);
        assert_eq!(output.recipes.columns.len(), 3);
    }

    #[tokio::test]
    async fn prefix_matches_processing_the_prefix_alone() {
        let records = vec![
            drink("1", "One", Some("a")),
            drink("2", "Two", None),
            drink("3", "Three", Some("c")),
        ];

        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);
        let full = process_batch(&mut resolver, records.clone(), Uuid::new_v4())
            .await
            .unwrap();

        let prefix_store = MemoryStore::default();
        let mut prefix_resolver = DimensionResolver::new(&prefix_store);
        let prefix = process_batch(&mut prefix_resolver, records[..2].to_vec(), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(prefix.drinks.rows[..], full.drinks.rows[..1]);
        assert_eq!(prefix.instructions.rows[..], full.instructions.rows[..1]);
        assert_eq!(prefix.recipes.rows[..], full.recipes.rows[..2]);
        assert_eq!(prefix.unprocessed, full.unprocessed);
    }

    #[tokio::test]
    async fn keys_are_shared_across_batches() {
        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);

        let first = process_batch(&mut resolver, vec![drink("1", "One", Some("a"))], Uuid::new_v4())
            .await
            .unwrap();
        let second = process_batch(&mut resolver, vec![drink("2", "Two", Some("b"))], Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(first.drinks.get(0, "glass_id"), second.drinks.get(0, "glass_id"));
        assert_eq!(store.names(Dimension::Ingredient), vec!["gin", "lemon"]);
    }

    #[tokio::test]
    async fn malformed_record_aborts_the_batch() {
        let store = MemoryStore::default();
        let mut resolver = DimensionResolver::new(&store);

        let err = process_batch(
            &mut resolver,
            vec![drink("1", "Fine", Some("a")), drink("x1", "Broken", Some("b"))],
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::MalformedRecord { .. }));
    }
}
