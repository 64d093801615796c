use crate::db::{Dimension, DimensionResolver, DimensionStore};
use crate::error::{AppError, Result};
use crate::models::{
    DrinkRow, InstructionsRow, RawDrink, RecipeRow, INSTRUCTION_LOCALES, RECIPE_SLOTS,
};

/// One upstream drink split into its table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDrink {
    pub drink: DrinkRow,
    pub instructions: InstructionsRow,
    pub recipe: Vec<RecipeRow>,
}

pub async fn normalize<S: DimensionStore>(
    resolver: &mut DimensionResolver<'_, S>,
    raw: &RawDrink,
) -> Result<NormalizedDrink> {
    let drink_id = raw.drink_id()?;

    let drink = drink_row(resolver, raw, drink_id).await?;
    let instructions = instructions_row(raw, drink_id);
    let recipe = recipe_rows(resolver, raw, drink_id).await?;

    Ok(NormalizedDrink {
        drink,
        instructions,
        recipe,
    })
}

async fn drink_row<S: DimensionStore>(
    resolver: &mut DimensionResolver<'_, S>,
    raw: &RawDrink,
    drink_id: i64,
) -> Result<DrinkRow> {
    let glass_id = resolve_required(resolver, raw, Dimension::Glass, "strGlass").await?;
    let category_id = resolve_required(resolver, raw, Dimension::Category, "strCategory").await?;
    let alcoholic_id = resolve_required(resolver, raw, Dimension::Alcoholic, "strAlcoholic").await?;

    Ok(DrinkRow {
        id: drink_id,
        drink_name: raw.name().map(str::to_string),
        alternate_drink_name: raw.field("strDrinkAlternate").map(str::to_string),
        date_modified: raw.field("dateModified").map(str::to_string),
        glass_id,
        category_id,
        alcoholic_id,
    })
}

async fn resolve_required<S: DimensionStore>(
    resolver: &mut DimensionResolver<'_, S>,
    raw: &RawDrink,
    dimension: Dimension,
    field: &str,
) -> Result<i64> {
    resolver
        .resolve(dimension, raw.field(field))
        .await
        .map_err(|e| match e {
            AppError::MissingDimension(_) => AppError::malformed(
                raw.name().unwrap_or("<unnamed>"),
                format!("{} is missing", field),
            ),
            other => other,
        })
}

fn instructions_row(raw: &RawDrink, drink_id: i64) -> InstructionsRow {
    InstructionsRow {
        drink_id,
        texts: INSTRUCTION_LOCALES.map(|(field, _)| raw.field(field).map(str::to_string)),
    }
}

async fn recipe_rows<S: DimensionStore>(
    resolver: &mut DimensionResolver<'_, S>,
    raw: &RawDrink,
    drink_id: i64,
) -> Result<Vec<RecipeRow>> {
    let mut rows = Vec::new();

    for slot in 1..=RECIPE_SLOTS {
        let ingredient = present(raw.ingredient(slot));
        let measure = present(raw.measure(slot));
        if ingredient.is_none() && measure.is_none() {
            continue;
        }

        rows.push(RecipeRow {
            ingredient_id: resolver.resolve(Dimension::Ingredient, ingredient).await?,
            measure_id: resolver.resolve(Dimension::Measure, measure).await?,
            drink_id,
        });
    }

    Ok(rows)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
