use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::error::{AppError, Result};

use super::table::TableRow;

/// Number of ingredient/measure slots on an upstream drink record.
pub const RECIPE_SLOTS: usize = 15;

pub const LOCALE_COUNT: usize = 7;

/// Upstream instruction fields and the column each one lands in, in table order.
pub const INSTRUCTION_LOCALES: [(&str, &str); LOCALE_COUNT] = [
    ("strInstructions", "instructions_en"),
    ("strInstructionsES", "instructions_es"),
    ("strInstructionsDE", "instructions_de"),
    ("strInstructionsFR", "instructions_fr"),
    ("strInstructionsIT", "instructions_it"),
    ("strInstructionsZH-HANS", "instructions_zh_hans"),
    ("strInstructionsZH-HANT", "instructions_zh_hant"),
];

/// Field whose presence decides whether a drink gets loaded.
pub const REQUIRED_INSTRUCTIONS_FIELD: &str = "strInstructionsDE";

/// A drink object exactly as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDrink(pub Map<String, serde_json::Value>);

impl RawDrink {
    /// String value of a field. JSON null and missing keys are both `None`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.field("strDrink")
    }

    pub fn raw_id(&self) -> Option<String> {
        match self.0.get("idDrink") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn drink_id(&self) -> Result<i64> {
        let label = self.name().unwrap_or("<unnamed>");
        match self.0.get("idDrink") {
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| AppError::malformed(label, format!("idDrink {} is not an integer", n))),
            Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
                AppError::malformed(label, format!("idDrink {:?} is not an integer", s))
            }),
            Some(other) => Err(AppError::malformed(
                label,
                format!("idDrink has unexpected value {}", other),
            )),
            None => Err(AppError::malformed(label, "idDrink is missing")),
        }
    }

    pub fn has_required_instructions(&self) -> bool {
        self.field(REQUIRED_INSTRUCTIONS_FIELD).is_some()
    }

    pub fn ingredient(&self, slot: usize) -> Option<&str> {
        self.field(&format!("strIngredient{}", slot))
    }

    pub fn measure(&self, slot: usize) -> Option<&str> {
        self.field(&format!("strMeasure{}", slot))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrinkRow {
    pub id: i64,
    pub drink_name: Option<String>,
    pub alternate_drink_name: Option<String>,
    pub date_modified: Option<String>,
    pub glass_id: i64,
    pub category_id: i64,
    pub alcoholic_id: i64,
}

impl TableRow for DrinkRow {
    const TABLE: &'static str = "drinks";
    const COLUMNS: &'static [&'static str] = &[
        "drink_name",
        "alternate_drink_name",
        "date_modified",
        "glass_id",
        "category_id",
        "alcoholic_id",
        "id",
    ];

    fn into_values(self) -> Vec<Value> {
        vec![
            opt_text(self.drink_name),
            opt_text(self.alternate_drink_name),
            opt_text(self.date_modified),
            Value::Integer(self.glass_id),
            Value::Integer(self.category_id),
            Value::Integer(self.alcoholic_id),
            Value::Integer(self.id),
        ]
    }
}

/// Instruction texts indexed like [`INSTRUCTION_LOCALES`].
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionsRow {
    pub drink_id: i64,
    pub texts: [Option<String>; LOCALE_COUNT],
}

impl InstructionsRow {
    #[allow(dead_code)]
    pub fn text(&self, column: &str) -> Option<&str> {
        INSTRUCTION_LOCALES
            .iter()
            .position(|(_, col)| *col == column)
            .and_then(|i| self.texts[i].as_deref())
    }
}

impl TableRow for InstructionsRow {
    const TABLE: &'static str = "instructions";
    const COLUMNS: &'static [&'static str] = &[
        "instructions_en",
        "instructions_es",
        "instructions_de",
        "instructions_fr",
        "instructions_it",
        "instructions_zh_hans",
        "instructions_zh_hant",
        "drink_id",
    ];

    fn into_values(self) -> Vec<Value> {
        let mut values: Vec<Value> = self.texts.into_iter().map(opt_text).collect();
        values.push(Value::Integer(self.drink_id));
        values
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeRow {
    pub ingredient_id: i64,
    pub measure_id: i64,
    pub drink_id: i64,
}

impl TableRow for RecipeRow {
    const TABLE: &'static str = "drink_recipe";
    const COLUMNS: &'static [&'static str] = &["ingredient_id", "measure_id", "drink_id"];

    fn into_values(self) -> Vec<Value> {
        vec![
            Value::Integer(self.ingredient_id),
            Value::Integer(self.measure_id),
            Value::Integer(self.drink_id),
        ]
    }
}

fn opt_text(value: Option<String>) -> Value {
    value.map(Value::Text).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawDrink {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn null_and_missing_fields_are_none() {
        let drink = raw(json!({"strDrink": "Mojito", "strDrinkAlternate": null}));
        assert_eq!(drink.name(), Some("Mojito"));
        assert_eq!(drink.field("strDrinkAlternate"), None);
        assert_eq!(drink.field("strTags"), None);
    }

    #[test]
    fn drink_id_accepts_string_and_number() {
        assert_eq!(raw(json!({"idDrink": "11000"})).drink_id().unwrap(), 11000);
        assert_eq!(raw(json!({"idDrink": 17222})).drink_id().unwrap(), 17222);
    }

    #[test]
    fn drink_id_rejects_garbage() {
        let err = raw(json!({"strDrink": "Bad", "idDrink": "abc"}))
            .drink_id()
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { .. }));
        assert!(raw(json!({"strDrink": "Missing"})).drink_id().is_err());
    }

    #[test]
    fn empty_german_instructions_still_count_as_present() {
        assert!(raw(json!({"strInstructionsDE": ""})).has_required_instructions());
        assert!(!raw(json!({"strInstructionsDE": null})).has_required_instructions());
        assert!(!raw(json!({})).has_required_instructions());
    }

    #[test]
    fn instruction_columns_follow_locale_table() {
        let locale_columns: Vec<&str> = INSTRUCTION_LOCALES.iter().map(|(_, c)| *c).collect();
        assert_eq!(&InstructionsRow::COLUMNS[..7], locale_columns.as_slice());
        assert_eq!(InstructionsRow::COLUMNS[7], "drink_id");
    }

    #[test]
    fn drink_row_values_follow_column_order() {
        let row = DrinkRow {
            id: 11000,
            drink_name: Some("Mojito".to_string()),
            alternate_drink_name: None,
            date_modified: Some("2016-11-04 09:17:09".to_string()),
            glass_id: 1,
            category_id: 2,
            alcoholic_id: 3,
        };
        assert_eq!(
            row.into_values(),
            vec![
                Value::Text("Mojito".to_string()),
                Value::Null,
                Value::Text("2016-11-04 09:17:09".to_string()),
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
                Value::Integer(11000),
            ]
        );
    }
}
