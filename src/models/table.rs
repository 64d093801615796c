use rusqlite::types::Value;

/// A normalized row bound for one destination table.
pub trait TableRow {
    const TABLE: &'static str;
    /// Destination column names, in the same order as [`TableRow::into_values`].
    const COLUMNS: &'static [&'static str];

    fn into_values(self) -> Vec<Value>;
}

/// Column-aligned rows for a single table, ready for a bulk insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn from_rows<R: TableRow>(rows: Vec<R>) -> Self {
        Self {
            name: R::TABLE,
            columns: R::COLUMNS,
            rows: rows.into_iter().map(TableRow::into_values).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[allow(dead_code)]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Value at `row` for the named column.
    #[allow(dead_code)]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }
}
