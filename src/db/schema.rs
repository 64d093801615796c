pub const SCHEMA: &str = r#"
-- dimension tables
CREATE TABLE IF NOT EXISTS glass (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    glass_name TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE TABLE IF NOT EXISTS category (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE TABLE IF NOT EXISTS alcoholic (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    alcohol TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE TABLE IF NOT EXISTS ingredients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ingredient_name TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE TABLE IF NOT EXISTS measures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    measure_quantity TEXT NOT NULL UNIQUE COLLATE NOCASE
);

-- drinks table (id comes from the upstream record)
CREATE TABLE IF NOT EXISTS drinks (
    id INTEGER PRIMARY KEY,
    drink_name TEXT,
    alternate_drink_name TEXT,
    date_modified TEXT,
    glass_id INTEGER NOT NULL REFERENCES glass(id),
    category_id INTEGER NOT NULL REFERENCES category(id),
    alcoholic_id INTEGER NOT NULL REFERENCES alcoholic(id)
);

-- instructions table
CREATE TABLE IF NOT EXISTS instructions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    instructions_en TEXT,
    instructions_es TEXT,
    instructions_de TEXT,
    instructions_fr TEXT,
    instructions_it TEXT,
    instructions_zh_hans TEXT,
    instructions_zh_hant TEXT,
    drink_id INTEGER NOT NULL REFERENCES drinks(id)
);

CREATE INDEX IF NOT EXISTS idx_instructions_drink_id ON instructions(drink_id);

-- drink_recipe table
CREATE TABLE IF NOT EXISTS drink_recipe (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
    measure_id INTEGER NOT NULL REFERENCES measures(id),
    drink_id INTEGER NOT NULL REFERENCES drinks(id)
);

CREATE INDEX IF NOT EXISTS idx_drink_recipe_drink_id ON drink_recipe(drink_id);
"#;
