mod client;

pub use client::{CocktailClient, DrinkSource};
