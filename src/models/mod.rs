mod drink;
mod table;

pub use drink::*;
pub use table::*;
