mod batch;
mod driver;
mod loader;
mod normalizer;

pub use driver::run;
