pub mod model;

pub use model::{listing, load_hack, load_tables, parse_hack, Entry};
