pub mod grid;
pub mod schema;
