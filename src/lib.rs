pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod loader;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
