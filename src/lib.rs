pub mod config;
pub mod sheet;
pub mod store;
pub mod upload;
