// Library exports for integration tests and the binary

pub mod api;
pub mod app_data;
pub mod cli;
pub mod config;
pub mod errors;
pub mod stores;
pub mod types;

pub use app_data::AppData;

#[cfg(test)]
mod test;
