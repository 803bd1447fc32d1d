pub mod api_client;
pub mod config;
pub mod errors;
pub mod models;
pub mod results;
pub mod service;
pub mod session;

#[cfg(test)]
mod test_support;
