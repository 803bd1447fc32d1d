pub mod requests;
pub mod results;
