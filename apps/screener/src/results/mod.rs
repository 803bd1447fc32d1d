//! Results screen: filter, email templates, notices, downloads and the view model
//! that ties them to the screener service.

pub mod download;
pub mod email;
pub mod filter;
pub mod notify;
pub mod render;
pub mod view;

pub use filter::VerdictFilter;
pub use view::{NavigationState, ResultsView, Screen};
