//! Dashboard module
//!
//! Loads the transactions and balance from the API once per page load and
//! shows them as summary cards and a transactions table.

mod cards;
mod handlers;
mod load;
mod session;
mod table;

pub use handlers::{get_dashboard_content, get_dashboard_page};
pub use load::{DashboardView, LoadState, load_dashboard};
pub use session::DashboardSession;
