//! The endpoint URIs served by the dashboard and consumed from the API.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content, loaded by the dashboard page once it is shown.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The transactions resource of the API, relative to the API's base URL.
pub const TRANSACTIONS_API: &str = "transactions";
