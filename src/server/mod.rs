pub mod app_state;
pub mod http;
pub mod startup;

pub use app_state::AppState;
pub use http::configure_routes;
pub use startup::start_server;
