pub mod app_state;
pub mod process_routes;
