// Presentation layer - HTTP view of the display surface
pub mod app_state;
pub mod handlers;
