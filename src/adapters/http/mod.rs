//! HTTP adapter: the render layer's wire interface.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::router;
