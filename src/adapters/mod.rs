//! Adapters: concrete implementations of the ports and the HTTP surface.

pub mod ai;
pub mod http;
