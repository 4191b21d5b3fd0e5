//! The Paths - decision-path exploration backend.
//!
//! A user describes a situation; the service obtains three AI-generated
//! outcome branches (positive/neutral/negative) and lets the user expand any
//! branch recursively into an explorable decision tree.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
