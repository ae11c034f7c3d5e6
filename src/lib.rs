//! The `taskpad` library crate.
//!
//! Contains the configuration, error handling, authentication layer (session
//! tokens, CSRF protection, password hashing), domain models, store adapter
//! and HTTP routes for the taskpad service. The binary crate (`main.rs`) wires
//! these together into a running server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
