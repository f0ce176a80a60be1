//! Larder API core
//!
//! Persistence core of a restaurant supply-chain platform: a unit
//! conversion registry, the supplier/ingredient catalog, and the
//! transactional order/procurement ledger. HTTP routing and process
//! bootstrap live in the server crate; this crate exposes typed
//! services that return `Result<_, ServiceError>`.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod events;
pub mod logging;
pub mod migrator;
pub mod models;
pub mod queries;
pub mod services;

pub use errors::ServiceError;
pub use services::AppServices;
