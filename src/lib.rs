//! Receipt Points API Library
//!
//! Accepts purchase receipts over HTTP, stores them in memory under a
//! generated id, and scores them against a fixed set of loyalty rules.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Receipt and response models.
//! - `routes`: Router construction.
//! - `scoring`: Points rules.
//! - `services`: Receipt submission and points lookup.
//! - `store`: In-memory receipt storage.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;
pub mod store;
