//! Business Lead Finder
//!
//! Finds local businesses that lack a real website through a places search,
//! stores them as leads and serves a small read-only API over them.
//!
//! # Modules
//!
//! - `api`: HTTP-layer namespace.
//! - `core`: Domain-layer namespace.
//! - `data`: Data access layer.
//! - `integrations`: External service integrations.
//! - `collector`: Search-filter-upsert pipeline.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `lead_storage`: Postgres lead repository.
//! - `models`: Core data models.
//! - `places_client`: Places nearby-search client.
//! - `places_models`: Places API payload models.
//! - `qualification`: Real-website filter.
//! - `repository`: Lead repository contract and in-memory store.

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;

// Re-export primary modules for shared use in tests and binaries
pub mod collector;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod lead_storage;
pub mod models;
pub mod places_client;
pub mod places_models;
pub mod qualification;
pub mod repository;
