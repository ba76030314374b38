//! Property search service for a vacation-rental marketplace.
//!
//! Listings live in a document store and are served over a small REST API.
//! Searches can also run through [`search::SearchOrchestrator`], which falls
//! back from the store to a third-party listings API and finally to a
//! built-in dataset, so a caller always gets a result page back.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod sources;
pub mod startup;
pub mod store;
