//! CineBot: answers Portuguese questions about the movie catalogue.
//!
//! This crate ties the store and the recommender together:
//! - config: where the CSV, database, model and scripts live
//! - setup: builds the database and the model from the CSV
//! - queries: best genre, top movies, similar movies
//! - chat: intent parsing and the Portuguese responses

pub mod chat;
pub mod config;
pub mod queries;
pub mod setup;
pub mod translations;

pub use chat::{CineBot, GREETING, Intent};
pub use config::AppConfig;
pub use queries::{MovieQueries, QueryContext};
pub use setup::{SetupReport, needs_setup, open, reload_model, reset, retrain, run_setup};
