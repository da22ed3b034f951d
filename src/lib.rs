//! Intake Agent — adaptive conversational intake core.

pub mod config;
pub mod error;
pub mod friction;
pub mod llm;
pub mod profile;
pub mod relevance;
pub mod routes;
pub mod session;
pub mod store;
pub mod widget;
