//! Core types, errors, and configuration for vardec.
//!
//! This crate provides the data structures shared by every vardec crate:
//! - [`types`] — Usage records, scope ranges, display decisions, and render tuples
//! - [`error`] — The [`AnalysisError`](error::AnalysisError) taxonomy
//! - [`config`] — Configuration loading from `.vardec/vardec.json`

pub mod config;
pub mod error;
pub mod types;
