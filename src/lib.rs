//! Finanwas - Personal finance backend
//!
//! This crate classifies investors from a short risk questionnaire and
//! protects its HTTP endpoints with per-client fixed-window rate limits.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
