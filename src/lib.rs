//! Verdict core library.
//!
//! This crate exposes programmatic APIs for turning raw add-on validation
//! documents into tiered, renderable reports.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `classify`: Severity parsing, sort ranks, and compat overrides.
//! - `tier`: Per-tier accumulation, tally, and pass/fail status.
//! - `context`: Nested path joining, dedenting, and context line numbering.
//! - `report`: Report assembly from a parsed document, including crash fallback.
//! - `models`: Data models for the input document and rendered output structs.
//! - `output`: Human/JSON printers for render/check.
//!
//! Note: All documentation comments are written in English by convention.
pub mod classify;
pub mod cli;
pub mod config;
pub mod context;
pub mod models;
pub mod output;
pub mod report;
pub mod tier;
