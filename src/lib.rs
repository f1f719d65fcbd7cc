//! catchfix - catch block migration for PHP API clients
//!
//! catchfix is a CLI tool and library that finds the three-statement
//! `catch (GuzzleException $e)` idiom (extract message, log, re-raise) and
//! rewrites it so the error data and error code are extracted, logged and
//! passed to the domain exception.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, reporting, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Matching, replacement, idempotency gate and per-file migration

pub mod cli;
pub mod config;
pub mod core;
