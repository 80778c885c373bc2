//! Recipe Finder Library
//!
//! A two-tier cache (memory, then JSON files on disk) in front of the
//! Spoonacular recipe API, plus the command-line front end built on it.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod service;
