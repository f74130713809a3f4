//! Command implementations for the sigcat CLI.

pub mod convert;
pub mod html;
pub mod join;
pub mod libraries;
pub mod scrape;
