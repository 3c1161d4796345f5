//! recgrid
//!
//! A generic record table engine: declarative columns, free-text search,
//! pluggable filters, tri-state sorting, pagination and identity-based
//! selection, plus a terminal console that drives it over JSON records.
//!
//! The engine (`model`, `state`) is pure and knows nothing about terminals.
//! `view` and `console` form the impure shell around it.

pub mod config;
pub mod console;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
