//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive `TuiApp<TestBackend>` with key events
//! against the users fixture.

mod acceptance_pagination;
mod acceptance_refresh;
mod acceptance_search;
mod acceptance_sort;
