//! Dashboard auto-refresh daemon library.

pub mod refresh;
