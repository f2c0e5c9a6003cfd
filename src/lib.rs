//! Cricklytics
//!
//! Analytics over an IPL ball-by-ball dataset: shot effectiveness, bowling
//! line/length insights, batsman strengths and weaknesses, toss impact, and
//! per-phase player profiles.
//!
//! This library provides:
//! - `dataset`: dataset acquisition, typed loading, and schema validation
//! - `analysis`: the filter pipeline, aggregation engine, and phase classifier
//! - `pipeline`: per-view computations shared by the CLI and the GUI
//!
//! Binaries:
//! - `ipl-csv`: run any analysis view from the command line
//! - `cricklytics-ui`: tabbed graphical dashboard

pub mod analysis;
pub mod dataset;
pub mod pipeline;

// Re-export the types most callers need
pub use analysis::{Aggregates, FilterClause, GroupKey, Phase};
pub use dataset::{Column, Dataset, Delivery};
