//! canvass-core — Question model, grading and tabulation engine.
//!
//! This crate defines the question variants, answer validation rules,
//! correctness judging, grading and tabulation that the rest of canvass
//! builds on.

pub mod answer;
pub mod capture;
pub mod definition;
pub mod edit;
pub mod error;
pub mod grade;
pub mod model;
pub mod oracle;
pub mod tabulate;
