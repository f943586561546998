//! # Referral KPI Engine
//!
//! This crate computes the key performance indicators of a lead-generation
//! business paid by referral fees on signed cases, and the two series (net
//! profit and ROI against keeper volume) used to chart them.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of how inputs are collected or how
//!   charts are drawn. It depends only on `core-types`.
//! - **Coerce, Then Clamp:** Raw inputs are coerced to numbers, defaulted, and
//!   clamped into range before any formula runs. Only missing or non-numeric
//!   values are errors.
//! - **Sentinels, Not Errors:** Every zero denominator has a defined result (0,
//!   unbounded or undefined) so a valid scenario always produces a full report.
//!
//! ## Public API
//!
//! - `KpiEngine`: the stateless entry point.
//! - `KpiOutput`: the `KpiReport` plus the net profit and ROI `Series` and their `ChartMarkers`.
//! - `ValidationError`: the only error this crate returns.

pub mod economics;
pub mod engine;
pub mod error;
pub mod format;
pub mod inputs;
pub mod report;
pub mod series;
pub mod time_based;

pub use economics::{CoreEconomics, TargetRoi};
pub use engine::{KpiEngine, KpiOutput};
pub use error::ValidationError;
pub use report::KpiReport;
pub use series::{ChartMarkers, Series, SeriesBundle, SeriesPoint};
pub use time_based::TimeBasedKpis;
