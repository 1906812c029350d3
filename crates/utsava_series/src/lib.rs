//! Time-series store of daily panchangam data.
//!
//! This crate provides:
//! - [`DayRecord`]: sunrise/sunset/moonrise/moonset, per-kind angam
//!   transitions, solar month and month-day, lunar month
//! - [`TimeSeries`]: the immutable, bounds-checked store and its
//!   instant-level angam lookups
//! - [`build_series`]: sequential construction from an ephemeris
//! - [`Kaala`] windows and the four-sample [`kaala_angams`] pattern
//! - [`synthetic::SeriesFixture`] for handcrafted stores

pub mod builder;
pub mod config;
pub mod day;
pub mod error;
pub mod kaala;
pub mod lunar;
pub mod series;
pub mod solar;
pub mod synthetic;

pub use builder::build_series;
pub use config::{LOOKAHEAD_DAYS, PanchangaConfig};
pub use day::{DayOrdinal, DayRecord, LunarMonth};
pub use error::SeriesError;
pub use kaala::{GHATIKAS_PER_DAY, Kaala, KaalaWindow, kaala_angams, kaala_windows};
pub use series::{AngamSegment, TimeSeries};
