//! Angam oracle for the festival engine.
//!
//! This crate provides:
//! - The five angam kinds (tithi, nakshatra, yoga, karana, solar rashi)
//! - The [`Ephemeris`] seam and the oracle queries built on it
//!   ([`angam_at`], [`angam_span`], [`angam_transitions`])
//! - A mean-motion reference ephemeris and ayanamsha systems
//! - Gregorian date and Julian Day helpers

pub mod angam;
pub mod ayanamsha;
pub mod calendar;
pub mod ephemeris;
pub mod error;
pub mod mean_motion;
pub mod oracle;
pub mod riseset;
pub mod search;
pub mod util;

pub use angam::{
    ALL_ANGAM_KINDS, ANGAM_KIND_COUNT, AngamKind, AngamNeighbours, AngamSpan, AngamTransition,
    angam_from_angle, next_angam, previous_angam,
};
pub use ayanamsha::{AyanamshaSystem, ayanamsha_deg};
pub use calendar::{GregorianDate, J2000_JD, calendar_to_jd, jd_to_calendar, weekday_from_jd};
pub use ephemeris::Ephemeris;
pub use error::BaseError;
pub use mean_motion::MeanMotionEphemeris;
pub use oracle::{angam_at, angam_float, angam_span, angam_transitions, lagna_transitions};
pub use riseset::{GeoLocation, Luminary, RiseSetEvent, approximate_local_noon_jd, local_midnight_jd};
