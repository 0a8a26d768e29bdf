//! # tznorm-core
//!
//! A timezone-consistent timestamp normalization library for Rust.
//!
//! Distributed systems pass timestamps as strings across process and UI
//! boundaries, and ambiguity about the zone or format variant of a string
//! corrupts data silently. This library centralizes every parse, convert
//! and format path so exactly one timezone-conversion policy applies
//! everywhere:
//!
//! - **One application zone**: every parsed instant is returned in the
//!   application's reference timezone, supplied per call by an injected
//!   [`TimezoneProvider`].
//! - **One local zone**: location-specific formatting (wall-clock time,
//!   Planon exchange) uses the fixed [`LOCAL_ZONE`] constant.
//! - **No format guessing**: each parse function binds to exactly one
//!   [`FormatSpec`]; mismatched input fails, either with an error or with
//!   a `None` sentinel depending on the function's documented contract.
//! - **Injected clock**: "now" and "today" queries go through the
//!   [`Clock`] trait, so time-dependent behavior is testable.
//!
//! ## Example
//!
//! ```rust
//! use tznorm_core::prelude::*;
//!
//! let normalizer = Normalizer::system(chrono_tz::UTC);
//!
//! // Strings with a non-UTC designator are rejected by the UTC parser.
//! let instant = normalizer.from_utc_string("2024-01-01T09:30:00Z").unwrap();
//! assert!(normalizer.from_utc_string("2024-01-01T09:30:00+02:00").is_err());
//!
//! assert_eq!(to_iso_string(&instant), "2024-01-01T09:30:00.000000Z");
//! assert_eq!(to_local_time_string(&instant), "10:30");
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;

// Re-export commonly used types at the crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{StaticTimezone, TimezoneProvider, parse_tz};
pub use error::{NormalizeError, Result};
pub use models::{FormatSpec, NormalizedTimestamp};
pub use normalize::{
    LOCAL_ZONE, Normalizer, PLANON_PATTERN, add_days_to_copy, copy_of, format_instant,
    resolve_local, to_date_string, to_iso_string, to_legacy_iso_string, to_local_time_string,
    to_planon_string,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tznorm_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::{StaticTimezone, TimezoneProvider, parse_tz};
    pub use crate::error::{NormalizeError, Result};
    pub use crate::models::{FormatSpec, NormalizedTimestamp};
    pub use crate::normalize::{
        LOCAL_ZONE, Normalizer, add_days_to_copy, copy_of, format_instant, to_date_string,
        to_iso_string, to_legacy_iso_string, to_local_time_string, to_planon_string,
    };
}
