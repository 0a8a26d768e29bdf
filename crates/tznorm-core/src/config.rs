//! Application timezone configuration.
//!
//! The reference timezone every normalized instant is expressed in comes
//! from the deployment's configuration, not from this crate. The
//! [`TimezoneProvider`] trait is that configuration seam: the normalizer
//! consults it on every call that needs the application zone, so a
//! provider backed by live configuration takes effect without restarts.
//!
//! Providers are infallible. A deployment without a resolvable
//! application timezone is an environment error to be handled long
//! before this library is called.

use chrono_tz::Tz;

use crate::error::{NormalizeError, Result};

/// Source of the application's reference timezone.
pub trait TimezoneProvider: Send + Sync {
    /// Returns the application timezone. Consulted per call, never cached here.
    fn app_timezone(&self) -> Tz;
}

/// Provider with a fixed timezone, for tests and single-zone deployments.
#[derive(Debug, Clone, Copy)]
pub struct StaticTimezone(pub Tz);

impl TimezoneProvider for StaticTimezone {
    fn app_timezone(&self) -> Tz {
        self.0
    }
}

impl TimezoneProvider for Tz {
    fn app_timezone(&self) -> Tz {
        *self
    }
}

impl<'a, P: TimezoneProvider> TimezoneProvider for &'a P {
    fn app_timezone(&self) -> Tz {
        (**self).app_timezone()
    }
}

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use tznorm_core::config::parse_tz;
///
/// let tz = parse_tz("Europe/Amsterdam").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Amsterdam");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| NormalizeError::InvalidTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_timezone() {
        let tz = parse_tz("Europe/Amsterdam").unwrap();
        assert_eq!(tz.to_string(), "Europe/Amsterdam");
    }

    #[test]
    fn parse_invalid_timezone() {
        let result = parse_tz("Invalid/Timezone");
        assert!(result.is_err());
        if let Err(NormalizeError::InvalidTimezone(name)) = result {
            assert_eq!(name, "Invalid/Timezone");
        } else {
            panic!("Expected InvalidTimezone error");
        }
    }

    #[test]
    fn static_provider_returns_its_zone() {
        let provider = StaticTimezone(chrono_tz::UTC);
        assert_eq!(provider.app_timezone(), chrono_tz::UTC);
    }
}
