//! Human-relative timestamps.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// `HH:MM:SS DD-MM-YYYY <zone>`.
pub const DATE_FORMAT: &str = "%H:%M:%S %d-%m-%Y %Z";

/// Age at which timestamps switch from relative to absolute.
const ABSOLUTE_AFTER_MINUTES: i64 = 30;

/// Format `t` in `tz` using [`DATE_FORMAT`].
pub fn format_absolute<Tz>(t: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    t.with_timezone(tz).format(DATE_FORMAT).to_string()
}

/// Pretty print `t` relative to `now`.
///
/// Thirty minutes or older renders as an absolute timestamp in `tz`; under a
/// minute renders as `"<S> seconds ago"`; anything between renders as
/// `"<M> minutes, <S> seconds ago"`. A `t` in the future counts as zero
/// seconds ago.
pub fn pretty_print_time<Tz>(now: DateTime<Utc>, t: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now.signed_duration_since(t).num_seconds().max(0);
    let minutes = elapsed / 60;

    if minutes >= ABSOLUTE_AFTER_MINUTES {
        format_absolute(t, tz)
    } else if minutes > 0 {
        format!("{minutes} minutes, {} seconds ago", elapsed % 60)
    } else {
        format!("{elapsed} seconds ago")
    }
}

/// Zone used to display absolute timestamps.
///
/// A `Named` zone prints its abbreviation (`CET`, `PDT`). `Local` is used
/// when the platform zone cannot be resolved and prints the UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Named(Tz),
    Local,
}

impl DisplayZone {
    pub const UTC: Self = Self::Named(Tz::UTC);

    /// Resolve the platform's local zone.
    pub fn detect() -> Self {
        match iana_time_zone::get_timezone() {
            Ok(name) => Self::from_name(&name),
            Err(e) => {
                debug!(error = %e, "Local time zone unavailable, showing UTC offsets");
                Self::Local
            }
        }
    }

    /// Look up an IANA zone name such as `Europe/Berlin`.
    pub fn from_name(name: &str) -> Self {
        name.parse::<Tz>().map_or_else(
            |_| {
                debug!(zone = name, "Unknown time zone, showing UTC offsets");
                Self::Local
            },
            Self::Named,
        )
    }

    /// [`format_absolute`] in this zone.
    pub fn format_absolute(self, t: DateTime<Utc>) -> String {
        match self {
            Self::Named(tz) => format_absolute(t, &tz),
            Self::Local => format_absolute(t, &chrono::Local),
        }
    }

    /// [`pretty_print_time`] in this zone.
    pub fn pretty_print(self, now: DateTime<Utc>, t: DateTime<Utc>) -> String {
        match self {
            Self::Named(tz) => pretty_print_time(now, t, &tz),
            Self::Local => pretty_print_time(now, t, &chrono::Local),
        }
    }
}
