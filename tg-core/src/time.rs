//! UTC instants and uniform sampling inside a time window.
//!
//! All instants that leave this module are truncated to whole seconds and rendered as
//! `YYYY-MM-DDTHH:MM:SS.000Z`.

use chrono::{
    DateTime,
    Duration,
    NaiveDateTime,
    SubsecRound,
    Utc,
};
use rand::Rng;
use rand_distr::{
    Distribution,
    Uniform,
};
use thiserror::Error;
use tracing::debug;

/// Output format: whole seconds with a literal `.000` and the UTC marker.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Accepted input format; the fractional part is optional.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Errors raised while building a [`TimeWindow`].
#[derive(Debug, Error)]
pub enum TimeWindowError {
    /// A boundary could not be parsed.
    #[error("invalid timestamp '{input}'; use ISO like 2025-07-14T09:51:36.000Z")]
    Malformed {
        /// The offending text.
        input: String,
        /// Underlying chrono error.
        #[source]
        source: chrono::ParseError,
    },

    /// `end` does not come strictly after `start`.
    #[error("end of time window ({end}) must be after its start ({start})")]
    Inverted {
        /// Window start, formatted.
        start: String,
        /// Window end, formatted.
        end: String,
    },
}

/// Parse `YYYY-MM-DDTHH:MM:SS[.fff]Z` as a UTC instant.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimeWindowError> {
    NaiveDateTime::parse_from_str(input.trim(), PARSE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| TimeWindowError::Malformed { input: input.to_owned(), source })
}

/// Render `ts` in [`TIMESTAMP_FORMAT`], dropping any sub-second part.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.trunc_subsecs(0).format(TIMESTAMP_FORMAT).to_string()
}

/// A closed `[start, end]` window with `end > start`.
#[derive(Clone, Debug)]
pub struct TimeWindow {
    /// Earliest instant.
    start: DateTime<Utc>,
    /// Latest instant.
    end: DateTime<Utc>,
    /// Millisecond offsets from `start`, inclusive of `end`.
    offsets: Uniform<i64>,
}

impl TimeWindow {
    /// Build a window, rejecting `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeWindowError> {
        if end <= start {
            return Err(TimeWindowError::Inverted { start: start.to_rfc3339(), end: end.to_rfc3339() });
        }

        let span_ms = (end - start).num_milliseconds();
        debug!(%start, %end, span_ms, "time window built");
        Ok(Self { start, end, offsets: Uniform::new_inclusive(0, span_ms) })
    }

    /// Build a window from two timestamp strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeWindowError> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    /// Earliest instant of the window.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Latest instant of the window.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Draw a uniformly distributed instant in the window, truncated to whole seconds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DateTime<Utc> {
        let offset = Duration::milliseconds(self.offsets.sample(rng));
        (self.start + offset).trunc_subsecs(0)
    }
}

/// `#[serde(with = "tg_core::time::utc_seconds")]` for `DateTime<Utc>` fields.
pub mod utc_seconds {
    use chrono::{
        DateTime,
        Utc,
    };
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
    };

    /// Serialize as `YYYY-MM-DDTHH:MM:SS.000Z`.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    /// Deserialize from `YYYY-MM-DDTHH:MM:SS[.fff]Z`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(serde::de::Error::custom)
    }
}
