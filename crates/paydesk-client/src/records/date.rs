use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

use crate::{ClientError, ClientResult};

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Inclusive calendar-date bounds. A missing side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// A record without a usable date only passes an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// A backend timestamp, read in the dashboard's local offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    local: Option<NaiveDateTime>,
}

impl Timestamp {
    pub fn parse(raw: &str, offset: FixedOffset) -> Self {
        let local = parse_local_datetime(raw, offset);
        if local.is_none() && !raw.trim().is_empty() {
            tracing::warn!(timestamp = raw, "timestamp is not ISO-8601; dropping it from date math");
        }
        Self {
            raw: raw.to_string(),
            local,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn local(&self) -> Option<NaiveDateTime> {
        self.local
    }

    pub fn local_date(&self) -> Option<NaiveDate> {
        self.local.map(|value| value.date())
    }

    pub fn local_hour(&self) -> Option<u32> {
        self.local.map(|value| value.hour())
    }

    pub fn display(&self) -> String {
        match self.local {
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.raw.clone(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

pub fn build_date_range(
    from: Option<&str>,
    to: Option<&str>,
    command: &str,
) -> ClientResult<DateRange> {
    let parsed_from = match from {
        Some(value) => Some(parse_iso_date_strict(value, "from", command)?),
        None => None,
    };
    let parsed_to = match to {
        Some(value) => Some(parse_iso_date_strict(value, "to", command)?),
        None => None,
    };

    if let (Some(start), Some(end)) = (parsed_from, parsed_to)
        && start > end
    {
        return Err(ClientError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(DateRange {
        from: parsed_from,
        to: parsed_to,
    })
}

pub fn parse_iso_date_strict(
    value: &str,
    field_name: &str,
    command: &str,
) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

/// Offset-qualified timestamps are shifted into `offset`; bare timestamps are
/// already local wall-clock time.
fn parse_local_datetime(raw: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(value.with_timezone(&offset).naive_local());
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(value);
        }
    }

    if looks_like_iso_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }

    None
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}
