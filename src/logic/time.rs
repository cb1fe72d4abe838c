// Time-related operations.
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};

// Use this format for formatting and parsing dates.
static ISO_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// JSON serialisation and deserialisation for ISO dates.
pub mod iso_date_format {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.serialize_str(&super::date_to_string(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        super::string_to_date(&s).map_err(serde::de::Error::custom)
    }
}

// Same as above, for dates that may be missing.
pub mod optional_iso_date_format {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        match date {
            Some(d) => serializer.serialize_some(&super::date_to_string(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where D: Deserializer<'de> {
        let o: Option<String> = Option::deserialize(deserializer)?;
        match o.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::string_to_date(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

// Convert a Date object to an ISO string.
pub fn date_to_string(date: Date) -> String {
    // The format only has numeric components, so formatting cannot fail for a valid Date.
    date.format(&ISO_FORMAT).unwrap_or_default()
}

// Convert an ISO string to a Date object.
pub fn string_to_date(date: &str) -> Result<Date, String> {
    Date::parse(date.trim(), ISO_FORMAT).map_err(|_| format!("\"{}\" is not a date (expected YYYY-MM-DD)", date.trim()))
}

// Parse an optional date field from a form, where an empty value means no date.
pub fn optional_string_to_date(date: &str) -> Result<Option<Date>, String> {
    match date.trim() {
        "" => Ok(None),
        s => string_to_date(s).map(Some),
    }
}

// Get the current local date, falling back to UTC when the offset is unknown.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

// Check whether a date falls inside a window. An open end means no upper bound.
pub fn is_within(date: Date, start: Date, end: Option<Date>) -> bool {
    if date < start { return false; }
    match end {
        Some(end) => date <= end,
        None => true,
    }
}
