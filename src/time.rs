use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire format of Graph API timestamps, e.g. `2024-11-26T04:54:25+0000`
pub const GRAPH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Format of the `since` / `until` insight parameters
pub const GRAPH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Point in time as reported by the Graph API.
///
/// Keeps the offset the API sent so formatting reproduces the original text.
/// The zero value (absent, empty or `null` on the wire) is `GraphTime::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GraphTime(Option<DateTime<FixedOffset>>);

impl GraphTime {
    /// Wrap a point in time
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        GraphTime(Some(dt))
    }

    /// The zero value
    pub fn zero() -> Self {
        GraphTime(None)
    }

    /// Parse the vendor format. Empty input and the literal `null` yield the zero value.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let s = s.trim().trim_matches('"');
        if s.is_empty() || s == "null" {
            return Ok(GraphTime::zero());
        }
        DateTime::parse_from_str(s, GRAPH_TIME_FORMAT).map(GraphTime::new)
    }

    /// Format in the vendor format; the zero value formats as an empty string
    pub fn format(&self) -> String {
        match self.0 {
            Some(dt) => dt.format(GRAPH_TIME_FORMAT).to_string(),
            None => String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// Get the wrapped time, `None` for the zero value
    pub fn get(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// Get the time in UTC
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.0.map(|dt| dt.with_timezone(&Utc))
    }
}

/// Format a calendar date for the `since` / `until` parameters
pub fn format_date(date: NaiveDate) -> String {
    date.format(GRAPH_DATE_FORMAT).to_string()
}

impl fmt::Display for GraphTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<DateTime<FixedOffset>> for GraphTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        GraphTime::new(dt)
    }
}

impl From<DateTime<Utc>> for GraphTime {
    fn from(dt: DateTime<Utc>) -> Self {
        GraphTime::new(dt.fixed_offset())
    }
}

impl Serialize for GraphTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(_) => serializer.serialize_str(&self.format()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for GraphTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(s) => GraphTime::parse(&s).map_err(serde::de::Error::custom),
            None => Ok(GraphTime::zero()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json;

    #[test]
    fn test_parse_vendor_format() {
        let t = GraphTime::parse("2024-11-26T04:54:25+0000").unwrap();
        let utc = t.to_utc().unwrap();
        assert_eq!(utc.year(), 2024);
        assert_eq!(utc.month(), 11);
        assert_eq!(utc.day(), 26);
        assert_eq!(utc.hour(), 4);
        assert_eq!(utc.second(), 25);
    }

    #[test]
    fn test_format_keeps_offset() {
        for s in ["2024-11-26T04:54:25+0000", "2023-01-02T23:59:59+0530", "2020-02-29T00:00:00-0800"] {
            let t = GraphTime::parse(s).unwrap();
            assert_eq!(t.format(), s);
            assert_eq!(GraphTime::parse(&t.format()).unwrap(), t);
        }
    }

    #[test]
    fn test_empty_and_null_are_zero() {
        assert!(GraphTime::parse("").unwrap().is_zero());
        assert!(GraphTime::parse("null").unwrap().is_zero());
        assert_eq!(GraphTime::zero().format(), "");
    }

    #[test]
    fn test_invalid_text_is_error() {
        assert!(GraphTime::parse("yesterday").is_err());
    }

    #[test]
    fn test_json_deserialization() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            created_time: GraphTime,
        }

        let row: Row = serde_json::from_str(r#"{"created_time": "2024-11-26T04:54:25+0000"}"#).unwrap();
        assert!(!row.created_time.is_zero());

        let row: Row = serde_json::from_str(r#"{"created_time": null}"#).unwrap();
        assert!(row.created_time.is_zero());

        let row: Row = serde_json::from_str(r#"{"created_time": ""}"#).unwrap();
        assert!(row.created_time.is_zero());

        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(row.created_time.is_zero());
    }

    #[test]
    fn test_json_serialization() {
        let t = GraphTime::parse("2024-11-26T04:54:25+0000").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), r#""2024-11-26T04:54:25+0000""#);
        assert_eq!(serde_json::to_string(&GraphTime::zero()).unwrap(), "null");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }
}
