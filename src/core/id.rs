use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `<prefix>_<YYYYMMDD>_<sequence>`
static TICKET_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[A-Za-z][A-Za-z0-9]*)_(?P<date>\d{8})_(?P<seq>\d+)$")
        .expect("ticket id pattern is a valid regex")
});

/// Identifier of a ticket
///
/// Generated ids look like `tkt_20250101_3`. Any string is accepted as a key
/// for lookups, so ids from other sources still resolve to "not found"
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Build an id from its parts
    #[must_use]
    pub fn generate(prefix: &str, date: NaiveDate, sequence: u64) -> Self {
        Self(format!("{prefix}_{}_{sequence}", date.format("%Y%m%d")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has the generated `<prefix>_<YYYYMMDD>_<n>` shape
    #[must_use]
    pub fn is_generated(&self) -> bool {
        TICKET_ID_PATTERN.is_match(&self.0)
    }

    /// Sequence number of a generated id
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        TICKET_ID_PATTERN
            .captures(&self.0)
            .and_then(|caps| caps.name("seq"))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Creation date encoded in a generated id
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        TICKET_ID_PATTERN
            .captures(&self.0)
            .and_then(|caps| caps.name("date"))
            .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y%m%d").ok())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let id = TicketId::generate("tkt", date, 12);
        assert_eq!(id.as_str(), "tkt_20250307_12");
        assert!(id.is_generated());
        assert_eq!(id.sequence(), Some(12));
        assert_eq!(id.date(), Some(date));
    }

    #[test]
    fn test_foreign_ids_are_valid_keys() {
        let id = TicketId::from("nonexistent");
        assert!(!id.is_generated());
        assert_eq!(id.sequence(), None);
        assert_eq!(id.to_string(), "nonexistent");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = TicketId::from("tkt_20250101_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tkt_20250101_1\"");
        let user: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(user.as_str(), "u-1");
    }
}
