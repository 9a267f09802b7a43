use super::{Priority, Status, TicketId, UserId};
use crate::error::{Result, TicketError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of trackable work
///
/// Tickets are built and mutated by the service layer only. Title and
/// description are never empty and `updated_at` never precedes `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TicketRecord")]
pub struct Ticket {
    ticket_id: TicketId,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_open: bool,
    assigned_to: Option<UserId>,
    created_by: Option<UserId>,
}

/// Wire form of a ticket, validated on the way in
#[derive(Deserialize)]
struct TicketRecord {
    ticket_id: TicketId,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default = "default_open")]
    is_open: bool,
    #[serde(default)]
    assigned_to: Option<UserId>,
    #[serde(default)]
    created_by: Option<UserId>,
}

const fn default_open() -> bool {
    true
}

impl TryFrom<TicketRecord> for Ticket {
    type Error = TicketError;

    fn try_from(record: TicketRecord) -> Result<Self> {
        validate_text("title", &record.title)?;
        validate_text("description", &record.description)?;
        if record.updated_at < record.created_at {
            return Err(TicketError::validation(
                "updated_at",
                "must not be earlier than created_at",
            ));
        }

        Ok(Self {
            ticket_id: record.ticket_id,
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_open: record.is_open,
            assigned_to: record.assigned_to,
            created_by: record.created_by,
        })
    }
}

pub(crate) fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TicketError::validation(field, "must not be empty"));
    }
    Ok(())
}

impl Ticket {
    /// Construct a ticket with both timestamps set to `now`
    pub(crate) fn new(
        ticket_id: TicketId,
        title: String,
        description: String,
        status: Status,
        priority: Priority,
        is_open: bool,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_text("title", &title)?;
        validate_text("description", &description)?;

        Ok(Self {
            ticket_id,
            title,
            description,
            status,
            priority,
            created_at: now,
            updated_at: now,
            is_open,
            assigned_to: None,
            created_by: None,
        })
    }

    #[must_use]
    pub const fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub const fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    #[must_use]
    pub const fn created_by(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    /// Whole days elapsed since creation
    #[must_use]
    pub fn age_in_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }

    /// Open and older than `threshold_days`
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>, threshold_days: i64) -> bool {
        self.is_open && self.age_in_days(now) > threshold_days
    }

    pub(crate) fn set_title(&mut self, title: String) -> Result<()> {
        validate_text("title", &title)?;
        self.title = title;
        Ok(())
    }

    pub(crate) fn set_description(&mut self, description: String) -> Result<()> {
        validate_text("description", &description)?;
        self.description = description;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
    }

    pub(crate) fn set_assigned_to(&mut self, user: Option<UserId>) {
        self.assigned_to = user;
    }

    pub(crate) fn set_created_by(&mut self, user: Option<UserId>) {
        self.created_by = user;
    }

    /// Close the ticket and mark it done
    pub(crate) fn close(&mut self) {
        self.is_open = false;
        self.status = Status::Done;
    }

    /// Reopen the ticket; a done ticket goes back to `ToDo`
    pub(crate) fn reopen(&mut self) {
        self.is_open = true;
        if self.status == Status::Done {
            self.status = Status::ToDo;
        }
    }

    /// Refresh `updated_at`. A clock running backwards never moves it back.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap()
    }

    fn ticket() -> Ticket {
        Ticket::new(
            TicketId::from("tkt_20250101_1"),
            "Fix bug".to_string(),
            "NPE on login".to_string(),
            Status::ToDo,
            Priority::Medium,
            true,
            at(1),
        )
        .unwrap()
    }

    #[test]
    fn test_new_ticket() {
        let ticket = ticket();
        assert_eq!(ticket.title(), "Fix bug");
        assert_eq!(ticket.created_at(), ticket.updated_at());
        assert!(ticket.assigned_to().is_none());
        assert!(ticket.created_by().is_none());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let err = Ticket::new(
            TicketId::from("x"),
            String::new(),
            "desc".to_string(),
            Status::ToDo,
            Priority::Low,
            true,
            at(1),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("title"));

        let err = Ticket::new(
            TicketId::from("x"),
            "title".to_string(),
            "   ".to_string(),
            Status::ToDo,
            Priority::Low,
            true,
            at(1),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }

    #[test]
    fn test_setters_keep_value_on_rejection() {
        let mut ticket = ticket();
        assert!(ticket.set_title(String::new()).is_err());
        assert_eq!(ticket.title(), "Fix bug");
        assert!(ticket.set_description("Stack trace attached".to_string()).is_ok());
        assert_eq!(ticket.description(), "Stack trace attached");
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut ticket = ticket();
        ticket.touch(at(3));
        assert_eq!(ticket.updated_at(), at(3));
        ticket.touch(at(2));
        assert_eq!(ticket.updated_at(), at(3));
        assert!(ticket.updated_at() >= ticket.created_at());
    }

    #[test]
    fn test_close_and_reopen() {
        let mut ticket = ticket();
        ticket.close();
        assert!(!ticket.is_open());
        assert_eq!(ticket.status(), Status::Done);

        ticket.reopen();
        assert!(ticket.is_open());
        assert_eq!(ticket.status(), Status::ToDo);

        ticket.set_status(Status::InProgress);
        ticket.reopen();
        assert_eq!(ticket.status(), Status::InProgress);
    }

    #[test]
    fn test_overdue() {
        let mut ticket = ticket();
        assert_eq!(ticket.age_in_days(at(1) + Duration::days(8)), 8);
        assert!(ticket.is_overdue(at(1) + Duration::days(8), 7));
        assert!(!ticket.is_overdue(at(1) + Duration::days(7), 7));

        ticket.set_open(false);
        assert!(!ticket.is_overdue(at(1) + Duration::days(30), 7));
    }

    #[test]
    fn test_serialized_fields() {
        let mut ticket = ticket();
        ticket.set_assigned_to(Some(UserId::from("u2")));
        let value = serde_json::to_value(&ticket).unwrap();

        assert_eq!(value["ticket_id"], "tkt_20250101_1");
        assert_eq!(value["status"], "ToDo");
        assert_eq!(value["priority"], "Medium");
        assert_eq!(value["is_open"], true);
        assert_eq!(value["assigned_to"], "u2");
        assert!(value["created_by"].is_null());
        assert_eq!(value["created_at"], "2025-01-01T09:00:00Z");
    }

    #[test]
    fn test_deserialize_validates() {
        let ticket = ticket();
        let mut value = serde_json::to_value(&ticket).unwrap();
        let parsed: Ticket = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(parsed, ticket);

        value["title"] = serde_json::json!("");
        assert!(serde_json::from_value::<Ticket>(value.clone()).is_err());

        value["title"] = serde_json::json!("ok");
        value["updated_at"] = serde_json::json!("2024-12-31T00:00:00Z");
        assert!(serde_json::from_value::<Ticket>(value).is_err());
    }
}
