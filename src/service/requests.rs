//! Typed requests accepted by the ticket service
//!
//! Adapters holding loosely-typed input (JSON bodies, form maps) convert it
//! once with `from_json`; the service itself only sees typed values.

use crate::core::{Priority, Status, UserId};
use crate::error::{Result, TicketError};
use crate::payload;
use serde_json::Value;

/// Input for creating a ticket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    /// Required unless a description placeholder is configured
    pub description: Option<String>,
    /// Defaults to `ToDo`
    pub status: Option<Status>,
    /// Defaults to `Medium`
    pub priority: Option<Priority>,
    /// Defaults to open
    pub is_open: Option<bool>,
    pub assignee_id: Option<UserId>,
    pub created_by: Option<UserId>,
}

impl NewTicket {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    #[must_use]
    pub fn assignee(mut self, user: impl Into<UserId>) -> Self {
        self.assignee_id = Some(user.into());
        self
    }

    #[must_use]
    pub fn created_by(mut self, user: impl Into<UserId>) -> Self {
        self.created_by = Some(user.into());
        self
    }

    /// Parse `{"title": ..., "description": ..., "status": ..., ...}`
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = payload::as_object("ticket", value)?
            .ok_or_else(|| TicketError::validation("title", "is required"))?;
        let title = payload::optional_str(map, "title")?
            .ok_or_else(|| TicketError::validation("title", "is required"))?;

        Ok(Self {
            title,
            description: payload::optional_str(map, "description")?,
            status: payload::optional_enum(map, "status")?,
            priority: payload::optional_enum(map, "priority")?,
            is_open: payload::optional_bool(map, "is_open")?,
            assignee_id: payload::optional_str(map, "assignee_id")?.map(UserId::from),
            created_by: payload::optional_str(map, "created_by")?.map(UserId::from),
        })
    }
}

/// Partial update of a ticket; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub is_open: Option<bool>,
    /// `Some(None)` clears the assignment
    pub assignee_id: Option<Option<UserId>>,
}

impl TicketUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    #[must_use]
    pub fn assignee(mut self, user: Option<UserId>) -> Self {
        self.assignee_id = Some(user);
        self
    }

    /// True when no field would be applied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Parse a partial update map such as `{"priority": "High"}`
    ///
    /// Unknown keys are ignored. `"assignee_id": null` clears the assignee.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(map) = payload::as_object("update", value)? else {
            return Ok(Self::default());
        };

        Ok(Self {
            title: payload::optional_str(map, "title")?,
            description: payload::optional_str(map, "description")?,
            status: payload::optional_enum(map, "status")?,
            priority: payload::optional_enum(map, "priority")?,
            is_open: payload::optional_bool(map, "is_open")?,
            assignee_id: payload::nullable_str(map, "assignee_id")?
                .map(|user| user.map(UserId::from)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_ticket_from_json() {
        let request = NewTicket::from_json(&json!({
            "title": "Fix bug",
            "description": "NPE on login",
            "priority": "high",
            "assignee_id": "u2"
        }))
        .unwrap();

        assert_eq!(
            request,
            NewTicket::new("Fix bug")
                .description("NPE on login")
                .priority(Priority::High)
                .assignee("u2")
        );
        assert_eq!(request.status, None);
    }

    #[test]
    fn test_new_ticket_requires_title() {
        let err = NewTicket::from_json(&json!({"description": "no title"})).unwrap_err();
        assert_eq!(err.field(), Some("title"));
        let err = NewTicket::from_json(&Value::Null).unwrap_err();
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_new_ticket_rejects_unknown_status() {
        let err = NewTicket::from_json(&json!({"title": "t", "status": "Blocked"})).unwrap_err();
        assert_eq!(err.field(), Some("status"));
    }

    #[test]
    fn test_update_from_json() {
        let update = TicketUpdate::from_json(&json!({"priority": "High", "color": "red"})).unwrap();
        assert_eq!(update, TicketUpdate::new().priority(Priority::High));
        assert!(!update.is_empty());

        let update = TicketUpdate::from_json(&json!({"assignee_id": null})).unwrap();
        assert_eq!(update.assignee_id, Some(None));

        assert!(TicketUpdate::from_json(&json!({})).unwrap().is_empty());
        assert!(TicketUpdate::from_json(&json!({"is_open": 5})).is_err());
    }
}
