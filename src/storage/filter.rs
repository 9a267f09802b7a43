//! Conjunctive ticket filters

use crate::core::{Priority, Status, Ticket, UserId};
use crate::error::{Result, TicketError};
use crate::payload;
use serde_json::Value;
use std::str::FromStr;

/// Filter over stored tickets
///
/// Every present criterion must hold (logical AND). An empty filter matches
/// every ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub is_open: Option<bool>,
    pub assigned_to: Option<UserId>,
    pub created_by: Option<UserId>,
}

impl TicketFilter {
    /// A filter that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, user: impl Into<UserId>) -> Self {
        self.assigned_to = Some(user.into());
        self
    }

    #[must_use]
    pub fn with_creator(mut self, user: impl Into<UserId>) -> Self {
        self.created_by = Some(user.into());
        self
    }

    /// True when no criterion is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether `ticket` satisfies every present criterion
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.status.is_none_or(|s| ticket.status() == s)
            && self.priority.is_none_or(|p| ticket.priority() == p)
            && self.is_open.is_none_or(|o| ticket.is_open() == o)
            && self
                .assigned_to
                .as_ref()
                .is_none_or(|u| ticket.assigned_to() == Some(u))
            && self
                .created_by
                .as_ref()
                .is_none_or(|u| ticket.created_by() == Some(u))
    }

    /// Parse a filter map such as `{"status": "ToDo", "is_open": true}`
    ///
    /// `null` yields the empty filter. Unknown keys are ignored; known keys
    /// with unrecognised values are rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(map) = payload::as_object("filters", value)? else {
            return Ok(Self::default());
        };

        Ok(Self {
            status: payload::optional_enum(map, "status")?,
            priority: payload::optional_enum(map, "priority")?,
            is_open: payload::optional_bool(map, "is_open")?,
            assigned_to: payload::optional_str(map, "assigned_to")?.map(UserId::from),
            created_by: payload::optional_str(map, "created_by")?.map(UserId::from),
        })
    }
}

/// Parses expressions like `status:ToDo priority:high is_open:true`
impl FromStr for TicketFilter {
    type Err = TicketError;

    fn from_str(expression: &str) -> Result<Self> {
        let mut filter = Self::default();

        for part in expression.split_whitespace() {
            let Some((key, value)) = part.split_once(':') else {
                return Err(TicketError::validation(
                    "filters",
                    format!("'{part}' is not a key:value pair"),
                ));
            };
            match key.to_lowercase().as_str() {
                "status" => filter.status = Some(value.parse()?),
                "priority" => filter.priority = Some(value.parse()?),
                "is_open" | "open" => filter.is_open = Some(payload::parse_bool("is_open", value)?),
                "assigned_to" | "assignee" => filter.assigned_to = Some(UserId::from(value)),
                "created_by" | "creator" => filter.created_by = Some(UserId::from(value)),
                _ => {},
            }
        }

        Ok(filter)
    }
}
