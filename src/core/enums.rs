use crate::error::{Result, TicketError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow stage of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    ToDo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Canonical string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "ToDo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }

    /// Next stage in the usual workflow. `Done` stays `Done`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ToDo => Self::InProgress,
            Self::InProgress | Self::Done => Self::Done,
        }
    }
}

/// Urgency of a ticket, ordered from `Low` to `Critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Canonical string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Numeric weight used for sorting, 1 (`Low`) to 4 (`Critical`)
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

/// Role of a user. Permission checks live outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Member, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Admin => "Admin",
        }
    }
}

/// Case-insensitive lookup of `value` among the canonical names of `variants`
fn parse_canonical<T: Copy>(
    field: &str,
    value: &str,
    variants: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T> {
    let wanted = value.trim();
    variants
        .iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let valid: Vec<_> = variants.iter().map(|v| name(*v)).collect();
            TicketError::validation(
                field,
                format!("unknown value '{value}', expected one of: {}", valid.join(", ")),
            )
        })
}

impl FromStr for Status {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self> {
        parse_canonical("status", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for Priority {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self> {
        parse_canonical("priority", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for Role {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self> {
        parse_canonical("role", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
