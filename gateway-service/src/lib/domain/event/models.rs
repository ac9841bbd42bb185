use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::credential::models::CredentialId;
use crate::event::errors::EventDescriptionError;
use crate::event::errors::EventNameError;

/// Event aggregate entity.
///
/// A webhook target owned by exactly one credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub owner: CredentialId,
    pub name: EventName,
    pub description: EventDescription,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Event name value type
///
/// Between 1 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName(String);

impl EventName {
    const MIN_LENGTH: usize = 1;
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, EventNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(EventNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(EventNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Event description value type
///
/// At most 255 characters, may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescription(String);

impl EventDescription {
    const MAX_LENGTH: usize = 255;

    pub fn new(description: String) -> Result<Self, EventDescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            Err(EventDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A webhook delivery recorded against an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedLog {
    pub id: i64,
    pub event_id: EventId,
    pub source_ip: String,
    pub payload: String,
    pub received_at: DateTime<Utc>,
    pub fired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event row to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub owner: CredentialId,
    pub name: EventName,
    pub description: EventDescription,
    pub created_at: DateTime<Utc>,
}

/// Command to create or replace the editable fields of an event
#[derive(Debug)]
pub struct EventCommand {
    pub name: EventName,
    pub description: EventDescription,
}

impl EventCommand {
    pub fn new(name: EventName, description: EventDescription) -> Self {
        Self { name, description }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_bounds() {
        assert!(EventName::new("deploy".to_string()).is_ok());
        assert_eq!(
            EventName::new(String::new()),
            Err(EventNameError::TooShort { min: 1, actual: 0 })
        );
        assert_eq!(
            EventName::new("n".repeat(101)),
            Err(EventNameError::TooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_event_description_bounds() {
        assert!(EventDescription::new(String::new()).is_ok());
        assert!(EventDescription::new("d".repeat(255)).is_ok());
        assert_eq!(
            EventDescription::new("d".repeat(256)),
            Err(EventDescriptionError::TooLong {
                max: 255,
                actual: 256
            })
        );
    }
}
