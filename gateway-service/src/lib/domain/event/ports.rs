use async_trait::async_trait;

use crate::credential::models::CredentialId;
use crate::event::errors::EventError;
use crate::event::models::Event;
use crate::event::models::EventCommand;
use crate::event::models::EventId;
use crate::event::models::NewEvent;
use crate::event::models::ReceivedLog;

/// Port for owner-scoped event operations.
#[async_trait]
pub trait EventServicePort: Send + Sync + 'static {
    /// List the events owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_events(&self, owner: &CredentialId) -> Result<Vec<Event>, EventError>;

    /// Create an event owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_event(
        &self,
        owner: &CredentialId,
        command: EventCommand,
    ) -> Result<Event, EventError>;

    /// Replace name and description of an event owned by `owner`.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_event(
        &self,
        owner: &CredentialId,
        id: &EventId,
        command: EventCommand,
    ) -> Result<Event, EventError>;

    /// Ownership check: the event, only if `owner` owns it.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn owned_event(&self, owner: &CredentialId, id: &EventId) -> Result<Event, EventError>;

    /// List logs received by events owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_received_logs(&self, owner: &CredentialId)
        -> Result<Vec<ReceivedLog>, EventError>;
}

/// Persistence operations for events and their received logs.
#[async_trait]
pub trait EventRepository: Send + Sync + 'static {
    /// Retrieve all events owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &CredentialId) -> Result<Vec<Event>, EventError>;

    /// Retrieve an event by id, only if `owner` owns it.
    async fn find_owned(
        &self,
        owner: &CredentialId,
        id: &EventId,
    ) -> Result<Option<Event>, EventError>;

    /// Persist a new event with `created_at` as both timestamps.
    async fn create(&self, event: NewEvent) -> Result<Event, EventError>;

    /// Write back name, description and `updated_at` of an owned event.
    ///
    /// # Errors
    /// * `NotFound` - No row matched both id and owner
    async fn update(&self, event: Event) -> Result<Event, EventError>;

    /// Retrieve the logs of every event owned by `owner`, newest first.
    async fn list_received_logs_by_owner(
        &self,
        owner: &CredentialId,
    ) -> Result<Vec<ReceivedLog>, EventError>;
}
