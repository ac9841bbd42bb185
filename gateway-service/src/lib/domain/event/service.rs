use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::credential::models::CredentialId;
use crate::event::errors::EventError;
use crate::event::models::Event;
use crate::event::models::EventCommand;
use crate::event::models::EventId;
use crate::event::models::NewEvent;
use crate::event::models::ReceivedLog;
use crate::event::ports::EventRepository;
use crate::event::ports::EventServicePort;

/// Domain service implementation for event operations.
pub struct EventService<ER>
where
    ER: EventRepository,
{
    repository: Arc<ER>,
}

impl<ER> EventService<ER>
where
    ER: EventRepository,
{
    pub fn new(repository: Arc<ER>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<ER> EventServicePort for EventService<ER>
where
    ER: EventRepository,
{
    async fn list_events(&self, owner: &CredentialId) -> Result<Vec<Event>, EventError> {
        self.repository.list_by_owner(owner).await
    }

    async fn create_event(
        &self,
        owner: &CredentialId,
        command: EventCommand,
    ) -> Result<Event, EventError> {
        let event = self
            .repository
            .create(NewEvent {
                owner: *owner,
                name: command.name,
                description: command.description,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(event_id = %event.id, owner = %owner, "Event created");

        Ok(event)
    }

    async fn update_event(
        &self,
        owner: &CredentialId,
        id: &EventId,
        command: EventCommand,
    ) -> Result<Event, EventError> {
        let mut event = self.owned_event(owner, id).await?;

        event.name = command.name;
        event.description = command.description;
        event.updated_at = Utc::now();

        self.repository.update(event).await
    }

    async fn owned_event(&self, owner: &CredentialId, id: &EventId) -> Result<Event, EventError> {
        self.repository
            .find_owned(owner, id)
            .await?
            .ok_or(EventError::NotFound(id.to_string()))
    }

    async fn list_received_logs(
        &self,
        owner: &CredentialId,
    ) -> Result<Vec<ReceivedLog>, EventError> {
        self.repository.list_received_logs_by_owner(owner).await
    }
}
