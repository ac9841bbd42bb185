use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::credential::models::CredentialId;
use crate::event::errors::EventError;
use crate::event::models::Event;
use crate::event::models::EventDescription;
use crate::event::models::EventId;
use crate::event::models::EventName;
use crate::event::models::NewEvent;
use crate::event::models::ReceivedLog;
use crate::event::ports::EventRepository;

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EventRow {
    id: i64,
    user_id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = EventError;

    fn try_from(r: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId(r.id),
            owner: CredentialId(r.user_id),
            name: EventName::new(r.name)?,
            description: EventDescription::new(r.description)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ReceivedLogRow {
    id: i64,
    event_id: i64,
    source_ip: String,
    payload: String,
    received_at: DateTime<Utc>,
    fired_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReceivedLogRow> for ReceivedLog {
    fn from(r: ReceivedLogRow) -> Self {
        ReceivedLog {
            id: r.id,
            event_id: EventId(r.event_id),
            source_ip: r.source_ip,
            payload: r.payload,
            received_at: r.received_at,
            fired_at: r.fired_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn list_by_owner(&self, owner: &CredentialId) -> Result<Vec<Event>, EventError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM events
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn find_owned(
        &self,
        owner: &CredentialId,
        id: &EventId,
    ) -> Result<Option<Event>, EventError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM events
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        row.map(Event::try_from).transpose()
    }

    async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (user_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, user_id, name, description, created_at, updated_at
            "#,
        )
        .bind(event.owner.0)
        .bind(event.name.as_str())
        .bind(event.description.as_str())
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        Event::try_from(row)
    }

    async fn update(&self, event: Event) -> Result<Event, EventError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = $3, description = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(event.id.0)
        .bind(event.owner.0)
        .bind(event.name.as_str())
        .bind(event.description.as_str())
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(event.id.to_string()));
        }

        Ok(event)
    }

    async fn list_received_logs_by_owner(
        &self,
        owner: &CredentialId,
    ) -> Result<Vec<ReceivedLog>, EventError> {
        let rows = sqlx::query_as::<_, ReceivedLogRow>(
            r#"
            SELECT l.id, l.event_id, l.source_ip, l.payload, l.received_at, l.fired_at,
                   l.created_at, l.updated_at
            FROM received_logs l
            INNER JOIN events e ON e.id = l.event_id
            WHERE e.user_id = $1
            ORDER BY l.received_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(ReceivedLog::from).collect())
    }
}
