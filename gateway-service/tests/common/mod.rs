use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;
use gateway_service::credential::errors::CredentialError;
use gateway_service::credential::models::Credential;
use gateway_service::credential::models::CredentialId;
use gateway_service::credential::models::EmailAddress;
use gateway_service::credential::models::NewCredential;
use gateway_service::credential::ports::CredentialRepository;
use gateway_service::credential::service::CredentialService;
use gateway_service::event::errors::EventError;
use gateway_service::event::models::Event;
use gateway_service::event::models::EventId;
use gateway_service::event::models::NewEvent;
use gateway_service::event::models::ReceivedLog;
use gateway_service::event::ports::EventRepository;
use gateway_service::event::service::EventService;
use gateway_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-64-bytes-long-for-hs512";
pub const TEST_SALT: &str = "test-salt";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub credentials: Arc<InMemoryCredentialRepository>,
    pub events: Arc<InMemoryEventRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let credentials = Arc::new(InMemoryCredentialRepository::default());
        let events = Arc::new(InMemoryEventRepository::default());
        let authenticator = Arc::new(Authenticator::new(
            TEST_SECRET,
            TEST_SALT,
            Duration::days(30),
        ));

        let credential_service = Arc::new(CredentialService::new(
            Arc::clone(&credentials),
            Arc::clone(&authenticator),
        ));
        let event_service = Arc::new(EventService::new(Arc::clone(&events)));

        let router = create_router(credential_service, event_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            credentials,
            events,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Sign up through the API and return (token, user id)
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> (String, i64) {
        let response = self
            .post("/api/sign_up")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
        )
    }
}

/// Credential store kept in a vector, ids assigned sequentially from 1
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    rows: Mutex<Vec<Credential>>,
}

impl InMemoryCredentialRepository {
    /// Flip the enabled flag off, as account management would
    pub fn disable(&self, id: i64) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|c| c.id == CredentialId(id)) {
            row.enabled = false;
            row.updated_at = Utc::now();
        }
    }

    pub fn stored_digest(&self, id: i64) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == CredentialId(id))
            .map(|c| c.password_digest.clone())
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_enabled_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id && c.enabled)
            .cloned())
    }

    async fn find_enabled_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == *email && c.enabled)
            .cloned())
    }

    async fn insert(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.email == credential.email) {
            return Err(CredentialError::EmailAlreadyExists(
                credential.email.as_str().to_string(),
            ));
        }

        let stored = Credential {
            id: CredentialId(rows.len() as i64 + 1),
            name: credential.name,
            email: credential.email,
            password_digest: credential.password_digest,
            enabled: true,
            created_at: credential.created_at,
            updated_at: credential.created_at,
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}

/// Event store kept in vectors, ids assigned sequentially from 1
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: Mutex<Vec<Event>>,
    logs: Mutex<Vec<ReceivedLog>>,
}

impl InMemoryEventRepository {
    /// Record a webhook delivery, as the ingestion path would
    pub fn receive_log(&self, event_id: i64, payload: &str) {
        let mut logs = self.logs.lock().unwrap();
        let now = Utc::now();
        let id = logs.len() as i64 + 1;
        logs.push(ReceivedLog {
            id,
            event_id: EventId(event_id),
            source_ip: "203.0.113.7".to_string(),
            payload: payload.to_string(),
            received_at: now,
            fired_at: None,
            created_at: now,
            updated_at: now,
        });
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_by_owner(&self, owner: &CredentialId) -> Result<Vec<Event>, EventError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner == *owner)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        owner: &CredentialId,
        id: &EventId,
    ) -> Result<Option<Event>, EventError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == *id && e.owner == *owner)
            .cloned())
    }

    async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
        let mut events = self.events.lock().unwrap();
        let stored = Event {
            id: EventId(events.len() as i64 + 1),
            owner: event.owner,
            name: event.name,
            description: event.description,
            created_at: event.created_at,
            updated_at: event.created_at,
        };
        events.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, event: Event) -> Result<Event, EventError> {
        let mut events = self.events.lock().unwrap();
        let row = events
            .iter_mut()
            .find(|e| e.id == event.id && e.owner == event.owner)
            .ok_or(EventError::NotFound(event.id.to_string()))?;
        *row = event.clone();
        Ok(event)
    }

    async fn list_received_logs_by_owner(
        &self,
        owner: &CredentialId,
    ) -> Result<Vec<ReceivedLog>, EventError> {
        let owned: Vec<EventId> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner == *owner)
            .map(|e| e.id)
            .collect();

        Ok(self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| owned.contains(&l.event_id))
            .cloned()
            .collect())
    }
}
