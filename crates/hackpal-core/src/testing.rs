//! In-memory repository and stub inference client for service tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use hackpal_types::chat::{
    DEFAULT_SESSION_STATUS, DEFAULT_SESSION_TITLE, Message, MessageRole, Session,
    SessionMetadata, SessionPatch,
};
use hackpal_types::error::{AccountError, InferenceError, RepositoryError};
use hackpal_types::inference::InferenceRequest;
use hackpal_types::user::{NewUser, User};
use uuid::Uuid;

use crate::inference::client::InferenceClient;
use crate::repository::message::MessageRepository;
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;
use crate::service::hash::CredentialHasher;

#[derive(Default)]
struct State {
    users: Vec<User>,
    sessions: Vec<Session>,
    messages: Vec<Message>,
    last_tick: Option<DateTime<Utc>>,
    writes: usize,
}

impl State {
    /// Strictly increasing clock so ordering assertions never tie.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(next);
        next
    }
}

/// Shared in-memory store implementing all three repository traits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create/update/touch operations performed so far.
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().unwrap().messages.len()
    }

    pub fn seed_user(&self, username: &str) -> User {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        user
    }
}

impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let missing = user.missing_fields();
        if !missing.is_empty() {
            return Err(RepositoryError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email '{}' already exists",
                user.email
            )));
        }
        let now = state.tick();
        let created = User {
            id: Uuid::now_v7(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(created.clone());
        state.writes += 1;
        Ok(created)
    }

    async fn find_user_by_id(&self, id: &Uuid) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }
}

impl SessionRepository for MemoryStore {
    async fn create_session(
        &self,
        user_id: &Uuid,
        title: Option<&str>,
    ) -> Result<Session, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let session = Session {
            id: Uuid::now_v7(),
            user_id: *user_id,
            title: title.unwrap_or(DEFAULT_SESSION_TITLE).to_string(),
            status: DEFAULT_SESSION_STATUS.to_string(),
            metadata: SessionMetadata::default(),
            created_at: now,
            updated_at: now,
        };
        state.sessions.push(session.clone());
        state.writes += 1;
        Ok(session)
    }

    async fn find_session(&self, id: &Uuid) -> Result<Option<Session>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.iter().find(|s| s.id == *id).cloned())
    }

    async fn find_session_for_owner(
        &self,
        id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Session>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .find(|s| s.id == *id && s.user_id == *user_id)
            .cloned())
    }

    async fn update_session(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        patch: &SessionPatch,
    ) -> Result<Option<Session>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let Some(session) = state
            .sessions
            .iter_mut()
            .find(|s| s.id == *id && s.user_id == *user_id)
        else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            session.title = title.clone();
        }
        if let Some(status) = &patch.status {
            session.status = status.clone();
        }
        session.updated_at = now;
        let updated = session.clone();
        state.writes += 1;
        Ok(Some(updated))
    }

    async fn touch_session(&self, id: &Uuid, has_pdf: bool) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        session.updated_at = now;
        if has_pdf {
            session.metadata.has_pdf = true;
        }
        state.writes += 1;
        Ok(())
    }

    async fn list_sessions_by_user(&self, user_id: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut sessions: Vec<Session> = state
            .sessions
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}

impl MessageRepository for MemoryStore {
    async fn create_message(
        &self,
        session_id: &Uuid,
        role: MessageRole,
        content: &str,
    ) -> Result<Message, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let message = Message {
            id: Uuid::now_v7(),
            session_id: *session_id,
            role,
            content: content.to_string(),
            created_at: now,
        };
        state.messages.push(message.clone());
        state.writes += 1;
        Ok(message)
    }

    async fn list_messages_by_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.session_id == *session_id)
            .cloned()
            .collect())
    }

    async fn find_first_user_message(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<Message>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .find(|m| m.session_id == *session_id && m.role == MessageRole::User)
            .cloned())
    }
}

#[derive(Clone)]
enum StubResult {
    Reply(String),
    Fail,
}

/// Inference client returning a canned reply or a canned failure.
#[derive(Clone)]
pub struct StubInference {
    result: StubResult,
    calls: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl StubInference {
    pub fn replying(reply: &str) -> Self {
        Self {
            result: StubResult::Reply(reply.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: StubResult::Fail,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<InferenceRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl InferenceClient for StubInference {
    fn name(&self) -> &str {
        "stub"
    }

    async fn reply(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.result {
            StubResult::Reply(text) => Ok(text.clone()),
            StubResult::Fail => Err(InferenceError::Status {
                status: 503,
                body: "model provider unavailable".to_string(),
            }),
        }
    }
}

/// Reversible "hash" so account tests stay fast.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        Ok(format!("plain:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        hash == format!("plain:{password}")
    }
}
