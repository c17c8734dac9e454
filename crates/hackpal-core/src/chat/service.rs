//! Conversation service orchestrating sessions, messages, and inference.
//!
//! ConversationService enforces the business rules across the user, session,
//! and message repositories and coordinates the round-trip to the inference
//! collaborator for each posted message.

use hackpal_types::chat::{
    ATTACHMENT_ONLY_PLACEHOLDER, Message, MessageRole, Session, SessionPatch, SessionSummary,
};
use hackpal_types::error::ChatError;
use hackpal_types::inference::{Attachment, InferenceRequest};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::turn::{CompletedTurn, TurnState};
use crate::inference::client::InferenceClient;
use crate::repository::message::MessageRepository;
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;

const SESSION_NOT_FOUND: &str = "Session not found";
const USER_NOT_FOUND: &str = "User not found";

/// A user turn as decoded by the route layer, independent of body encoding.
#[derive(Debug, Clone, Default)]
pub struct PostMessage {
    pub user_id: Option<String>,
    pub content: Option<String>,
    pub attachment: Option<Attachment>,
}

/// Orchestrates session lifecycle and message persistence.
///
/// Generic over the repository and inference traits to maintain clean
/// architecture (hackpal-core never depends on hackpal-infra).
pub struct ConversationService<U, S, M, I>
where
    U: UserRepository,
    S: SessionRepository,
    M: MessageRepository,
    I: InferenceClient,
{
    user_repo: U,
    session_repo: S,
    message_repo: M,
    inference: I,
}

impl<U, S, M, I> ConversationService<U, S, M, I>
where
    U: UserRepository,
    S: SessionRepository,
    M: MessageRepository,
    I: InferenceClient,
{
    pub fn new(user_repo: U, session_repo: S, message_repo: M, inference: I) -> Self {
        Self {
            user_repo,
            session_repo,
            message_repo,
            inference,
        }
    }

    // --- Sessions ---

    /// Create a session for an existing user. A missing or empty title becomes "New Chat".
    pub async fn create_session(
        &self,
        user_id: Option<&str>,
        title: Option<&str>,
    ) -> Result<Session, ChatError> {
        let raw_user_id =
            present(user_id).ok_or_else(|| ChatError::Validation("User id is required".into()))?;
        let user_id = self
            .resolve_user(raw_user_id)
            .await?
            .ok_or_else(|| ChatError::Validation(USER_NOT_FOUND.into()))?;

        let title = present(title);
        let session = self.session_repo.create_session(&user_id, title).await?;
        info!(session_id = %session.id, user_id = %user_id, "Session created");
        Ok(session)
    }

    /// List a user's sessions, most recently updated first, each with a
    /// preview of its first user message.
    pub async fn list_sessions(&self, user_id: Option<&str>) -> Result<Vec<SessionSummary>, ChatError> {
        let raw_user_id =
            present(user_id).ok_or_else(|| ChatError::Validation("User id is required".into()))?;
        let user_id = self
            .resolve_user(raw_user_id)
            .await?
            .ok_or_else(|| ChatError::NotFound(USER_NOT_FOUND.into()))?;

        let sessions = self.session_repo.list_sessions_by_user(&user_id).await?;
        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            let first = self.message_repo.find_first_user_message(&session.id).await?;
            summaries.push(SessionSummary::new(
                session,
                first.as_ref().map(|m| m.content.as_str()),
            ));
        }
        Ok(summaries)
    }

    /// Get a session by id regardless of owner.
    pub async fn get_session(&self, session_id: &str) -> Result<Session, ChatError> {
        let Some(id) = parse_id(session_id) else {
            return Err(ChatError::NotFound(SESSION_NOT_FOUND.into()));
        };
        self.session_repo
            .find_session(&id)
            .await?
            .ok_or_else(|| ChatError::NotFound(SESSION_NOT_FOUND.into()))
    }

    /// Update title and/or status of a session owned by `user_id`.
    ///
    /// A session owned by someone else is reported exactly like a missing one.
    pub async fn update_session(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        patch: SessionPatch,
    ) -> Result<Session, ChatError> {
        let (Some(id), Some(owner)) = (parse_id(session_id), present(user_id).and_then(parse_id))
        else {
            return Err(ChatError::NotFound(SESSION_NOT_FOUND.into()));
        };

        let session = self
            .session_repo
            .update_session(&id, &owner, &patch)
            .await?
            .ok_or_else(|| ChatError::NotFound(SESSION_NOT_FOUND.into()))?;
        info!(session_id = %id, "Session updated");
        Ok(session)
    }

    // --- Messages ---

    /// Get every message in a session, oldest first.
    pub async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        let session = self.get_session(session_id).await?;
        Ok(self.message_repo.list_messages_by_session(&session.id).await?)
    }

    /// Persist a user turn, ask the inference collaborator for a reply, and
    /// persist the reply.
    ///
    /// If the inference call fails the user message stays persisted and the
    /// call returns `ChatError::Dependency`; callers re-fetching history will
    /// see the unanswered user message.
    pub async fn post_message(
        &self,
        session_id: &str,
        submission: PostMessage,
    ) -> Result<CompletedTurn, ChatError> {
        let raw_user_id = present(submission.user_id.as_deref())
            .ok_or_else(|| ChatError::Validation("User ID is required".into()))?;

        let session = match (parse_id(session_id), parse_id(raw_user_id)) {
            (Some(id), Some(owner)) => self.session_repo.find_session_for_owner(&id, &owner).await?,
            _ => None,
        }
        .ok_or_else(|| ChatError::NotFound(SESSION_NOT_FOUND.into()))?;

        let content = present(submission.content.as_deref()).map(str::to_string);
        if content.is_none() && submission.attachment.is_none() {
            return Err(ChatError::Validation("Message content is required".into()));
        }

        let has_pdf = submission.attachment.is_some();
        let stored = content.as_deref().unwrap_or(ATTACHMENT_ONLY_PLACEHOLDER);
        let user_message = self
            .message_repo
            .create_message(&session.id, MessageRole::User, stored)
            .await?;
        self.session_repo.touch_session(&session.id, has_pdf).await?;

        let turn = TurnState::begin(user_message).request_inference()?;
        debug!(
            session_id = %session.id,
            phase = %turn,
            terminal = turn.is_terminal(),
            "Turn advanced"
        );

        let request = InferenceRequest {
            session_id: session.id,
            message: content.unwrap_or_default(),
            attachment: submission.attachment,
        };

        match self.inference.reply(&request).await {
            Ok(reply) => {
                let assistant = self
                    .message_repo
                    .create_message(&session.id, MessageRole::Assistant, &reply)
                    .await?;
                let turn = turn.record_reply(assistant)?;
                info!(
                    session_id = %session.id,
                    phase = %turn,
                    terminal = turn.is_terminal(),
                    has_pdf,
                    "Turn completed"
                );
                turn.into_completed()
                    .ok_or_else(|| ChatError::Internal("turn did not complete".into()))
            }
            Err(err) => {
                let turn = turn.record_failure(err.to_string())?;
                warn!(
                    session_id = %session.id,
                    message_id = %turn.user_message().id,
                    client = self.inference.name(),
                    phase = %turn,
                    error = %err,
                    "Inference failed; user message left unanswered"
                );
                Err(ChatError::Dependency(err))
            }
        }
    }

    /// Parse and look up a user id. Unparseable ids are reported as unknown.
    async fn resolve_user(&self, raw: &str) -> Result<Option<Uuid>, ChatError> {
        let Some(id) = parse_id(raw) else {
            return Ok(None);
        };
        Ok(self.user_repo.find_user_by_id(&id).await?.map(|user| user.id))
    }
}

/// Treat empty strings the same as missing values. Whitespace is content.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, StubInference};

    type TestService = ConversationService<MemoryStore, MemoryStore, MemoryStore, StubInference>;

    fn make_service(inference: StubInference) -> (TestService, MemoryStore) {
        let store = MemoryStore::new();
        let service =
            ConversationService::new(store.clone(), store.clone(), store.clone(), inference);
        (service, store)
    }

    fn text(user_id: Uuid, content: &str) -> PostMessage {
        PostMessage {
            user_id: Some(user_id.to_string()),
            content: Some(content.to_string()),
            attachment: None,
        }
    }

    fn pdf() -> Attachment {
        Attachment {
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn create_session_defaults_title() {
        let (service, store) = make_service(StubInference::replying("ok"));
        let user = store.seed_user("ada");

        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();
        assert_eq!(session.title, "New Chat");
        assert_eq!(session.user_id, user.id);

        let empty = service
            .create_session(Some(&user.id.to_string()), Some(""))
            .await
            .unwrap();
        assert_eq!(empty.title, "New Chat");

        let spaces = service
            .create_session(Some(&user.id.to_string()), Some("  "))
            .await
            .unwrap();
        assert_eq!(spaces.title, "  ");

        let named = service
            .create_session(Some(&user.id.to_string()), Some("Ideas"))
            .await
            .unwrap();
        assert_eq!(named.title, "Ideas");
    }

    #[tokio::test]
    async fn create_session_requires_existing_user() {
        let (service, _store) = make_service(StubInference::replying("ok"));

        let err = service.create_session(None, None).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        let err = service
            .create_session(Some(&Uuid::now_v7().to_string()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        let err = service
            .create_session(Some("not-a-uuid"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn list_sessions_orders_and_previews() {
        let (service, store) = make_service(StubInference::replying("reply"));
        let user = store.seed_user("ada");
        let uid = user.id.to_string();

        let first = service.create_session(Some(&uid), Some("first")).await.unwrap();
        let second = service.create_session(Some(&uid), Some("second")).await.unwrap();
        let empty = service.create_session(Some(&uid), Some("empty")).await.unwrap();

        let long = "x".repeat(250);
        service
            .post_message(&second.id.to_string(), text(user.id, &long))
            .await
            .unwrap();
        service
            .post_message(&first.id.to_string(), text(user.id, "hello first"))
            .await
            .unwrap();

        let sessions = service.list_sessions(Some(&uid)).await.unwrap();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].session.id, first.id);
        assert_eq!(sessions[0].preview, "hello first");
        assert_eq!(sessions[1].session.id, second.id);
        assert_eq!(sessions[1].preview, "x".repeat(100));
        assert_eq!(sessions[2].session.id, empty.id);
        assert_eq!(sessions[2].preview, "");
    }

    #[tokio::test]
    async fn list_sessions_unknown_user_is_not_found() {
        let (service, _store) = make_service(StubInference::replying("ok"));

        let err = service
            .list_sessions(Some(&Uuid::now_v7().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));

        let err = service.list_sessions(Some("")).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn get_session_missing_or_malformed() {
        let (service, _store) = make_service(StubInference::replying("ok"));

        let err = service.get_session(&Uuid::now_v7().to_string()).await.unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));

        let err = service.get_session("garbage").await.unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_session_is_idempotent() {
        let (service, store) = make_service(StubInference::replying("ok"));
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();

        let a = service.get_session(&session.id.to_string()).await.unwrap();
        let b = service.get_session(&session.id.to_string()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn update_session_patches_only_given_fields() {
        let (service, store) = make_service(StubInference::replying("ok"));
        let user = store.seed_user("ada");
        let uid = user.id.to_string();
        let session = service.create_session(Some(&uid), Some("Original")).await.unwrap();
        let sid = session.id.to_string();

        let updated = service
            .update_session(
                &sid,
                Some(&uid),
                SessionPatch {
                    status: Some("archived".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Original");
        assert_eq!(updated.status, "archived");
        assert!(updated.updated_at > session.updated_at);

        let updated = service
            .update_session(
                &sid,
                Some(&uid),
                SessionPatch {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.status, "archived");
    }

    #[tokio::test]
    async fn update_session_other_owner_is_not_found() {
        let (service, store) = make_service(StubInference::replying("ok"));
        let owner = store.seed_user("ada");
        let intruder = store.seed_user("eve");
        let session = service
            .create_session(Some(&owner.id.to_string()), None)
            .await
            .unwrap();

        let patch = SessionPatch {
            title: Some("mine now".into()),
            ..Default::default()
        };
        let foreign = service
            .update_session(&session.id.to_string(), Some(&intruder.id.to_string()), patch.clone())
            .await
            .unwrap_err();
        let missing = service
            .update_session(&Uuid::now_v7().to_string(), Some(&intruder.id.to_string()), patch)
            .await
            .unwrap_err();
        assert!(matches!(foreign, ChatError::NotFound(_)));
        assert_eq!(foreign.to_string(), missing.to_string());

        let unchanged = service.get_session(&session.id.to_string()).await.unwrap();
        assert_eq!(unchanged.title, "New Chat");
    }

    #[tokio::test]
    async fn list_messages_empty_session() {
        let (service, store) = make_service(StubInference::replying("ok"));
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();

        let messages = service.list_messages(&session.id.to_string()).await.unwrap();
        assert!(messages.is_empty());

        let err = service
            .list_messages(&Uuid::now_v7().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
    }

    #[tokio::test]
    async fn post_message_success_writes_pair_in_order() {
        let inference = StubInference::replying("Hello! How can I help?");
        let (service, store) = make_service(inference.clone());
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();
        let sid = session.id.to_string();

        let turn = service.post_message(&sid, text(user.id, "hello")).await.unwrap();
        assert_eq!(turn.user.role, MessageRole::User);
        assert_eq!(turn.user.content, "hello");
        assert_eq!(turn.assistant.role, MessageRole::Assistant);
        assert_eq!(turn.assistant.content, "Hello! How can I help?");

        let history = service.list_messages(&sid).await.unwrap();
        assert_eq!(history, turn.into_messages());
        assert!(history[0].created_at <= history[1].created_at);

        let calls = inference.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].session_id, session.id);
        assert_eq!(calls[0].message, "hello");
        assert!(calls[0].attachment.is_none());

        let touched = service.get_session(&sid).await.unwrap();
        assert!(touched.updated_at > session.updated_at);
        assert!(!touched.metadata.has_pdf);
    }

    #[tokio::test]
    async fn post_message_attachment_only_uses_placeholder() {
        let inference = StubInference::replying("Nice resume");
        let (service, store) = make_service(inference.clone());
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();

        let submission = PostMessage {
            user_id: Some(user.id.to_string()),
            content: None,
            attachment: Some(pdf()),
        };
        let turn = service
            .post_message(&session.id.to_string(), submission)
            .await
            .unwrap();
        assert_eq!(turn.user.content, "PDF uploaded");

        let calls = inference.calls();
        assert_eq!(calls[0].message, "");
        assert_eq!(calls[0].attachment.as_ref().map(|a| a.file_name.as_str()), Some("resume.pdf"));

        let session = service.get_session(&session.id.to_string()).await.unwrap();
        assert!(session.metadata.has_pdf);
    }

    #[tokio::test]
    async fn post_message_empty_content_performs_no_writes() {
        let inference = StubInference::replying("unused");
        let (service, store) = make_service(inference.clone());
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();
        let writes_before = store.writes();

        let err = service
            .post_message(&session.id.to_string(), text(user.id, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(store.writes(), writes_before);
        assert!(inference.calls().is_empty());
    }

    #[tokio::test]
    async fn post_message_keeps_whitespace_content() {
        let inference = StubInference::replying("noted");
        let (service, store) = make_service(inference.clone());
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();

        let turn = service
            .post_message(&session.id.to_string(), text(user.id, "  "))
            .await
            .unwrap();
        let messages = turn.into_messages();
        let user_msg = &messages[0];
        assert_eq!(user_msg.role, MessageRole::User);
        assert_eq!(user_msg.content, "  ");
        assert_eq!(inference.calls()[0].message, "  ");
    }

    #[tokio::test]
    async fn post_message_with_pdf_keeps_sent_text() {
        let inference = StubInference::replying("read it");
        let (service, store) = make_service(inference.clone());
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();

        let submission = PostMessage {
            user_id: Some(user.id.to_string()),
            content: Some("Review my resume".into()),
            attachment: Some(pdf()),
        };
        let turn = service
            .post_message(&session.id.to_string(), submission)
            .await
            .unwrap();
        let messages = turn.into_messages();
        let user_msg = &messages[0];
        assert_eq!(user_msg.content, "Review my resume");
        assert_eq!(inference.calls()[0].message, "Review my resume");
    }

    #[tokio::test]
    async fn post_message_requires_user_id() {
        let (service, store) = make_service(StubInference::replying("unused"));
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();

        let submission = PostMessage {
            user_id: None,
            content: Some("hello".into()),
            attachment: None,
        };
        let err = service
            .post_message(&session.id.to_string(), submission)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(store.message_count(), 0);
    }

    #[tokio::test]
    async fn post_message_foreign_session_performs_no_writes() {
        let inference = StubInference::replying("unused");
        let (service, store) = make_service(inference.clone());
        let owner = store.seed_user("ada");
        let intruder = store.seed_user("eve");
        let session = service
            .create_session(Some(&owner.id.to_string()), None)
            .await
            .unwrap();
        let writes_before = store.writes();

        let err = service
            .post_message(&session.id.to_string(), text(intruder.id, "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
        assert_eq!(store.writes(), writes_before);
        assert!(inference.calls().is_empty());
    }

    #[tokio::test]
    async fn post_message_inference_failure_keeps_user_message() {
        let (service, store) = make_service(StubInference::failing());
        let user = store.seed_user("ada");
        let session = service
            .create_session(Some(&user.id.to_string()), None)
            .await
            .unwrap();
        assert_eq!(session.title, "New Chat");
        let sid = session.id.to_string();

        let err = service
            .post_message(&sid, text(user.id, "Summarize this"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Dependency(_)));

        let history = service.list_messages(&sid).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "Summarize this");
    }
}
