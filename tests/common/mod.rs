// Shared fixtures for the HTTP tests; not every test file uses every helper.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use counsel_chat::modules::message::model::{Message, MessageFilter, NewMessage, Sender};
use counsel_chat::modules::session::model::{NewSession, Session};
use counsel_chat::services::llm::{Completion, CompletionService, LlmError};
use counsel_chat::services::store::{ChatStore, StoreError};
use counsel_chat::{router, AppState};

#[derive(Default)]
struct Tables {
    users: HashSet<i64>,
    sessions: Vec<Session>,
    messages: Vec<Message>,
}

/// In-memory store with the same ordering and relation rules as the MongoDB backend.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    fail_counselor_writes: AtomicBool,
    fail_reads: AtomicBool,
}

fn connection_reset() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by store");
    StoreError::Database(mongodb::error::Error::from(io))
}

impl MemoryStore {
    pub fn with_users(ids: &[i64]) -> Arc<Self> {
        let store = Self::default();
        store.tables.lock().unwrap().users.extend(ids);
        Arc::new(store)
    }

    /// Number of store operations issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.tables.lock().unwrap().messages.clone()
    }

    /// Makes every write of a counselor message fail.
    pub fn fail_counselor_writes(&self) {
        self.fail_counselor_writes.store(true, Ordering::SeqCst);
    }

    /// Makes every listing and count fail.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(connection_reset());
        }
        Ok(())
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn create_session(&self, session: NewSession) -> Result<Session, StoreError> {
        self.record_call();
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.contains(&session.user_id) {
            return Err(StoreError::MissingRelation { entity: "user", id: session.user_id });
        }

        let session = Session::new(tables.sessions.len() as i64 + 1, session);
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_sessions(&self, user_id: i64) -> Result<Vec<Session>, StoreError> {
        self.record_call();
        self.check_read()?;
        let tables = self.tables.lock().unwrap();
        let mut sessions: Vec<Session> = tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.created_at, s.id));
        Ok(sessions)
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        self.record_call();
        if message.sender == Sender::Counselor && self.fail_counselor_writes.load(Ordering::SeqCst) {
            return Err(connection_reset());
        }
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.contains(&message.user_id) {
            return Err(StoreError::MissingRelation { entity: "user", id: message.user_id });
        }
        if !tables.sessions.iter().any(|s| s.id == message.session_id) {
            return Err(StoreError::MissingRelation { entity: "session", id: message.session_id });
        }

        let message = Message::new(tables.messages.len() as i64 + 1, message);
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn find_messages(
        &self,
        filter: &MessageFilter,
        skip: u64,
        take: i64,
    ) -> Result<Vec<Message>, StoreError> {
        self.record_call();
        self.check_read()?;
        let tables = self.tables.lock().unwrap();
        let mut messages: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect())
    }

    async fn count_messages(&self, filter: &MessageFilter) -> Result<u64, StoreError> {
        self.record_call();
        self.check_read()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.messages.iter().filter(|m| filter.matches(m)).count() as u64)
    }
}

/// Completion service that answers every prompt the same way.
pub struct ScriptedCompletion {
    outcome: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn reply(&self, prompt: &str) -> Result<Completion, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.outcome {
            Ok(text) => Ok(Completion {
                id: Some("gen-1".to_string()),
                text: text.clone(),
            }),
            Err(message) => Err(LlmError::ApiError(message.clone())),
        }
    }
}

pub fn setup_test_server(
    store: Arc<MemoryStore>,
    completion: Arc<dyn CompletionService>,
) -> TestServer {
    let state = AppState::new(store, completion);
    TestServer::new(router(state)).unwrap()
}
