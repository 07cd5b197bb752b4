use crate::db::settings::{get_setting, set_setting};
use crate::error::QuizError;
use rusqlite::Connection;

pub const CREDENTIAL_KEY: &str = "openrouter_api_key";

/// Somewhere to keep the single API key between runs.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<String>, QuizError>;
    fn save(&mut self, credential: &str) -> Result<(), QuizError>;
}

pub struct SqliteCredentialStore {
    conn: Connection,
}

impl SqliteCredentialStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn load(&self) -> Result<Option<String>, QuizError> {
        Ok(get_setting(&self.conn, CREDENTIAL_KEY)?)
    }

    fn save(&mut self, credential: &str) -> Result<(), QuizError> {
        set_setting(&self.conn, CREDENTIAL_KEY, credential)?;
        Ok(())
    }
}

/// Keeps the credential for this process only. Used when the database can't be opened.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Option<String>,
}

impl MemoryCredentialStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, QuizError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, credential: &str) -> Result<(), QuizError> {
        self.value = Some(credential.to_string());
        Ok(())
    }
}

/// Reject blank keys; anything else is accepted verbatim.
pub fn validate_credential(candidate: &str) -> Result<&str, QuizError> {
    if candidate.trim().is_empty() {
        Err(QuizError::EmptyCredential)
    } else {
        Ok(candidate)
    }
}

/// Stored credentials that are blank are treated as absent.
pub fn load_credential(store: &dyn CredentialStore) -> Result<Option<String>, QuizError> {
    Ok(store.load()?.filter(|c| !c.trim().is_empty()))
}
