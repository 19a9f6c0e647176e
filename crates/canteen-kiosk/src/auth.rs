//! Sign-in against the authentication provider, and the role decision that comes with it.
use crate::model::{student_display_name, Role, Session};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// An account as the provider reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Name and Student ID are required.")]
    MissingStudentFields,

    #[error("Please enter both email and password.")]
    MissingCredentials,

    #[error("No account for {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("An account already exists for {0}")]
    AccountExists(String),

    #[error("Password should be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Authentication provider error: {0}")]
    Provider(String),
}

/// The identity backend. Sessions are created from what it returns.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// A throwaway account carrying only a display name.
    async fn sign_in_anonymous(&self, display_name: &str) -> Result<AuthUser, AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<AuthUser, AuthError>;

    /// Creates the account and signs it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Student sign-in. Both fields are required after trimming.
#[instrument(skip(provider))]
pub async fn login_student(
    provider: &dyn AuthProvider,
    name: &str,
    roll_number: &str,
    admin_marker: &str,
) -> Result<Session, AuthError> {
    if name.trim().is_empty() || roll_number.trim().is_empty() {
        return Err(AuthError::MissingStudentFields);
    }
    let display_name = student_display_name(name, roll_number);
    let user = provider.sign_in_anonymous(&display_name).await?;
    info!(uid = %user.uid, "Student signed in");
    Ok(session_for(user, display_name, admin_marker))
}

/// Admin sign-in. An unknown account is created on the spot.
///
/// The flag is `true` when the account had to be provisioned.
#[instrument(skip(provider, password))]
pub async fn login_admin(
    provider: &dyn AuthProvider,
    email: &str,
    password: &str,
    admin_marker: &str,
) -> Result<(Session, bool), AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    let (user, provisioned) = match provider.sign_in_with_password(email, password).await {
        Ok(user) => (user, false),
        Err(AuthError::UserNotFound(_) | AuthError::InvalidCredential) => {
            warn!("Sign-in failed, provisioning account");
            (provider.create_account(email, password).await?, true)
        }
        Err(e) => return Err(e),
    };
    info!(uid = %user.uid, provisioned, "Admin signed in");
    Ok((session_for(user, email.to_string(), admin_marker), provisioned))
}

fn session_for(user: AuthUser, fallback_name: String, admin_marker: &str) -> Session {
    Session {
        role: Role::from_email(user.email.as_deref(), admin_marker),
        display_name: user.display_name.unwrap_or(fallback_name),
        email: user.email,
        uid: user.uid,
    }
}

/// Provider that keeps accounts in memory.
pub struct InMemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    min_password_len: usize,
}

struct Account {
    uid: String,
    password: String,
}

impl Default for InMemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuth {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            min_password_len: 6,
        }
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuth {
    async fn sign_in_anonymous(&self, display_name: &str) -> Result<AuthUser, AuthError> {
        Ok(AuthUser {
            uid: format!("anon-{}", Uuid::new_v4().simple()),
            email: None,
            display_name: Some(display_name.to_string()),
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let accounts = self.accounts.lock().await;
        let account = accounts
            .get(email)
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;
        if account.password != password {
            return Err(AuthError::InvalidCredential);
        }
        Ok(AuthUser {
            uid: account.uid.clone(),
            email: Some(email.to_string()),
            display_name: None,
        })
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if password.len() < self.min_password_len {
            return Err(AuthError::WeakPassword {
                min: self.min_password_len,
            });
        }
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(email) {
            return Err(AuthError::AccountExists(email.to_string()));
        }
        let uid = Uuid::new_v4().simple().to_string();
        accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        Ok(AuthUser {
            uid,
            email: Some(email.to_string()),
            display_name: None,
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
