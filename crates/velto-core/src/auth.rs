//! Authentication providers
//!
//! The provider is chosen at startup from `auth.provider`:
//! - `MockAuthProvider`: accepts any non-empty credentials
//! - `CredentialsAuthProvider`: checks the configured user list and
//!   registers new accounts on sign-up

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use velto_config::{AuthConfig, UserConfig};

/// Signed-in user as shown in the navigation bar and profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Avatar fallback: first letter of the name, then of the email, then `U`
    pub fn initials(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .or_else(|| self.email.trim().chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| "U".to_string())
    }

    /// First word of the name, used in greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("there")
    }

    /// Name for menus; `User` when unknown
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "User"
        } else {
            name
        }
    }
}

impl From<&UserConfig> for Profile {
    fn from(user: &UserConfig) -> Self {
        Profile {
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Sign-in form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Authentication failures shown inline on the auth page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in your {field}")]
    MissingField { field: &'static str },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with {email} already exists")]
    AccountExists { email: String },

    #[error("Authentication service unavailable")]
    Unavailable,
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Trait for authentication providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Short provider name for logs and settings
    fn name(&self) -> &'static str;

    /// Check credentials and return the matching profile
    async fn sign_in(&self, credentials: &Credentials) -> Result<Profile, AuthError>;

    /// Create an account and return its profile
    async fn sign_up(&self, registration: &Registration) -> Result<Profile, AuthError>;
}

/// Accepts any non-empty credentials after a simulated delay
#[derive(Debug, Clone)]
pub struct MockAuthProvider {
    latency: Duration,
}

impl MockAuthProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Name derived from the local part of an email address
fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Profile, AuthError> {
        require(&credentials.email, "email")?;
        require(&credentials.password, "password")?;
        self.wait().await;

        let email = credentials.email.trim().to_string();
        Ok(Profile {
            name: name_from_email(&email),
            email,
            avatar_url: None,
        })
    }

    async fn sign_up(&self, registration: &Registration) -> Result<Profile, AuthError> {
        require(&registration.name, "name")?;
        require(&registration.email, "email")?;
        require(&registration.password, "password")?;
        self.wait().await;

        Ok(Profile {
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            avatar_url: None,
        })
    }
}

/// Checks credentials against configured and registered accounts
#[derive(Debug)]
pub struct CredentialsAuthProvider {
    latency: Duration,
    /// Accounts by lowercased email
    accounts: RwLock<HashMap<String, UserConfig>>,
}

impl CredentialsAuthProvider {
    pub fn new(config: &AuthConfig) -> Self {
        let accounts = config
            .users
            .iter()
            .map(|u| (u.email.trim().to_lowercase(), u.clone()))
            .collect();
        Self {
            latency: Duration::from_millis(config.latency_ms),
            accounts: RwLock::new(accounts),
        }
    }

    /// Override the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or(0)
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthProvider for CredentialsAuthProvider {
    fn name(&self) -> &'static str {
        "credentials"
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Profile, AuthError> {
        require(&credentials.email, "email")?;
        require(&credentials.password, "password")?;
        self.wait().await;

        let key = credentials.email.trim().to_lowercase();
        let accounts = self.accounts.read().map_err(|_| AuthError::Unavailable)?;
        match accounts.get(&key) {
            Some(user) if user.password == credentials.password => Ok(Profile::from(user)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, registration: &Registration) -> Result<Profile, AuthError> {
        require(&registration.name, "name")?;
        require(&registration.email, "email")?;
        require(&registration.password, "password")?;
        self.wait().await;

        let key = registration.email.trim().to_lowercase();
        let mut accounts = self.accounts.write().map_err(|_| AuthError::Unavailable)?;
        if accounts.contains_key(&key) {
            return Err(AuthError::AccountExists {
                email: registration.email.trim().to_string(),
            });
        }

        let user = UserConfig {
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            password: registration.password.clone(),
            avatar_url: None,
        };
        let profile = Profile::from(&user);
        accounts.insert(key, user);
        Ok(profile)
    }
}
