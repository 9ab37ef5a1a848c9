use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::AuthError;

/// `user_type` tag that may act on behalf of any other account.
pub const ADMIN_USER_TYPE: &str = "admin";

/// Longest address accepted at signup (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Stored account record. Only ever leaves the service as a [`UserResponse`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub password_hash: String,
}

impl User {
    /// New account with a random id. The plain password is hashed and dropped.
    pub fn from_signup(payload: UserCreate) -> Result<Self, AuthError> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            password_hash: hash_password(&payload.password)?,
            email: normalize_email(&payload.email),
            name: payload.name,
            avatar_url: payload.avatar_url,
            user_type: payload.user_type,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == ADMIN_USER_TYPE
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub password: String,
}

impl UserCreate {
    /// Rejects payloads that deserialize but cannot make a usable account.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.len() > MAX_EMAIL_LEN {
            return Err(format!("email must be at most {MAX_EMAIL_LEN} characters"));
        }
        if !is_plausible_email(&self.email) {
            return Err("value is not a valid email address".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.user_type.trim().is_empty() {
            return Err("user_type must not be empty".to_string());
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
}

impl UserResponse {
    pub fn is_admin(&self) -> bool {
        self.user_type == ADMIN_USER_TYPE
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            user_type: user.user_type,
        }
    }
}

/// OAuth2 password-flow form body. `username` carries the email.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Canonical form used as the account key: the domain is case-insensitive, the local part is kept.
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
        None => email.trim().to_string(),
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
