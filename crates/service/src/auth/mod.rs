pub mod password;
pub mod token;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token rejected: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
