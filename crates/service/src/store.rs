//! Typed records on top of [`SafeDatabase`]. Every value is stored as one JSON document.

use mentorship_database::basic_db::SafeDatabase;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::parser::profile::{MenteeProfile, MentorProfile};
use crate::parser::user::User;

pub const USERS_TABLE: &str = "users";
pub const MENTORS_TABLE: &str = "mentors";
pub const MENTEES_TABLE: &str = "mentees";

/// Longest key the store accepts. libmdbx rejects keys near half a page, so ids and emails are
/// capped well below that.
pub const MAX_KEY_LEN: usize = 254;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Identifier must be at most 254 characters")]
    KeyTooLong,

    #[error("Database error: {0}")]
    Database(#[from] libmdbx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stores `user` under its email. Fails with [`StoreError::DuplicateEmail`] if the email is taken.
pub fn insert_user<T: SafeDatabase>(database: &T, user: &User) -> Result<(), StoreError> {
    check_key(&user.email)?;
    let user_json = serde_json::to_string(user)?;

    if !database.insert_new(&user.email, &user_json, USERS_TABLE)? {
        return Err(StoreError::DuplicateEmail);
    }

    debug!(user_id = %user.id, "stored user");
    Ok(())
}

pub fn find_user_by_email<T: SafeDatabase>(
    database: &T,
    email: &str,
) -> Result<Option<User>, StoreError> {
    read_document(database, email, USERS_TABLE)
}

/// Users ordered by email, paged with `skip`/`limit`.
pub fn list_users<T: SafeDatabase>(
    database: &T,
    skip: usize,
    limit: usize,
) -> Result<Vec<User>, StoreError> {
    database
        .read_ordered(USERS_TABLE)?
        .into_iter()
        .skip(skip)
        .take(limit)
        .map(|(_, value)| serde_json::from_slice(&value).map_err(StoreError::from))
        .collect()
}

pub fn save_mentor<T: SafeDatabase>(database: &T, mentor: &MentorProfile) -> Result<(), StoreError> {
    write_document(database, &mentor.id, mentor, MENTORS_TABLE)
}

pub fn list_mentors<T: SafeDatabase>(database: &T) -> Result<Vec<MentorProfile>, StoreError> {
    database
        .read_ordered(MENTORS_TABLE)?
        .into_iter()
        .map(|(_, value)| serde_json::from_slice(&value).map_err(StoreError::from))
        .collect()
}

pub fn save_mentee<T: SafeDatabase>(database: &T, mentee: &MenteeProfile) -> Result<(), StoreError> {
    write_document(database, &mentee.id, mentee, MENTEES_TABLE)
}

pub fn find_mentee<T: SafeDatabase>(
    database: &T,
    mentee_id: &str,
) -> Result<Option<MenteeProfile>, StoreError> {
    read_document(database, mentee_id, MENTEES_TABLE)
}

fn write_document<T: SafeDatabase, D: Serialize>(
    database: &T,
    key: &str,
    document: &D,
    table: &str,
) -> Result<(), StoreError> {
    check_key(key)?;
    let json = serde_json::to_string(document)?;
    database.write(key, &json, table)?;
    Ok(())
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.len() > MAX_KEY_LEN {
        return Err(StoreError::KeyTooLong);
    }
    Ok(())
}

fn read_document<T: SafeDatabase, D: DeserializeOwned>(
    database: &T,
    key: &str,
    table: &str,
) -> Result<Option<D>, StoreError> {
    // Nothing longer than the cap was ever written.
    if key.len() > MAX_KEY_LEN {
        return Ok(None);
    }

    match database.read(key, table)? {
        Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
        None => Ok(None),
    }
}
