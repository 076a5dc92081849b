//! User data model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyName,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// System-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

/// Non-empty display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // HTML living standard "valid email address" production.
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
///
/// Uniqueness is a store concern and is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("ann@example.com").is_ok());
    /// assert!(EmailAddress::new("ann at example").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Soft-delete state of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Active,
    Deleted { at: DateTime<Utc> },
}

impl RecordState {
    /// Build the state from a nullable deletion timestamp.
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Active,
        }
    }

    /// Whether the record is visible to reads and writes.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Deletion timestamp, if the record was soft-deleted.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}

/// Fields of a user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub age: i32,
}

/// Components used to assemble a persisted [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted, active user.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `updated_at` is never earlier than `created_at` for store-built values.
/// - An `age` of zero means the age is unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    age: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            name,
            email,
            age,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            name,
            email,
            age,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: UserName) {
        self.name = name;
    }

    /// Replace the email address.
    pub fn set_email(&mut self, email: EmailAddress) {
        self.email = email;
    }

    /// Replace the age.
    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }

    /// Advance `updated_at` to `at`; earlier instants leave it untouched.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.updated_at {
            self.updated_at = at;
        }
    }
}

#[cfg(test)]
mod tests;
