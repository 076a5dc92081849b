//! Driving port for user mutations and its request types.
//!
//! [`UpdateUserRequest`] encodes the partial-update merge policy: a field is
//! present only when it carries a non-empty string or, for `age`, a value
//! strictly greater than zero. Empty or zero values are indistinguishable
//! from an omitted field and never overwrite stored state.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, User, UserId, UserName, UserValidationError};

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub name: UserName,
    pub email: EmailAddress,
    pub age: i32,
}

impl CreateUserRequest {
    /// Validate raw request fields.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::ports::CreateUserRequest;
    ///
    /// let request = CreateUserRequest::try_from_fields("Ann", "ann@x.com", 20).expect("valid");
    /// assert_eq!(request.age, 20);
    /// ```
    pub fn try_from_fields(
        name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
            age,
        })
    }
}

/// Partial update: each `Some` field replaces the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub age: Option<i32>,
}

fn text_is_present(value: &str) -> bool {
    !value.is_empty()
}

fn age_is_present(value: i32) -> bool {
    value > 0
}

impl UpdateUserRequest {
    /// Apply the presence rules to raw request fields.
    ///
    /// Each field is judged on its own. A present email must still be a
    /// valid address.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::ports::UpdateUserRequest;
    ///
    /// let request = UpdateUserRequest::from_fields("", "", 30).expect("valid");
    /// assert!(request.name.is_none());
    /// assert!(request.email.is_none());
    /// assert_eq!(request.age, Some(30));
    /// ```
    pub fn from_fields(
        name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();

        let name = if text_is_present(&name) {
            Some(UserName::new(name)?)
        } else {
            None
        };
        let email = if text_is_present(&email) {
            Some(EmailAddress::new(email)?)
        } else {
            None
        };
        let age = age_is_present(age).then_some(age);

        Ok(Self { name, email, age })
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    /// Merge the present fields into `user`, leaving the rest untouched.
    pub fn apply_to(self, user: &mut User) {
        let Self { name, email, age } = self;
        if let Some(name) = name {
            user.set_name(name);
        }
        if let Some(email) = email {
            user.set_email(email);
        }
        if let Some(age) = age {
            user.set_age(age);
        }
    }
}

/// Use-case port for creating, updating, and deleting users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from validated fields.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Merge `request` into the stored user and persist the result.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> Result<User, Error>;

    /// Soft-delete a user.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::UserDraft;

    #[fixture]
    fn ann() -> User {
        let at = Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        User::new(UserDraft {
            id: UserId::new(1),
            name: UserName::new("Ann").expect("valid name"),
            email: EmailAddress::new("a@x.com").expect("valid email"),
            age: 20,
            created_at: at,
            updated_at: at,
        })
    }

    #[rstest]
    fn empty_and_zero_fields_are_absent() {
        let request = UpdateUserRequest::from_fields("", "", 0).expect("valid");
        assert!(request.is_empty());
    }

    #[rstest]
    #[case(0, None)]
    #[case(-4, None)]
    #[case(1, Some(1))]
    #[case(30, Some(30))]
    fn age_is_present_only_when_positive(#[case] age: i32, #[case] expected: Option<i32>) {
        let request = UpdateUserRequest::from_fields("", "", age).expect("valid");
        assert_eq!(request.age, expected);
    }

    #[rstest]
    fn present_email_must_be_valid() {
        assert_eq!(
            UpdateUserRequest::from_fields("", "not-an-email", 0),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[rstest]
    fn apply_to_only_touches_present_fields(mut ann: User) {
        let request = UpdateUserRequest::from_fields("", "", 30).expect("valid");
        request.apply_to(&mut ann);

        assert_eq!(ann.name().as_ref(), "Ann");
        assert_eq!(ann.email().as_ref(), "a@x.com");
        assert_eq!(ann.age(), 30);
    }

    #[rstest]
    fn apply_to_with_nothing_present_is_a_no_op(ann: User) {
        let mut merged = ann.clone();
        UpdateUserRequest::default().apply_to(&mut merged);
        assert_eq!(merged, ann);
    }

    #[rstest]
    fn create_request_requires_name_and_valid_email() {
        assert_eq!(
            CreateUserRequest::try_from_fields("", "ann@x.com", 0),
            Err(UserValidationError::EmptyName)
        );
        assert_eq!(
            CreateUserRequest::try_from_fields("Ann", "ann", 0),
            Err(UserValidationError::InvalidEmail)
        );
    }
}
