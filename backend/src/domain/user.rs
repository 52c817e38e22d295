//! User record data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier was not a canonical UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier stored as a UUID and rendered as text.
///
/// Generated once by [`UserId::random`] when a record is added; never
/// recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`] (UUID v4, 122 random bits).
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserIdError> {
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserIdError::Invalid)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Every mutable field of a user record.
///
/// `add` stores a draft under a fresh identifier; `edit` replaces all fields
/// of an existing record with a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    /// Name shown on the map marker.
    pub name: String,
    /// Contact address; also a lookup key, not unique.
    pub email: String,
    /// Free-form website link, possibly empty.
    #[serde(default)]
    pub website: String,
    /// Marker latitude in decimal degrees.
    pub latitude: f64,
    /// Marker longitude in decimal degrees.
    pub longitude: f64,
    /// Whether the user wants project update emails.
    #[serde(default)]
    pub email_updates: bool,
}

/// A registered directory entry.
///
/// ## Invariants
/// - `id` is assigned once at creation and never changes.
/// - `name` and `email` passed validation before the record was written.
///
/// Serialises as
/// `{id, name, email, website, latitude, longitude, email_updates}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    website: String,
    latitude: f64,
    longitude: f64,
    email_updates: bool,
}

impl UserRecord {
    /// Attach `id` to the fields of `draft`.
    pub fn new(id: UserId, draft: UserDraft) -> Self {
        let UserDraft {
            name,
            email,
            website,
            latitude,
            longitude,
            email_updates,
        } = draft;
        Self {
            id,
            name,
            email,
            website,
            latitude,
            longitude,
            email_updates,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Website link.
    pub fn website(&self) -> &str {
        &self.website
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Notification preference.
    pub fn email_updates(&self) -> bool {
        self.email_updates
    }

    /// Split the record back into its identifier and fields.
    pub fn into_parts(self) -> (UserId, UserDraft) {
        let Self {
            id,
            name,
            email,
            website,
            latitude,
            longitude,
            email_updates,
        } = self;
        (
            id,
            UserDraft {
                name,
                email,
                website,
                latitude,
                longitude,
                email_updates,
            },
        )
    }
}
