//! Parameterised SQL statements for the `users` table.
//!
//! Every statement kind owns a fixed SQL template with positional
//! placeholders and the ordered list of columns bound to them. Values only
//! ever travel as bind parameters; statement text never contains user input.

use std::fmt;
use std::str::FromStr;

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Double, Integer, Text};

use crate::domain::ports::UserRecordRepositoryError;
use crate::domain::{UserId, UserRecord};

const RECORD_COLUMNS: &str = "guid, name, email, website, latitude, longitude, email_updates";

/// Errors raised while building a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatementError {
    /// No template is registered under the requested name.
    #[error("unknown statement kind: {operation}")]
    UnknownOperation { operation: String },
    /// The field set lacks a column the template binds.
    #[error("statement {kind} requires column {column}")]
    MissingField {
        kind: StatementKind,
        column: Column,
    },
}

impl From<StatementError> for UserRecordRepositoryError {
    fn from(error: StatementError) -> Self {
        match error {
            StatementError::UnknownOperation { operation } => Self::unknown_operation(operation),
            missing @ StatementError::MissingField { .. } => Self::query(missing.to_string()),
        }
    }
}

/// Statement kinds understood by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Insert a full record.
    Add,
    /// Replace every field of the record matching `guid`.
    Update,
    /// Remove the record matching `guid`.
    Delete,
    /// Fetch the record matching `guid`.
    SelectById,
    /// Fetch the earliest record matching `email`.
    SelectByEmail,
    /// Fetch every record in registration order.
    SelectAll,
}

impl StatementKind {
    /// Every registered kind.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Update,
        Self::Delete,
        Self::SelectById,
        Self::SelectByEmail,
        Self::SelectAll,
    ];

    /// Registered operation name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::SelectById => "select-by-id",
            Self::SelectByEmail => "select-by-email",
            Self::SelectAll => "select-all",
        }
    }

    /// True for statements that produce rows rather than an affected count.
    pub fn returns_rows(self) -> bool {
        matches!(
            self,
            Self::SelectById | Self::SelectByEmail | Self::SelectAll
        )
    }

    fn template(self) -> String {
        match self {
            Self::Add => format!(
                "INSERT INTO users ({RECORD_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
            ),
            Self::Update => "UPDATE users SET name = $1, email = $2, website = $3, \
                 latitude = $4, longitude = $5, email_updates = $6 WHERE guid = $7"
                .to_owned(),
            Self::Delete => "DELETE FROM users WHERE guid = $1".to_owned(),
            Self::SelectById => format!("SELECT {RECORD_COLUMNS} FROM users WHERE guid = $1"),
            Self::SelectByEmail => format!(
                "SELECT {RECORD_COLUMNS} FROM users WHERE email = $1 \
                 ORDER BY created_at, guid LIMIT 1"
            ),
            Self::SelectAll => {
                format!("SELECT {RECORD_COLUMNS} FROM users ORDER BY created_at, guid")
            }
        }
    }

    fn bound_columns(self) -> &'static [Column] {
        use Column::*;
        match self {
            Self::Add => &[Guid, Name, Email, Website, Latitude, Longitude, EmailUpdates],
            Self::Update => &[Name, Email, Website, Latitude, Longitude, EmailUpdates, Guid],
            Self::Delete | Self::SelectById => &[Guid],
            Self::SelectByEmail => &[Email],
            Self::SelectAll => &[],
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatementKind {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| StatementError::UnknownOperation {
                operation: s.to_owned(),
            })
    }
}

/// Columns of the `users` table that statements bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Record identifier.
    Guid,
    /// Display name.
    Name,
    /// Contact address.
    Email,
    /// Optional homepage.
    Website,
    /// Map latitude.
    Latitude,
    /// Map longitude.
    Longitude,
    /// Notification preference.
    EmailUpdates,
}

impl Column {
    /// SQL column name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Guid => "guid",
            Self::Name => "name",
            Self::Email => "email",
            Self::Website => "website",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::EmailUpdates => "email_updates",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// Bound as `TEXT`.
    Text(String),
    /// Bound as `DOUBLE PRECISION`.
    Double(f64),
    /// Stored as the integer `0` or `1`.
    Flag(bool),
}

/// Ordered `(column, value)` pairs supplied to the builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(Column, BoundValue)>,
}

impl FieldSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`, replacing any earlier value in place.
    pub fn with(mut self, column: Column, value: BoundValue) -> Self {
        match self.entries.iter_mut().find(|(existing, _)| *existing == column) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    /// Value supplied for `column`, if any.
    pub fn get(&self, column: Column) -> Option<&BoundValue> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == column)
            .map(|(_, value)| value)
    }

    /// Every column of `record`.
    pub fn for_record(record: &UserRecord) -> Self {
        Self::for_id(record.id())
            .with(Column::Name, BoundValue::Text(record.name().to_owned()))
            .with(Column::Email, BoundValue::Text(record.email().to_owned()))
            .with(Column::Website, BoundValue::Text(record.website().to_owned()))
            .with(Column::Latitude, BoundValue::Double(record.latitude()))
            .with(Column::Longitude, BoundValue::Double(record.longitude()))
            .with(Column::EmailUpdates, BoundValue::Flag(record.email_updates()))
    }

    /// Just the `guid` column.
    pub fn for_id(id: &UserId) -> Self {
        Self::new().with(Column::Guid, BoundValue::Text(id.to_string()))
    }

    /// Just the `email` column.
    pub fn for_email(email: &str) -> Self {
        Self::new().with(Column::Email, BoundValue::Text(email.to_owned()))
    }
}

/// A statement ready for execution: SQL text plus binds in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStatement {
    kind: StatementKind,
    sql: String,
    binds: Vec<BoundValue>,
}

impl UserStatement {
    /// Operation this statement performs.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// SQL text with positional placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values in placeholder order.
    pub fn binds(&self) -> &[BoundValue] {
        &self.binds
    }

    /// Convert into a Diesel query with every value bound.
    pub(crate) fn into_query(self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        self.binds.into_iter().fold(
            diesel::sql_query(self.sql).into_boxed::<Pg>(),
            |query, value| match value {
                BoundValue::Text(text) => query.bind::<Text, _>(text),
                BoundValue::Double(number) => query.bind::<Double, _>(number),
                BoundValue::Flag(flag) => query.bind::<Integer, _>(i32::from(flag)),
            },
        )
    }
}

/// Build the statement for `kind`, pulling bound columns from `fields`.
pub fn build(kind: StatementKind, fields: &FieldSet) -> Result<UserStatement, StatementError> {
    let binds = kind
        .bound_columns()
        .iter()
        .map(|&column| {
            fields
                .get(column)
                .cloned()
                .ok_or(StatementError::MissingField { kind, column })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UserStatement {
        kind,
        sql: kind.template(),
        binds,
    })
}

/// Build the statement registered under `operation`.
pub fn build_named(operation: &str, fields: &FieldSet) -> Result<UserStatement, StatementError> {
    build(operation.parse()?, fields)
}
