//! Field validation for user record input.
//!
//! The predicates are pure: malformed input yields `false`, never an error or
//! a panic. Callers aggregate failures into [`FieldErrors`] before touching
//! the store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Form token the map client posts for a checked notification box.
pub const TRUE_TOKEN: &str = "true";
/// Form token the map client posts for an unchecked notification box.
pub const FALSE_TOKEN: &str = "false";

/// Message recorded when `name` is blank.
pub const NAME_REQUIRED: &str = "Name is required";
/// Message recorded when `email` is blank.
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Message recorded when `email` is present but malformed.
pub const EMAIL_INVALID: &str = "Email address is not valid";
/// Message recorded when the notification flag is not a boolean token.
pub const EMAIL_UPDATES_INVALID: &str = "Notification must be checked";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-atom local part, then one or more DNS labels; at least one dot
        // is required in the domain.
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// True when `value` is non-empty after trimming whitespace.
///
/// # Examples
/// ```
/// use user_directory::domain::validation::is_required_valid;
///
/// assert!(is_required_valid("Alice"));
/// assert!(!is_required_valid("  "));
/// ```
pub fn is_required_valid(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when `value` looks like `local@domain.tld`.
///
/// # Examples
/// ```
/// use user_directory::domain::validation::is_email_address_valid;
///
/// assert!(is_email_address_valid("a@b.com"));
/// assert!(!is_email_address_valid("not-an-email"));
/// ```
pub fn is_email_address_valid(value: &str) -> bool {
    email_regex().is_match(value)
}

/// True when `value` is one of the textual boolean tokens.
pub fn is_boolean(value: &str) -> bool {
    value == TRUE_TOKEN || value == FALSE_TOKEN
}

/// Per-field validation messages keyed by field name.
///
/// Serialises as a flat JSON object, e.g. `{"email": "Email is required"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert into `Ok(())` when empty, otherwise return the set as `Err`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Check the fields every stored record must satisfy.
pub fn validate_required_fields(name: &str, email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !is_required_valid(name) {
        errors.insert("name", NAME_REQUIRED);
    }
    if !is_required_valid(email) {
        errors.insert("email", EMAIL_REQUIRED);
    } else if !is_email_address_valid(email) {
        errors.insert("email", EMAIL_INVALID);
    }
    errors
}

/// Check raw form input, including the textual notification flag.
pub fn validate_user_form(name: &str, email: &str, email_updates: &str) -> FieldErrors {
    let mut errors = validate_required_fields(name, email);
    if !is_boolean(email_updates) {
        errors.insert("email_updates", EMAIL_UPDATES_INVALID);
    }
    errors
}
