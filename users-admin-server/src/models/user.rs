//! User request bodies: create, partial update, and search filter
//!
//! Column names used in dynamic SQL come from [`UserField`] only;
//! client text is never spliced into a statement.

use serde::Deserialize;

use super::ValidationError;

/// Maximum length for any user text field
pub const MAX_FIELD_LEN: usize = 256;

/// Status assigned by the store when create omits it
pub const DEFAULT_STATUS: &str = "active";

/// Mutable, filterable columns of the `users` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Status,
}

impl UserField {
    /// SQL column name
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Status => "status",
        }
    }
}

fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(())
}

/// Collect the present fields in column order
fn present<'a>(
    name: &'a Option<String>,
    email: &'a Option<String>,
    status: &'a Option<String>,
) -> Vec<(UserField, &'a str)> {
    [
        (UserField::Name, name),
        (UserField::Email, email),
        (UserField::Status, status),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    .collect()
}

/// POST /create-user body
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text(UserField::Name.column(), &self.name)?;
        check_text(UserField::Email.column(), &self.email)?;
        if let Some(status) = &self.status {
            check_text(UserField::Status.column(), status)?;
        }
        Ok(())
    }
}

/// PUT /users/{userid} body. Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UserPatch {
    /// Fields to SET, in column order
    pub fn changes(&self) -> Vec<(UserField, &str)> {
        present(&self.name, &self.email, &self.status)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let changes = self.changes();
        if changes.is_empty() {
            return Err(ValidationError::NoChanges);
        }
        for (field, value) in changes {
            check_text(field.column(), value)?;
        }
        Ok(())
    }
}

/// POST /users/search body. Each present field becomes one equality predicate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UserFilter {
    /// Equality predicates, combined with AND by the caller
    pub fn predicates(&self) -> Vec<(UserField, &str)> {
        present(&self.name, &self.email, &self.status)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }
}
