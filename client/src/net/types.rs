//! Backend DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! `Identity` stays an untyped attribute bag: the backend owns its shape and
//! the frontend only reads a few well-known keys for display and role checks.
//! Catalogue types are typed but lenient (`#[serde(default)]`) so optional
//! backend fields never break a listing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// The signed-in user as returned by the identity check.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub serde_json::Map<String, serde_json::Value>);

impl Identity {
    /// Raw attribute lookup.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// String attribute; numbers are rendered as text.
    pub fn attr(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<String> {
        self.attr("id")
    }

    /// Best label for the nav bar: username, then name, then email.
    pub fn display_name(&self) -> String {
        ["username", "name", "email"]
            .iter()
            .find_map(|key| self.attr(key).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "Usuário".to_owned())
    }

    pub fn role(&self) -> Option<String> {
        self.attr("role")
    }

    pub fn is_admin(&self) -> bool {
        self.role()
            .is_some_and(|r| r.trim_start_matches("ROLE_").eq_ignore_ascii_case("admin"))
    }

    pub fn image_id(&self) -> Option<String> {
        self.attr("imageId").or_else(|| self.attr("image_id"))
    }
}

// =============================================================================
// CATALOGUE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub institution_id: Option<i64>,
    #[serde(default)]
    pub institution_name: Option<String>,
    #[serde(default)]
    pub image_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub acronym: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image_id: Option<i64>,
}

impl Institution {
    /// "City - ST" when both are known.
    pub fn location(&self) -> Option<String> {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => Some(format!("{city} - {state}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(state)) => Some(state.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "commentText")]
    pub text: String,
    #[serde(default, alias = "username")]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::User => "Usuário",
            Self::Admin => "Administrador",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::User => Self::Admin,
            Self::Admin => Self::User,
        }
    }
}

/// Row in the admin user table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

// =============================================================================
// FORMS
// =============================================================================

/// Credentials posted form-encoded to `/login`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Fields posted form-encoded to `/users`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// JSON body for `POST /api/courses`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub institution_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}
