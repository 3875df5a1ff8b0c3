//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee row as stored
///
/// The password column holds an argon2 hash after signup and is never
/// serialized out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: Option<String>,
    pub position: Option<String>,
    pub dept: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Employee response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: Option<String>,
    pub position: Option<String>,
    pub dept: Option<String>,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            position: e.position,
            dept: e.dept,
            email: e.email,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Create employee payload (administrative create)
///
/// The password field is stored exactly as supplied; it is expected to
/// already be a hash when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub dept: Option<String>,
    pub email: String,
    pub password: Option<String>,
}

/// Update employee payload
///
/// Every field is optional; supplied fields are merged over the existing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub dept: Option<String>,
    pub position: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: bearer token plus a profile summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: ProfileResponse,
}

/// Profile summary (mirrors the token claims payload)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub name: Option<String>,
    pub email: String,
    pub dept: Option<String>,
}

/// Delete confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
