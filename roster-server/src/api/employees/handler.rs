//! Employee API Handlers
//!
//! Account signup/login plus roster CRUD and search

use std::time::Duration;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::auth::{self, CurrentEmployee};
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    DeleteResponse, EmployeeCreate, EmployeeResponse, EmployeeUpdate, LoginRequest, LoginResponse,
    ProfileResponse, SignupRequest,
};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /employee/signup - create an account with a hashed credential
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.dept, "dept", MAX_NAME_LEN)?;
    validate_optional_text(&req.position, "position", MAX_NAME_LEN)?;

    // Hash the credential first; plaintext never reaches the store
    let hashed = auth::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let created = employee::create(
        &state.pool,
        EmployeeCreate {
            name: Some(req.name),
            position: req.position,
            dept: req.dept,
            email: req.email,
            password: Some(hashed),
        },
    )
    .await?;

    tracing::info!(employee_id = created.id, email = %created.email, "Employee signed up");

    Ok(Json(EmployeeResponse::from(created)))
}

/// POST /employee/login - verify credentials and issue a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = employee::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let found = match found {
        Some(e) => e,
        None => {
            tracing::warn!(email = %req.email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let Some(hash) = found.password.as_deref() else {
        tracing::warn!(email = %req.email, "Login failed - account has no credential");
        return Err(AppError::invalid_credentials());
    };

    let password_valid = auth::verify_password(&req.password, hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(email = %req.email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let Some(jwt_service) = state.jwt_service() else {
        return Err(AppError::unauthorized("JWT secret not configured"));
    };

    let token = jwt_service
        .generate_token(&found)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(employee_id = found.id, email = %found.email, "Employee logged in");

    Ok(Json(LoginResponse {
        access_token: token,
        user: ProfileResponse {
            name: found.name,
            email: found.email,
            dept: found.dept,
        },
    }))
}

/// GET /employee/profile - current employee profile from token claims
pub async fn profile(
    Extension(current): Extension<CurrentEmployee>,
) -> AppResult<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse {
        name: current.name,
        email: current.email,
        dept: current.dept,
    }))
}

/// GET /employee - list all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = employee::find_all(&state.pool).await?;
    Ok(Json(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub dept: Option<String>,
}

/// GET /employee/search?name=&dept= - filtered list
///
/// name: case-insensitive substring; dept: exact; AND when both present
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    // Blank query params are treated as absent
    let name = query.name.as_deref().filter(|s| !s.is_empty());
    let dept = query.dept.as_deref().filter(|s| !s.is_empty());

    let employees = employee::search(&state.pool, name, dept).await?;
    Ok(Json(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

/// GET /employee/:id - single employee
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    let found = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(EmployeeResponse::from(found)))
}

/// POST /employee - direct record creation (administrative shortcut)
///
/// The optional password field is persisted as supplied and is expected to
/// already be a hash; no hashing is performed here.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.dept, "dept", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;

    let created = employee::create(&state.pool, payload).await?;

    Ok(Json(EmployeeResponse::from(created)))
}

/// PUT /employee/:id - partial update (merge over existing fields)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<EmployeeUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.dept, "dept", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    // A password supplied through update is hashed like at signup
    if let Some(ref password) = payload.password {
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        let hashed = auth::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
        payload.password = Some(hashed);
    }

    let updated = employee::update(&state.pool, id, payload).await?;

    Ok(Json(EmployeeResponse::from(updated)))
}

/// DELETE /employee/:id - delete, confirming with a message
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = employee::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::not_found(format!("Employee {} not found", id)));
    }

    Ok(Json(DeleteResponse {
        message: format!("Employee with id {} is deleted", id),
    }))
}
