//! Employee API Handlers

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::{LoginRequest, LoginResponse, MessageResponse, RegisterResponse};
use shared::models::{EmployeeCreate, EmployeeResponse, EmployeeUpdate};

use crate::api::form::FormOrJson;
use crate::auth::{CurrentUser, ensure_self};
use crate::core::ServerState;
use crate::utils::validation::parse_employee_id;
use crate::utils::{AppError, AppResult};

/// Register a new employee
pub async fn register(
    State(state): State<ServerState>,
    FormOrJson { data, photo }: FormOrJson<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let employee = state.employee_service().register(data, photo).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Employee registered successfully".to_string(),
            employee_id: employee.employee_id,
            photo: employee.photo,
        }),
    ))
}

/// Login with email and password
///
/// Every attempt takes at least the configured delay, whatever the outcome.
pub async fn login(
    State(state): State<ServerState>,
    FormOrJson { data, .. }: FormOrJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let started = Instant::now();

    let result = if data.email.trim().is_empty() || data.password.is_empty() {
        Err(AppError::validation("Email and password are required"))
    } else {
        state
            .employee_service()
            .authenticate(&data.email, &data.password)
            .await
    };

    let remaining = state.config.login_delay().saturating_sub(started.elapsed());
    if !remaining.is_zero() {
        tokio::time::sleep(remaining).await;
    }

    let employee = result?;
    let token = state
        .get_jwt_service()
        .generate_token(employee.employee_id, &employee.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(employee_id = employee.employee_id, "Employee logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        employee_data: employee.into(),
    }))
}

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.employee_service().list().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee_id = parse_employee_id(&id)?;
    let employee = state.employee_service().get(employee_id).await?;
    Ok(Json(employee.into()))
}

/// The authenticated employee's own record
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.employee_service().get(user.employee_id).await?;
    Ok(Json(employee.into()))
}

/// Case-insensitive name search
pub async fn search(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.employee_service().search(&name).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// Update own record
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    FormOrJson { data, photo }: FormOrJson<EmployeeUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee_id = parse_employee_id(&id)?;
    ensure_self(&user, employee_id)?;

    if data.is_empty() && photo.is_none() {
        return Err(AppError::validation("No fields to update"));
    }

    let employee = state
        .employee_service()
        .update(employee_id, data, photo)
        .await?;
    Ok(Json(employee.into()))
}

/// Delete own record
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let employee_id = parse_employee_id(&id)?;
    ensure_self(&user, employee_id)?;

    state.employee_service().delete(employee_id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
