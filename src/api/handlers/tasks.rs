//! Task handlers.
//!
//! Task ownership is a weak reference: creation requires an existing
//! account, but a stored task may outlive it, in which case responses
//! carry `owner: null`.

use crate::{
    auth::middleware::AuthUser,
    db::{Account, TaskOwner, TaskWithOwner},
    types::{
        AccountSummary, AppError, CreateTaskRequest, Result, TaskResponse, TaskStatus,
        UpdateTaskRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

/// Demo tasks created by the per-account seed endpoint.
const SEED_TASKS: &[(&str, TaskStatus)] = &[
    ("Wake up", TaskStatus::Open),
    ("Drink coffee", TaskStatus::InProcess),
    ("Go to sleep", TaskStatus::Canceled),
];

fn summary_from_account(account: &Account) -> AccountSummary {
    AccountSummary {
        id: account.id.clone(),
        email: account.email.clone(),
        roles: account.roles.clone(),
    }
}

fn summary_from_owner(owner: TaskOwner) -> AccountSummary {
    AccountSummary {
        id: owner.id,
        email: owner.email,
        roles: owner.roles,
    }
}

fn response_from_joined(entry: TaskWithOwner) -> TaskResponse {
    TaskResponse {
        id: entry.task.id,
        title: entry.task.title,
        status: entry.task.status,
        owner: entry.owner.map(summary_from_owner),
    }
}

/// Seed demo tasks for an account
#[utoipa::path(
    get,
    path = "/api/accounts/{id}/tasks/seed",
    params(
        ("id" = String, Path, description = "Owning account id")
    ),
    responses(
        (status = 200, description = "Tasks created", body = Vec<TaskResponse>),
        (status = 404, description = "Account not found")
    ),
    tag = "tasks"
)]
pub async fn seed_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TaskResponse>>> {
    let account = state
        .store
        .get_account_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account does not exist".to_string()))?;

    let owner = summary_from_account(&account);
    let mut created = Vec::with_capacity(SEED_TASKS.len());

    for (title, status) in SEED_TASKS {
        let task_id = Uuid::new_v4().to_string();
        state
            .store
            .create_task(&task_id, title, *status, &account.id)
            .await?;

        created.push(TaskResponse {
            id: task_id,
            title: title.to_string(),
            status: *status,
            owner: Some(owner.clone()),
        });
    }

    Ok(Json(created))
}

/// List all tasks with their owners
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "All tasks", body = Vec<TaskResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer" = []))
)]
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskResponse>>> {
    let tasks = state.store.list_tasks().await?;

    let responses: Vec<TaskResponse> = tasks.into_iter().map(response_from_joined).collect();

    Ok(Json(responses))
}

/// Create a task owned by an existing account
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Owner account not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }

    // Two-step lookup-then-act: the owner must exist at creation time
    let account = state
        .store
        .get_account_by_id(&payload.owner)
        .await?
        .ok_or_else(|| AppError::NotFound("Account does not exist".to_string()))?;

    let task_id = Uuid::new_v4().to_string();
    state
        .store
        .create_task(&task_id, &payload.title, payload.status, &account.id)
        .await?;

    tracing::debug!(actor = %claims.sub, task_id = %task_id, "task created");

    Ok(Json(TaskResponse {
        id: task_id,
        title: payload.title,
        status: payload.status,
        owner: Some(summary_from_account(&account)),
    }))
}

/// Update a task's title or status
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    params(
        ("id" = String, Path, description = "Task id")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskResponse),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    let affected = state
        .store
        .update_task(&id, payload.title.as_deref(), payload.status)
        .await?;

    if affected == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    let task = state
        .store
        .get_task(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let owner = state
        .store
        .get_account_by_id(&task.owner_id)
        .await?
        .map(|account| summary_from_account(&account));

    Ok(Json(TaskResponse {
        id: task.id,
        title: task.title,
        status: task.status,
        owner,
    }))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = String, Path, description = "Task id")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::http::StatusCode> {
    let affected = state.store.delete_task(&id).await?;

    if affected == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    Ok(axum::http::StatusCode::NO_CONTENT)
}
