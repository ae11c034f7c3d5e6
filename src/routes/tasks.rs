use crate::{
    auth::{token::access_token_cookie, MessageResponse, TokenService},
    error::AppError,
    models::{Task, TaskInput},
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves the task list.
///
/// Requires a valid session token; the renewed token rides back on the
/// response cookie. Reads skip the CSRF check, which protects state changes
/// only.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[get("")]
pub async fn get_tasks(
    store: web::Data<Store>,
    tokens: web::Data<TokenService>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (renewed, _claims) = tokens.verify_token_and_renew(&req)?;

    let tasks = store.list_tasks().await?;

    Ok(HttpResponse::Ok()
        .cookie(access_token_cookie(&renewed))
        .json(tasks))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If no task with the given ID exists.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<Store>,
    tokens: web::Data<TokenService>,
    task_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (renewed, _claims) = tokens.verify_token_and_renew(&req)?;

    let task = store
        .find_task(task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok()
        .cookie(access_token_cookie(&renewed))
        .json(task))
}

/// Creates a new task.
///
/// The session and CSRF checks run before the payload is looked at, so a
/// rejected request never touches the store.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If input validation on `TaskInput` fails.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `403 Forbidden`: If the CSRF header is missing or does not match.
#[post("")]
pub async fn create_task(
    store: web::Data<Store>,
    tokens: web::Data<TokenService>,
    task_data: web::Json<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (renewed, _claims) = tokens.verify_csrf_and_renew(&req)?;

    task_data.validate()?;
    let task = store.insert_task(Task::new(task_data.into_inner())).await?;

    Ok(HttpResponse::Created()
        .cookie(access_token_cookie(&renewed))
        .json(task))
}

/// Updates an existing task.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If input validation on `TaskInput` fails.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `403 Forbidden`: If the CSRF header is missing or does not match.
/// - `404 Not Found`: If no task with the given ID exists; nothing is written.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<Store>,
    tokens: web::Data<TokenService>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (renewed, _claims) = tokens.verify_csrf_and_renew(&req)?;

    task_data.validate()?;
    let task = store
        .update_task(task_id.into_inner(), task_data.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Update task failed".into()))?;

    Ok(HttpResponse::Ok()
        .cookie(access_token_cookie(&renewed))
        .json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `200 OK`: Confirmation message on successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `403 Forbidden`: If the CSRF header is missing or does not match.
/// - `404 Not Found`: If no task with the given ID exists.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<Store>,
    tokens: web::Data<TokenService>,
    task_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (renewed, _claims) = tokens.verify_csrf_and_renew(&req)?;

    if !store.delete_task(task_id.into_inner()).await? {
        return Err(AppError::NotFound("Delete task failed".into()));
    }

    Ok(HttpResponse::Ok()
        .cookie(access_token_cookie(&renewed))
        .json(MessageResponse {
            message: "Successfully deleted".into(),
        }))
}
