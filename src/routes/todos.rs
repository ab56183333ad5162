use crate::{
    auth::CurrentUser,
    db::DbConn,
    error::AppError,
    models::{Todo, TodoInput, TodoPath},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

fn not_found() -> AppError {
    AppError::NotFound("Todo not found.".into())
}

/// Lists every todo, oldest first.
///
/// Todos are not filtered by owner.
#[get("/")]
pub async fn read_all(mut db: DbConn) -> Result<impl Responder, AppError> {
    let todos = Todo::all(&mut db).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves a single todo.
///
/// ## Responses:
/// - `200 OK`: the todo.
/// - `404 Not Found`: no todo has this id.
/// - `422 Unprocessable Entity`: the id is below 1.
#[get("/todo/{todo_id}")]
pub async fn read_todo(
    mut db: DbConn,
    path: web::Path<TodoPath>,
) -> Result<impl Responder, AppError> {
    path.validate()?;

    let todo = Todo::find(&mut db, path.todo_id).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Creates a todo owned by the caller.
///
/// ## Responses:
/// - `201 Created`: the stored todo, including its id.
/// - `422 Unprocessable Entity`: title, description or priority out of bounds.
#[post("/todo")]
pub async fn create_todo(
    mut db: DbConn,
    user: CurrentUser,
    todo_request: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_request.validate()?;

    let todo = Todo::insert(&mut db, &todo_request, Some(user.id)).await?;
    log::debug!("User {} created todo {}", user.username, todo.id);

    Ok(HttpResponse::Created().json(todo))
}

/// Replaces title, description, priority and completion of a todo.
///
/// ## Responses:
/// - `204 No Content`: updated.
/// - `404 Not Found`: no todo has this id.
/// - `422 Unprocessable Entity`: invalid id or body.
#[put("/todo/{todo_id}")]
pub async fn update_todo(
    mut db: DbConn,
    path: web::Path<TodoPath>,
    todo_request: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    path.validate()?;
    todo_request.validate()?;

    if !Todo::update(&mut db, path.todo_id, &todo_request).await? {
        return Err(not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes a todo.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no todo has this id (including one already deleted).
#[delete("/todo/{todo_id}")]
pub async fn delete_todo(
    mut db: DbConn,
    path: web::Path<TodoPath>,
) -> Result<impl Responder, AppError> {
    path.validate()?;

    if !Todo::delete(&mut db, path.todo_id).await? {
        return Err(not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}
