//! JSON CRUD endpoints for users, events, registrations and FAQ categories

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::AdminState;
use crate::database::Page;
use crate::models::*;
use crate::utils::errors::AmiHelperError;
use crate::utils::helpers::calculate_offset;

type ApiResult<T> = Result<T, StatusCode>;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegistrationQuery {
    pub page: Option<u32>,
    pub event_id: Option<i64>,
    pub is_approved: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub items: Vec<T>,
}

impl AdminState {
    fn window(&self, page: Option<u32>) -> (u32, i64, i64) {
        let page = page.unwrap_or(1).max(1);
        (page, self.page_size as i64, calculate_offset(page, self.page_size))
    }

    fn respond<T>(&self, page: u32, listing: Page<T>) -> Json<ListResponse<T>> {
        Json(ListResponse {
            page,
            page_size: self.page_size,
            total: listing.total,
            items: listing.items,
        })
    }
}

fn status_for(e: AmiHelperError) -> StatusCode {
    match e {
        AmiHelperError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AmiHelperError::UserNotFound { .. }
        | AmiHelperError::EventNotFound { .. }
        | AmiHelperError::RegistrationNotFound { .. }
        | AmiHelperError::CategoryNotFound { .. } => StatusCode::NOT_FOUND,
        AmiHelperError::Database(sqlx::Error::Database(ref db))
            if db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            StatusCode::CONFLICT
        }
        e => {
            error!(error = %e, severity = %e.severity(), "Admin panel store error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Rows still referenced elsewhere cannot be deleted
fn delete_status_for(e: AmiHelperError) -> StatusCode {
    match e {
        AmiHelperError::InvalidInput(_) => StatusCode::CONFLICT,
        e => status_for(e),
    }
}

fn deleted(found: bool) -> StatusCode {
    if found {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// Users

pub async fn list_users(
    State(state): State<AdminState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let (page, limit, offset) = state.window(query.page);
    let listing = state.store.list_users(limit, offset).await.map_err(status_for)?;
    Ok(state.respond(page, listing))
}

pub async fn get_user(State(state): State<AdminState>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    state
        .store
        .find_user(id)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_user(
    State(state): State<AdminState>,
    Json(user): Json<User>,
) -> ApiResult<impl IntoResponse> {
    if state.store.find_user(user.telegram_id).await.map_err(status_for)?.is_some() {
        return Err(StatusCode::CONFLICT);
    }
    let user = state.store.save_user(user).await.map_err(status_for)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Json(mut user): Json<User>,
) -> ApiResult<Json<User>> {
    if state.store.find_user(id).await.map_err(status_for)?.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    user.telegram_id = id;
    state.store.save_user(user).await.map(Json).map_err(status_for)
}

pub async fn delete_user(State(state): State<AdminState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.store.delete_user(id).await.map(deleted).map_err(delete_status_for)
}

// Events

pub async fn list_events(
    State(state): State<AdminState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let (page, limit, offset) = state.window(query.page);
    let listing = state.store.list_events(limit, offset).await.map_err(status_for)?;
    Ok(state.respond(page, listing))
}

pub async fn get_event(State(state): State<AdminState>, Path(id): Path<i64>) -> ApiResult<Json<Event>> {
    state
        .store
        .find_event(id)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_event(
    State(state): State<AdminState>,
    Json(form): Json<EventForm>,
) -> ApiResult<impl IntoResponse> {
    let event = state.store.insert_event(form).await.map_err(status_for)?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Json(form): Json<EventForm>,
) -> ApiResult<Json<Event>> {
    state
        .store
        .update_event(id, form)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_event(State(state): State<AdminState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.store.delete_event(id).await.map(deleted).map_err(delete_status_for)
}

// Registrations

pub async fn list_registrations(
    State(state): State<AdminState>,
    Query(query): Query<RegistrationQuery>,
) -> ApiResult<impl IntoResponse> {
    let (page, limit, offset) = state.window(query.page);
    let filter = RegistrationFilter {
        event_id: query.event_id,
        is_approved: query.is_approved,
    };
    let listing = state
        .store
        .list_registrations(filter, limit, offset)
        .await
        .map_err(status_for)?;
    Ok(state.respond(page, listing))
}

pub async fn get_registration(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EventRegistration>> {
    state
        .store
        .find_registration_by_id(id)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_registration(
    State(state): State<AdminState>,
    Json(form): Json<RegistrationForm>,
) -> ApiResult<impl IntoResponse> {
    let registration = state.store.insert_registration(form).await.map_err(status_for)?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn update_registration(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Json(form): Json<RegistrationForm>,
) -> ApiResult<Json<EventRegistration>> {
    state
        .store
        .update_registration(id, form)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_registration(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.store.delete_registration(id).await.map(deleted).map_err(delete_status_for)
}

// FAQ categories

pub async fn list_categories(
    State(state): State<AdminState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let (page, limit, offset) = state.window(query.page);
    let listing = state.store.list_categories(limit, offset).await.map_err(status_for)?;
    Ok(state.respond(page, listing))
}

pub async fn get_category(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FaqCategory>> {
    state
        .store
        .find_category(id)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_category(
    State(state): State<AdminState>,
    Json(form): Json<FaqCategoryForm>,
) -> ApiResult<impl IntoResponse> {
    let category = state.store.insert_category(form).await.map_err(status_for)?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Json(form): Json<FaqCategoryForm>,
) -> ApiResult<Json<FaqCategory>> {
    state
        .store
        .update_category(id, form)
        .await
        .map_err(status_for)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_category(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.store.delete_category(id).await.map(deleted).map_err(delete_status_for)
}
