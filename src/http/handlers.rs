//! Handlers for the `cars` resource.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::{validate, Car, CarDraft, CarId};
use crate::http::error::ApiError;
use crate::http::etag;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::query::CarFilter;
use crate::security::{authorize, Caller};

/// Unwrap the `{id}` segment, reporting a malformed one as a JSON 400.
fn car_id(path: Result<Path<CarId>, PathRejection>) -> Result<CarId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /cars`
pub async fn list_cars(
    State(state): State<AppState>,
    query: Result<Query<CarFilter>, QueryRejection>,
) -> Result<Json<Vec<Car>>, ApiError> {
    let Query(filter) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let cars = state.store.list(&filter);
    tracing::debug!(?filter, results = cars.len(), "Listed cars");
    Ok(Json(cars))
}

/// `GET /cars/count`, ignoring any filter.
pub async fn count_cars(State(state): State<AppState>) -> String {
    state.store.count().to_string()
}

/// `GET /cars/{id}` with conditional GET support.
pub async fn get_car(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = car_id(path)?;
    let car = state.store.get(id).ok_or(ApiError::NotFound(id))?;
    let tag = etag::compute(&car);
    let tag_value =
        HeaderValue::from_str(&tag).map_err(|e| ApiError::Internal(e.to_string()))?;

    let fresh = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| etag::matches(v, &tag));

    if fresh {
        tracing::debug!(car_id = id, etag = %tag, "Car not modified");
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, tag_value)]).into_response());
    }

    Ok(([(header::ETAG, tag_value)], Json(car)).into_response())
}

/// `POST /cars`
pub async fn create_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CarDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(draft) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate(&draft, state.store.as_ref(), None)?;

    let car = state.store.insert(draft)?;
    tracing::info!(
        request_id = %request_id(&headers),
        car_id = car.id,
        name = %car.name,
        "Car created"
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/cars/{}", car.id))],
    ))
}

/// `PUT /cars/{id}`
pub async fn update_car(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<CarDraft>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = car_id(path)?;
    let Json(draft) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if draft.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::IdMismatch);
    }
    if state.store.get(id).is_none() {
        return Err(ApiError::NotFound(id));
    }
    validate(&draft, state.store.as_ref(), Some(id))?;

    let car = state.store.replace(draft.into_car(id))?;
    tracing::info!(
        request_id = %request_id(&headers),
        car_id = car.id,
        name = %car.name,
        "Car updated"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cars/{id}`, admin only.
pub async fn delete_car(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    caller: Caller,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let id = car_id(path)?;
    let identity = authorize(&caller, state.roles.as_ref(), &state.admin_role)?;

    state.store.remove(id)?;
    tracing::info!(
        request_id = %request_id(&headers),
        car_id = id,
        user = %identity,
        "Car deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
