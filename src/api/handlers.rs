//! HTTP handlers
//!
//! Thin adapters: parse the request, make one engine call, shape the JSON.
//! Identifiers in the path that are not valid UUIDs cannot name a record and
//! answer 404; malformed identifiers in a body or query string answer 400.

use super::error::ApiError;
use super::state::AppState;
use crate::core::{
    Booking, BookingDetails, BookingId, BookingReceipt, Conference, ConferenceId, ConferenceStats,
    Reservation, ReservationId, ReservationView, User, UserId,
};
use crate::error::{BookingError, Entity};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Body shared by booking, reservation and enqueue requests
#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    pub user_id: String,
    pub conference_id: String,
    pub ticket_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub user_id: String,
    pub conference_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PositionQuery {
    pub user_id: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConferencesResponse {
    pub conferences: Vec<Conference>,
    pub count: usize,
    pub stats: BTreeMap<ConferenceId, ConferenceStats>,
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse<T> {
    pub bookings: Vec<T>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub status: &'static str,
    pub reservations: Vec<ReservationView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub status: &'static str,
    pub reservation: Reservation,
    pub conference: Conference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReservationViewResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub view: ReservationView,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub receipt: BookingReceipt,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub status: &'static str,
    /// 1-based; 0 when not queued
    pub position: usize,
}

// ============================================================================
// Identifier parsing
// ============================================================================

fn path_id<T>(
    raw: &str,
    entity: Entity,
    parse: impl FnOnce(&str) -> Result<T, uuid::Error>,
) -> ApiResult<T> {
    parse(raw).map_err(|_| ApiError::not_found(entity, raw))
}

fn body_user_id(raw: &str) -> ApiResult<UserId> {
    UserId::parse_str(raw).map_err(|_| ApiError::bad_request(format!("malformed user_id: {raw}")))
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        time: Utc::now(),
    })
}

pub async fn list_conferences(State(state): State<AppState>) -> Json<ConferencesResponse> {
    let listings = state.repo.list_conferences();
    let stats = listings
        .iter()
        .map(|l| (l.conference.id.clone(), l.stats))
        .collect();
    let conferences: Vec<Conference> = listings.into_iter().map(|l| l.conference).collect();

    Json(ConferencesResponse {
        count: conferences.len(),
        conferences,
        stats,
    })
}

/// A duplicate contact answers 409 with the requester already on file
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(req) = body?;
    match state.repo.create_user(&req.name, &req.email) {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(err @ BookingError::DuplicateContact { .. }) => state
            .repo
            .find_user_by_contact(&req.email)
            .map(|existing| (StatusCode::CONFLICT, Json(existing)))
            .ok_or_else(|| err.into()),
        Err(err) => Err(err.into()),
    }
}

pub async fn user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<BookingsResponse<Booking>>> {
    let user_id = path_id(&user_id, Entity::User, UserId::parse_str)?;
    let bookings = state.repo.bookings_for_user(&user_id);
    Ok(Json(BookingsResponse {
        count: bookings.len(),
        bookings,
    }))
}

pub async fn user_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ReservationsResponse>> {
    let user_id = path_id(&user_id, Entity::User, UserId::parse_str)?;
    let reservations = state.repo.reservations_for_user(&user_id);
    Ok(Json(ReservationsResponse {
        status: "success",
        count: reservations.len(),
        reservations,
    }))
}

pub async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<TicketRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let Json(req) = body?;
    let user_id = body_user_id(&req.user_id)?;
    let booking = state.repo.book(
        &user_id,
        &ConferenceId::from(req.conference_id),
        req.ticket_count,
    )?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn all_bookings(State(state): State<AppState>) -> Json<BookingsResponse<BookingDetails>> {
    let bookings = state.repo.all_bookings();
    Json(BookingsResponse {
        count: bookings.len(),
        bookings,
    })
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingDetails>> {
    let id = path_id(&id, Entity::Booking, BookingId::parse_str)?;
    Ok(Json(state.repo.get_booking(&id)?))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    body: Result<Json<TicketRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReservationResponse>)> {
    let Json(req) = body?;
    let user_id = body_user_id(&req.user_id)?;
    let receipt = state.repo.create_reservation(
        &user_id,
        &ConferenceId::from(req.conference_id),
        req.ticket_count,
    )?;

    let message = format!(
        "Seats reserved for {} seconds. Complete payment to confirm booking.",
        state.hold_duration.num_seconds()
    );
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            status: "success",
            reservation: receipt.reservation,
            conference: receipt.conference,
            message: Some(message),
        }),
    ))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReservationViewResponse>> {
    let id = path_id(&id, Entity::Reservation, ReservationId::parse_str)?;
    let view = state.repo.get_reservation(&id)?;
    Ok(Json(ReservationViewResponse {
        status: "success",
        view,
    }))
}

pub async fn confirm_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ConfirmResponse>> {
    let id = path_id(&id, Entity::Reservation, ReservationId::parse_str)?;
    let receipt = state.repo.confirm_reservation(&id)?;
    Ok(Json(ConfirmResponse {
        status: "success",
        receipt,
        message: "Payment confirmed! Booking created successfully.",
    }))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(&id, Entity::Reservation, ReservationId::parse_str)?;
    state.repo.cancel_reservation(&id)?;
    Ok(Json(MessageResponse {
        status: "success",
        message: "Reservation cancelled successfully.",
    }))
}

pub async fn enqueue(
    State(state): State<AppState>,
    body: Result<Json<TicketRequest>, JsonRejection>,
) -> ApiResult<Json<PositionResponse>> {
    let Json(req) = body?;
    let user_id = body_user_id(&req.user_id)?;
    let position = state.repo.enqueue(
        &user_id,
        &ConferenceId::from(req.conference_id),
        req.ticket_count,
    )?;
    Ok(Json(PositionResponse {
        status: "success",
        position,
    }))
}

pub async fn queue_position(
    State(state): State<AppState>,
    Path(conference_id): Path<String>,
    Query(query): Query<PositionQuery>,
) -> ApiResult<Json<PositionResponse>> {
    let raw = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("user_id required"))?;
    let user_id = body_user_id(&raw)?;

    let position = state
        .repo
        .queue_position(&user_id, &ConferenceId::from(conference_id))
        .unwrap_or(0);
    Ok(Json(PositionResponse {
        status: "success",
        position,
    }))
}

pub async fn claim(
    State(state): State<AppState>,
    body: Result<Json<ClaimRequest>, JsonRejection>,
) -> ApiResult<Json<ReservationResponse>> {
    let Json(req) = body?;
    let user_id = body_user_id(&req.user_id)?;
    let receipt = state
        .repo
        .claim(&user_id, &ConferenceId::from(req.conference_id))?;
    Ok(Json(ReservationResponse {
        status: "success",
        reservation: receipt.reservation,
        conference: receipt.conference,
        message: None,
    }))
}
