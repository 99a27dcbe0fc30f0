use super::state::AppState;
use super::validation::validate_contact;
use crate::booking::{history_from_records, next_session_id, BookingHistoryItem, ScheduledSession};
use crate::catalog::{CatalogFilter, ClassType, ServiceOffering};
use crate::store::{BookingRecord, CreateBooking};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Category label, or "All"
    pub category: Option<String>,

    /// "half" or "full", or "All"
    pub class: Option<String>,

    /// Free-text search over title and description
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub user_name: String,
    pub user_email: String,
    pub service_id: String,
    pub booking_date: NaiveDate,
    pub time_slot: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub booking: BookingRecord,
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /catalog
/// Filtered offering list, catalog declaration order
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let mut filter = CatalogFilter::all();

    if let Some(category) = query.category.filter(|c| c != "All") {
        filter = filter.with_category(category);
    }

    match query.class.as_deref() {
        None | Some("All") => {}
        Some("half") => filter = filter.with_class_type(ClassType::Half),
        Some("full") => filter = filter.with_class_type(ClassType::Full),
        Some(other) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown class filter: {}", other),
                }),
            )
                .into_response();
        }
    }

    if let Some(q) = query.q {
        filter = filter.with_query(q);
    }

    let offerings: Vec<ServiceOffering> = filter
        .apply(&state.catalog)
        .into_iter()
        .cloned()
        .collect();
    (StatusCode::OK, Json(offerings)).into_response()
}

/// POST /bookings
/// Persist a booking via the collaborator and schedule its session
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_contact(&req.user_name, &req.user_email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response();
    }

    let service_title = state
        .catalog
        .offering(&req.service_id)
        .map(|o| o.title.clone())
        .unwrap_or_else(|| req.service_id.clone());

    let create = CreateBooking {
        user_name: req.user_name.clone(),
        user_email: req.user_email.clone(),
        service_id: req.service_id.clone(),
        service_title: service_title.clone(),
        booking_date: req.booking_date.to_string(),
        time_slot: req.time_slot.clone(),
    };

    let booking = match state.store.create(&create).await {
        Ok(record) => record,
        Err(err) => {
            error!("Failed to persist booking: {err:#}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Booking service unavailable".to_string(),
                }),
            )
                .into_response();
        }
    };

    let session = ScheduledSession {
        id: next_session_id(),
        service_id: req.service_id,
        service_title,
        date: req.booking_date,
        time_slot: req.time_slot,
        host_name: state.host_name.clone(),
        host_image: state.host_image.clone(),
        customer_name: req.user_name,
        customer_email: req.user_email,
        customer_bio: String::new(),
    };
    let session_id = session.id.clone();

    state.monitor.add_session(session).await;
    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(booking.id.clone(), session_id.clone());
    }

    info!("Booking {} confirmed (session {})", booking.id, session_id);

    (
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking,
            session_id,
            message: "Booking created successfully".to_string(),
        }),
    )
        .into_response()
}

/// GET /bookings?user_email=
/// Bookings stored for one user
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> impl IntoResponse {
    let Some(user_email) = query.user_email else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing user_email".to_string(),
            }),
        )
            .into_response();
    };

    match state.store.list_for(&user_email).await {
        Ok(bookings) => (StatusCode::OK, Json(BookingListResponse { bookings })).into_response(),
        Err(err) => {
            error!("Failed to list bookings: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Booking service unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /bookings/history?user_email=
/// Stored bookings rendered as upcoming/completed history rows
pub async fn booking_history(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> impl IntoResponse {
    let Some(user_email) = query.user_email else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing user_email".to_string(),
            }),
        )
            .into_response();
    };

    match state.store.list_for(&user_email).await {
        Ok(bookings) => {
            let history: Vec<BookingHistoryItem> =
                history_from_records(&bookings, &state.catalog, state.clock.now());
            (StatusCode::OK, Json(history)).into_response()
        }
        Err(err) => {
            error!("Failed to load booking history: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Booking service unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// DELETE /bookings/:booking_id
/// Cancel a booking and drop its scheduled session
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> impl IntoResponse {
    if let Err(err) = state.store.cancel(&booking_id).await {
        error!("Failed to cancel booking {}: {err:#}", booking_id);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Booking service unavailable".to_string(),
            }),
        )
            .into_response();
    }

    let session_id = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&booking_id)
    };
    if let Some(session_id) = session_id {
        state.monitor.remove_session(&session_id).await;
    }

    info!("Booking {} cancelled", booking_id);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Booking cancelled" })),
    )
        .into_response()
}

/// GET /sessions/active
/// The session whose activity window currently contains "now", if any
pub async fn active_session(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.monitor.current()))
}

/// POST /chat
/// Concierge recommendation over the catalog
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    if req.user_query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing user_query".to_string(),
            }),
        )
            .into_response();
    }

    let menu_context = state.catalog.menu_context();
    let response = state
        .concierge
        .recommend(&req.user_query, &menu_context)
        .await;

    (StatusCode::OK, Json(ChatResponse { response })).into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
