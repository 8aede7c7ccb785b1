//! HTTP handlers for event endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::event::{
    CancelEventCommand, CreateEventCommand, GetEventQuery, RecordDiveCountCommand,
    SubscribeToEventCommand, UnsubscribeFromEventCommand, UpdateEventCommand,
};
use crate::domain::foundation::EventId;

use super::dto::{CreateEventRequest, DiveCountRequest, UpdateEventRequest};
use crate::adapters::http::extract::{parse_user_id, AuthenticatedUser};
use crate::adapters::http::{ApiError, AppState};

/// POST /api/events - Create an event organised by the caller
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateEventCommand {
        organizer_id: user.user_id,
        details: request.details,
        status: request.status,
    };
    let view = state.create_event_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_event_handler()
        .handle(GetEventQuery { event_id })
        .await?;
    Ok(Json(view))
}

/// PUT /api/events/:id - Replace details, status and the participant set
pub async fn update_event(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(event_id): Path<EventId>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let participants = request
        .participants
        .iter()
        .map(|raw| parse_user_id("participants", raw))
        .collect::<Result<Vec<_>, _>>()?;

    let cmd = UpdateEventCommand {
        event_id,
        organizer_id: parse_user_id("organizer_id", &request.organizer_id)?,
        details: request.details,
        status: request.status,
        participants,
    };
    let view = state.update_event_handler().handle(cmd).await?;
    Ok(Json(view))
}

/// POST /api/events/:id/cancel
pub async fn cancel_event(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state
        .cancel_event_handler()
        .handle(CancelEventCommand { event_id })
        .await?;
    Ok(Json(event))
}

/// POST /api/events/:id/participants - Subscribe the caller
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubscribeToEventCommand {
        event_id,
        user_id: user.user_id,
    };
    let view = state.subscribe_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// DELETE /api/events/:id/participants - Unsubscribe the caller
pub async fn unsubscribe(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UnsubscribeFromEventCommand {
        event_id,
        user_id: user.user_id,
    };
    let view = state.unsubscribe_handler().handle(cmd).await?;
    Ok(Json(view))
}

/// PUT /api/events/:id/participants/:user_id/dives
pub async fn record_dive_count(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((event_id, user_id)): Path<(EventId, String)>,
    Json(request): Json<DiveCountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RecordDiveCountCommand {
        event_id,
        user_id: parse_user_id("user_id", &user_id)?,
        dive_count: request.dive_count,
    };
    state.dive_count_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
