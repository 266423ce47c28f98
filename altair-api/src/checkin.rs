use crate::error::AppError;
use crate::state::AppState;
use altair_core::booking::CheckinReceipt;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new().route("/checkin/{ticket_id}", post(check_in))
}

async fn check_in(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<CheckinReceipt>, AppError> {
    let receipt = state.checkin.check_in(ticket_id).await?;
    Ok(Json(receipt))
}
