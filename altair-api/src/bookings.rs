use crate::error::AppError;
use crate::state::AppState;
use altair_core::booking::{PassengerSpec, PurchaseReceipt, PurchaseRequest};
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PurchaseBody {
    pub payer_tax_id: String,
    #[serde(default)]
    pub passengers: Vec<PassengerBody>,
}

#[derive(Debug, Deserialize)]
pub struct PassengerBody {
    pub name: String,
    #[serde(default)]
    pub first_class: bool,
}

impl From<PurchaseBody> for PurchaseRequest {
    fn from(body: PurchaseBody) -> Self {
        PurchaseRequest {
            payer_tax_id: body.payer_tax_id,
            passengers: body
                .passengers
                .into_iter()
                .map(|p| PassengerSpec {
                    name: p.name,
                    first_class: p.first_class,
                })
                .collect(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/purchase/{flight_id}", post(purchase))
}

async fn purchase(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
    Json(body): Json<PurchaseBody>,
) -> Result<Json<PurchaseReceipt>, AppError> {
    let request = PurchaseRequest::from(body);
    let receipt = state.purchase.purchase(flight_id, &request).await?;
    Ok(Json(receipt))
}
