//! Payments API endpoints

use api_types::payment::{PaymentMethod as ApiMethod, PaymentNew, PaymentReverse};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::{MoneyCents, Payment};

fn map_method(method: ApiMethod) -> engine::PaymentMethod {
    match method {
        ApiMethod::Cash => engine::PaymentMethod::Cash,
        ApiMethod::BankTransfer => engine::PaymentMethod::BankTransfer,
        ApiMethod::Check => engine::PaymentMethod::Check,
        ApiMethod::CreditCard => engine::PaymentMethod::CreditCard,
        ApiMethod::Installment => engine::PaymentMethod::Installment,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentNew>,
) -> Result<Json<Payment>, ServerError> {
    let mut engine = state.engine.write().await;
    let payment = engine.post_payment(
        payload.contract_id,
        MoneyCents::new(payload.amount_minor),
        map_method(payload.method),
        payload.date,
        payload.reference.as_deref(),
        payload.notes.as_deref(),
    )?;
    tracing::info!(
        "posted payment {} of {} against contract {}",
        payment.id,
        payment.amount,
        payment.contract_id
    );

    Ok(Json(payment))
}

pub async fn reverse(
    State(state): State<ServerState>,
    Path(payment_id): Path<Uuid>,
    Json(payload): Json<PaymentReverse>,
) -> Result<Json<Payment>, ServerError> {
    let today = Utc::now().date_naive();

    let mut engine = state.engine.write().await;
    let reversal = engine.reverse_payment(payment_id, &payload.reason, today)?;
    tracing::info!("reversed payment {payment_id} with {}", reversal.id);

    Ok(Json(reversal))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, ServerError> {
    let engine = state.engine.read().await;
    let payments = engine.list_payments(contract_id)?;
    Ok(Json(payments))
}
