//! Contracts API endpoints

use api_types::contract::{
    ContractCancelled, ContractNew, ContractQuery, ContractQueryResponse, ContractType as ApiType,
    ContractUpdate, ContractView, LifecycleStatus as ApiLifecycle, PaymentStatus as ApiPayment,
    Priority as ApiPriority,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, statistics};
use engine::{ContractFilter, ContractPatch, MoneyCents, resolve};

fn map_type(contract_type: ApiType) -> engine::ContractType {
    match contract_type {
        ApiType::Rental => engine::ContractType::Rental,
        ApiType::Purchase => engine::ContractType::Purchase,
        ApiType::Maintenance => engine::ContractType::Maintenance,
        ApiType::Installation => engine::ContractType::Installation,
    }
}

fn map_type_view(contract_type: engine::ContractType) -> ApiType {
    match contract_type {
        engine::ContractType::Rental => ApiType::Rental,
        engine::ContractType::Purchase => ApiType::Purchase,
        engine::ContractType::Maintenance => ApiType::Maintenance,
        engine::ContractType::Installation => ApiType::Installation,
    }
}

fn map_lifecycle(status: ApiLifecycle) -> engine::LifecycleStatus {
    match status {
        ApiLifecycle::Draft => engine::LifecycleStatus::Draft,
        ApiLifecycle::Approved => engine::LifecycleStatus::Approved,
        ApiLifecycle::Active => engine::LifecycleStatus::Active,
        ApiLifecycle::Expired => engine::LifecycleStatus::Expired,
        ApiLifecycle::Completed => engine::LifecycleStatus::Completed,
        ApiLifecycle::Cancelled => engine::LifecycleStatus::Cancelled,
    }
}

fn map_lifecycle_view(status: engine::LifecycleStatus) -> ApiLifecycle {
    match status {
        engine::LifecycleStatus::Draft => ApiLifecycle::Draft,
        engine::LifecycleStatus::Approved => ApiLifecycle::Approved,
        engine::LifecycleStatus::Active => ApiLifecycle::Active,
        engine::LifecycleStatus::Expired => ApiLifecycle::Expired,
        engine::LifecycleStatus::Completed => ApiLifecycle::Completed,
        engine::LifecycleStatus::Cancelled => ApiLifecycle::Cancelled,
    }
}

fn map_payment_view(status: engine::PaymentStatus) -> ApiPayment {
    match status {
        engine::PaymentStatus::Unpaid => ApiPayment::Unpaid,
        engine::PaymentStatus::PartiallyPaid => ApiPayment::PartiallyPaid,
        engine::PaymentStatus::FullyPaid => ApiPayment::FullyPaid,
    }
}

fn map_priority(priority: ApiPriority) -> engine::Priority {
    match priority {
        ApiPriority::Low => engine::Priority::Low,
        ApiPriority::Medium => engine::Priority::Medium,
        ApiPriority::High => engine::Priority::High,
    }
}

fn map_priority_view(priority: engine::Priority) -> ApiPriority {
    match priority {
        engine::Priority::Low => ApiPriority::Low,
        engine::Priority::Medium => ApiPriority::Medium,
        engine::Priority::High => ApiPriority::High,
    }
}

pub(crate) fn contract_view(
    contract: &engine::Contract,
    resolved: engine::ResolvedStatus,
) -> ContractView {
    ContractView {
        id: contract.id,
        contract_number: contract.contract_number.clone(),
        customer_id: contract.customer_id,
        customer_name: contract.customer_name.clone(),
        contract_type: map_type_view(contract.contract_type),
        lifecycle_status: map_lifecycle_view(resolved.lifecycle),
        payment_status: map_payment_view(resolved.payment),
        total_value_minor: contract.total_value.cents(),
        paid_minor: contract.paid_amount.cents(),
        remaining_minor: contract.remaining_amount().cents(),
        start_date: contract.start_date,
        end_date: contract.end_date,
        priority: map_priority_view(contract.priority),
        notes: contract.notes.clone(),
        created_at: contract.created_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContractNew>,
) -> Result<Json<ContractView>, ServerError> {
    let now = Utc::now();
    let today = now.date_naive();

    let mut engine = state.engine.write().await;
    let contract = engine.create_contract(
        &payload.contract_number,
        payload.customer_id,
        &payload.customer_name,
        map_type(payload.contract_type),
        MoneyCents::new(payload.total_value_minor),
        payload.start_date,
        payload.end_date,
        map_priority(payload.priority),
        payload.notes.as_deref(),
        now,
    )?;
    tracing::info!("created contract {} ({})", contract.contract_number, contract.id);

    let resolved = resolve(&contract, today);
    Ok(Json(contract_view(&contract, resolved)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<ContractView>, ServerError> {
    let today = Utc::now().date_naive();

    let engine = state.engine.read().await;
    let contract = engine.contract(contract_id)?;
    let resolved = resolve(contract, today);
    Ok(Json(contract_view(contract, resolved)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
    Json(payload): Json<ContractUpdate>,
) -> Result<Json<ContractView>, ServerError> {
    let today = Utc::now().date_naive();
    let patch = ContractPatch {
        contract_number: payload.contract_number,
        customer_id: payload.customer_id,
        customer_name: payload.customer_name,
        contract_type: payload.contract_type.map(map_type),
        total_value: payload.total_value_minor.map(MoneyCents::new),
        start_date: payload.start_date,
        end_date: payload.end_date,
        priority: payload.priority.map(map_priority),
        notes: payload.notes,
    };

    let mut engine = state.engine.write().await;
    let contract = engine.update_contract(contract_id, patch, today)?;

    let resolved = resolve(&contract, today);
    Ok(Json(contract_view(&contract, resolved)))
}

pub async fn approve(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<ContractView>, ServerError> {
    let today = Utc::now().date_naive();

    let mut engine = state.engine.write().await;
    let contract = engine.approve_contract(contract_id)?;
    tracing::info!("approved contract {}", contract.contract_number);

    let resolved = resolve(&contract, today);
    Ok(Json(contract_view(&contract, resolved)))
}

pub async fn activate(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<ContractView>, ServerError> {
    let today = Utc::now().date_naive();

    let mut engine = state.engine.write().await;
    let contract = engine.activate_contract(contract_id)?;
    tracing::info!("activated contract {}", contract.contract_number);

    let resolved = resolve(&contract, today);
    Ok(Json(contract_view(&contract, resolved)))
}

pub async fn cancel(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<ContractCancelled>, ServerError> {
    let today = Utc::now().date_naive();

    let mut engine = state.engine.write().await;
    let outcome = engine.cancel_contract(contract_id, today)?;

    let warning = outcome.outstanding.is_positive().then(|| {
        format!(
            "contract cancelled with outstanding balance {}",
            outcome.outstanding
        )
    });
    if let Some(warning) = &warning {
        tracing::warn!("{} {warning}", outcome.contract.contract_number);
    }

    let resolved = resolve(&outcome.contract, today);
    Ok(Json(ContractCancelled {
        contract: contract_view(&outcome.contract, resolved),
        warning,
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(contract_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_contract(contract_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn query(
    State(state): State<ServerState>,
    Json(payload): Json<ContractQuery>,
) -> Result<Json<ContractQueryResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let criteria = ContractFilter {
        search: payload.search,
        contract_type: payload.contract_type.map(map_type),
        lifecycle_status: payload.lifecycle_status.map(map_lifecycle),
        min_value: payload.min_value_minor,
        max_value: payload.max_value_minor,
        start_date_from: payload.start_date_from,
        start_date_to: payload.start_date_to,
        end_date_from: payload.end_date_from,
        end_date_to: payload.end_date_to,
        has_overdue: payload.has_overdue.unwrap_or(false),
    };

    let engine = state.engine.read().await;
    let (contracts, stats) = engine.query(&criteria, today);

    Ok(Json(ContractQueryResponse {
        contracts: contracts
            .iter()
            .map(|(contract, resolved)| contract_view(contract, *resolved))
            .collect(),
        stats: statistics::stats_view(stats),
    }))
}
