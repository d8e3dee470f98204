//! The module contains the representation of a contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    ResultEngine,
    error::EngineError,
    money::MoneyCents,
    util::{normalize_optional_text, normalize_required_name},
};

/// What kind of agreement the contract covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Rental,
    Purchase,
    Maintenance,
    Installation,
}

/// Author-set lifecycle state.
///
/// These are the states an operator sets explicitly. The date/balance rules in
/// [`status`](crate::status) never override them; they only refine the
/// displayed lifecycle (`Active`, `Expired`, `Completed`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplicitStatus {
    Draft,
    Approved,
    Active,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A contract between the operator and a customer.
///
/// Monetary amounts are stored as integer cents ([`MoneyCents`]). The
/// remaining balance is never stored: [`Contract::remaining_amount`] derives
/// it from `total_value - paid_amount`, so the reconciliation invariant holds
/// by construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub contract_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub contract_type: ContractType,
    pub explicit_status: ExplicitStatus,
    pub total_value: MoneyCents,
    pub paid_amount: MoneyCents,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priority: Priority,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contract_number: &str,
        customer_id: Uuid,
        customer_name: &str,
        contract_type: ContractType,
        total_value: MoneyCents,
        start_date: NaiveDate,
        end_date: NaiveDate,
        priority: Priority,
        notes: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let contract_number = normalize_required_name(contract_number, "contract number")?;
        let customer_name = normalize_required_name(customer_name, "customer")?;
        if total_value.is_negative() {
            return Err(EngineError::InvalidAmount(
                "total_value must be >= 0".to_string(),
            ));
        }
        if end_date < start_date {
            return Err(EngineError::InvalidDate(
                "end_date must be >= start_date".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            contract_number,
            customer_id,
            customer_name,
            contract_type,
            explicit_status: ExplicitStatus::Draft,
            total_value,
            paid_amount: MoneyCents::ZERO,
            start_date,
            end_date,
            priority,
            notes: normalize_optional_text(notes),
            created_at,
        })
    }

    /// Derived balance still owed on the contract.
    #[must_use]
    pub fn remaining_amount(&self) -> MoneyCents {
        self.total_value - self.paid_amount
    }
}

/// Mutable contract fields for an update.
///
/// `None` leaves the field unchanged.
#[derive(Clone, Debug, Default)]
pub struct ContractPatch {
    pub contract_number: Option<String>,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub contract_type: Option<ContractType>,
    pub total_value: Option<MoneyCents>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}
