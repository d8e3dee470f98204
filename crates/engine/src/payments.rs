//! Payment primitives.
//!
//! A `Payment` is an immutable ledger record posted against a contract.
//! Corrections never edit a record in place: a reversal is a new
//! negative-amount record referencing the original.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::normalize_optional_text};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Check,
    CreditCard,
    Installment,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub contract_id: Uuid,
    /// Signed amount in cents. Positive for postings, negative only for
    /// reversal records.
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    /// Set on reversal records: the payment this record undoes.
    pub reversed_payment_id: Option<Uuid>,
}

impl Payment {
    pub fn new(
        contract_id: Uuid,
        amount: MoneyCents,
        method: PaymentMethod,
        date: NaiveDate,
        reference: Option<&str>,
        notes: Option<&str>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            contract_id,
            amount,
            date,
            method,
            reference: normalize_optional_text(reference),
            notes: normalize_optional_text(notes),
            reversed_payment_id: None,
        })
    }

    /// Builds the reversal record for `original`.
    ///
    /// The caller is responsible for checking that the reversal keeps the
    /// contract's paid amount non-negative.
    pub(crate) fn reversal_of(original: &Payment, reason: &str, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_id: original.contract_id,
            amount: -original.amount,
            date,
            method: original.method,
            reference: original.reference.clone(),
            notes: normalize_optional_text(Some(reason)),
            reversed_payment_id: Some(original.id),
        }
    }

    /// Returns `true` if this record is a reversal rather than a posting.
    #[must_use]
    pub fn is_reversal(&self) -> bool {
        self.reversed_payment_id.is_some()
    }
}
