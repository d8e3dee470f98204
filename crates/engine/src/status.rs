//! Derived contract status.
//!
//! Every collaborator renders lifecycle and payment state from this single
//! derivation instead of re-implementing the date/balance rules. Resolution
//! is a pure function of the contract snapshot and the caller-supplied
//! clock: it never mutates its inputs and calling it twice with the same
//! inputs yields the same output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::contracts::{Contract, ExplicitStatus};

/// Displayed stage of a contract, refined from the author-set state by the
/// date and balance rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Draft,
    Approved,
    Active,
    Expired,
    Completed,
    Cancelled,
}

/// How much of the contract value has been collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    FullyPaid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStatus {
    pub lifecycle: LifecycleStatus,
    pub payment: PaymentStatus,
}

/// Computes the current lifecycle and payment status of a contract.
///
/// Rules, first match wins:
///
/// 1. an explicit `Cancelled` is terminal and beats every date rule;
/// 2. an explicit `Draft` stays `Draft`;
/// 3. an explicit `Approved` before `start_date` is still `Approved`;
/// 4. past `end_date` the contract is `Completed` when fully settled,
///    `Expired` otherwise (the distinction separates "needs collection"
///    from "closed cleanly");
/// 5. anything else is `Active`.
#[must_use]
pub fn resolve(contract: &Contract, now: NaiveDate) -> ResolvedStatus {
    let payment = if contract.remaining_amount().is_zero() {
        PaymentStatus::FullyPaid
    } else if contract.paid_amount.is_zero() {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::PartiallyPaid
    };

    let lifecycle = match contract.explicit_status {
        ExplicitStatus::Cancelled => LifecycleStatus::Cancelled,
        ExplicitStatus::Draft => LifecycleStatus::Draft,
        ExplicitStatus::Approved if now < contract.start_date => LifecycleStatus::Approved,
        _ if now > contract.end_date => {
            if payment == PaymentStatus::FullyPaid {
                LifecycleStatus::Completed
            } else {
                LifecycleStatus::Expired
            }
        }
        _ => LifecycleStatus::Active,
    };

    ResolvedStatus { lifecycle, payment }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{ContractType, MoneyCents, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract(explicit: ExplicitStatus, total: i64, paid: i64) -> Contract {
        let mut contract = Contract::new(
            "CTR-2024-001",
            Uuid::new_v4(),
            "Impresa Rossi",
            ContractType::Rental,
            MoneyCents::new(total),
            date(2024, 1, 15),
            date(2024, 7, 15),
            Priority::Medium,
            None,
            Utc::now(),
        )
        .unwrap();
        contract.explicit_status = explicit;
        contract.paid_amount = MoneyCents::new(paid);
        contract
    }

    #[test]
    fn cancelled_wins_over_dates_and_keeps_payment_state() {
        let contract = contract(ExplicitStatus::Cancelled, 10_000, 4_000);

        // Evaluated well past end_date: the date rule must not apply.
        let resolved = resolve(&contract, date(2025, 1, 1));
        assert_eq!(resolved.lifecycle, LifecycleStatus::Cancelled);
        assert_eq!(resolved.payment, PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn draft_stays_draft() {
        let contract = contract(ExplicitStatus::Draft, 10_000, 0);
        let resolved = resolve(&contract, date(2024, 8, 1));
        assert_eq!(resolved.lifecycle, LifecycleStatus::Draft);
        assert_eq!(resolved.payment, PaymentStatus::Unpaid);
    }

    #[test]
    fn approved_before_start_then_active() {
        let contract = contract(ExplicitStatus::Approved, 10_000, 0);

        let before = resolve(&contract, date(2024, 1, 1));
        assert_eq!(before.lifecycle, LifecycleStatus::Approved);

        // On start_date the contract activates.
        let on_start = resolve(&contract, date(2024, 1, 15));
        assert_eq!(on_start.lifecycle, LifecycleStatus::Active);
    }

    #[test]
    fn past_end_unpaid_is_expired() {
        let contract = contract(ExplicitStatus::Approved, 10_000, 5_000);
        let resolved = resolve(&contract, date(2024, 8, 1));
        assert_eq!(resolved.lifecycle, LifecycleStatus::Expired);
        assert_eq!(resolved.payment, PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn past_end_fully_paid_is_completed() {
        let contract = contract(ExplicitStatus::Active, 10_000, 10_000);
        let resolved = resolve(&contract, date(2024, 8, 1));
        assert_eq!(resolved.lifecycle, LifecycleStatus::Completed);
        assert_eq!(resolved.payment, PaymentStatus::FullyPaid);
    }

    #[test]
    fn on_end_date_is_still_active() {
        let contract = contract(ExplicitStatus::Active, 10_000, 0);
        let resolved = resolve(&contract, date(2024, 7, 15));
        assert_eq!(resolved.lifecycle, LifecycleStatus::Active);
    }

    #[test]
    fn zero_value_contract_counts_as_fully_paid() {
        let contract = contract(ExplicitStatus::Active, 0, 0);
        let resolved = resolve(&contract, date(2024, 3, 1));
        assert_eq!(resolved.payment, PaymentStatus::FullyPaid);
    }

    #[test]
    fn resolve_is_idempotent_and_pure() {
        let contract = contract(ExplicitStatus::Approved, 10_000, 2_500);
        let snapshot = contract.clone();
        let now = date(2024, 8, 1);

        assert_eq!(resolve(&contract, now), resolve(&contract, now));
        assert_eq!(contract, snapshot);
    }
}
