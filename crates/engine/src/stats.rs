//! Summary statistics over a contract collection.
//!
//! The aggregation holds no state of its own: it is a single-pass fold over
//! a snapshot, so it can never drift from the ledger. Callers recompute it
//! whenever the underlying registry changes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    contracts::Contract,
    money::MoneyCents,
    status::{LifecycleStatus, PaymentStatus, resolve},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleCounts {
    pub draft: u64,
    pub approved: u64,
    pub active: u64,
    pub expired: u64,
    pub completed: u64,
    pub cancelled: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaymentCounts {
    pub unpaid: u64,
    pub partially_paid: u64,
    pub fully_paid: u64,
}

/// Aggregated view of a contract collection.
///
/// Counts group by the **resolved** status of each contract, not the
/// author-set state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: u64,
    pub lifecycle: LifecycleCounts,
    pub payment: PaymentCounts,
    pub total_value: MoneyCents,
    pub paid_amount: MoneyCents,
    pub remaining_amount: MoneyCents,
    /// Average `total_value` among contracts resolving `Active`; `None`
    /// when no contract is active. Integer division on cents.
    pub active_avg_value: Option<MoneyCents>,
}

/// Folds a contract collection into [`Stats`] in a single pass.
pub fn summarize<'a, I>(contracts: I, now: NaiveDate) -> Stats
where
    I: IntoIterator<Item = &'a Contract>,
{
    let mut stats = Stats::default();
    let mut active_value_sum = 0i64;
    let mut active_count = 0i64;

    for contract in contracts {
        let resolved = resolve(contract, now);

        stats.total += 1;
        match resolved.lifecycle {
            LifecycleStatus::Draft => stats.lifecycle.draft += 1,
            LifecycleStatus::Approved => stats.lifecycle.approved += 1,
            LifecycleStatus::Active => stats.lifecycle.active += 1,
            LifecycleStatus::Expired => stats.lifecycle.expired += 1,
            LifecycleStatus::Completed => stats.lifecycle.completed += 1,
            LifecycleStatus::Cancelled => stats.lifecycle.cancelled += 1,
        }
        match resolved.payment {
            PaymentStatus::Unpaid => stats.payment.unpaid += 1,
            PaymentStatus::PartiallyPaid => stats.payment.partially_paid += 1,
            PaymentStatus::FullyPaid => stats.payment.fully_paid += 1,
        }

        stats.total_value += contract.total_value;
        stats.paid_amount += contract.paid_amount;
        stats.remaining_amount += contract.remaining_amount();

        if resolved.lifecycle == LifecycleStatus::Active {
            active_value_sum += contract.total_value.cents();
            active_count += 1;
        }
    }

    if active_count > 0 {
        stats.active_avg_value = Some(MoneyCents::new(active_value_sum / active_count));
    }

    stats
}
