//! Statistics API endpoints

use api_types::stats::{LifecycleCountsView, PaymentCountsView, StatsView};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::server::ServerState;
use engine::Stats;

pub(crate) fn stats_view(stats: Stats) -> StatsView {
    StatsView {
        total: stats.total,
        lifecycle: LifecycleCountsView {
            draft: stats.lifecycle.draft,
            approved: stats.lifecycle.approved,
            active: stats.lifecycle.active,
            expired: stats.lifecycle.expired,
            completed: stats.lifecycle.completed,
            cancelled: stats.lifecycle.cancelled,
        },
        payment: PaymentCountsView {
            unpaid: stats.payment.unpaid,
            partially_paid: stats.payment.partially_paid,
            fully_paid: stats.payment.fully_paid,
        },
        total_value_minor: stats.total_value.cents(),
        paid_minor: stats.paid_amount.cents(),
        remaining_minor: stats.remaining_amount.cents(),
        active_avg_value_minor: stats.active_avg_value.map(|avg| avg.cents()),
    }
}

/// Handle requests for registry-wide statistics
pub async fn get_stats(State(state): State<ServerState>) -> Json<StatsView> {
    let engine = state.engine.read().await;
    let stats = engine.statistics(Utc::now().date_naive());

    Json(stats_view(stats))
}
