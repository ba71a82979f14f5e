//! Pending-work badge poller.
//!
//! A background task refreshes the pending order, refund, and return counts
//! on a fixed period (30 seconds by default). Handlers read the last-known
//! counts from atomics; a failed refresh keeps the previous values rather
//! than zeroing the badges.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use pawcart_client::PendingCounts;

/// Last-known pending-work counts, shared between the poller and handlers.
#[derive(Debug, Default)]
pub struct BadgeCounters {
    orders: AtomicU64,
    refunds: AtomicU64,
    returns: AtomicU64,
}

impl BadgeCounters {
    /// Read the current counts.
    #[must_use]
    pub fn snapshot(&self) -> PendingCounts {
        PendingCounts {
            orders: self.orders.load(Ordering::Relaxed),
            refunds: self.refunds.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
        }
    }

    /// Replace the stored counts.
    pub fn store(&self, counts: PendingCounts) {
        self.orders.store(counts.orders, Ordering::Relaxed);
        self.refunds.store(counts.refunds, Ordering::Relaxed);
        self.returns.store(counts.returns, Ordering::Relaxed);
    }
}

/// Spawn the badge refresh task.
///
/// The first refresh runs immediately so the badges are populated on the
/// first page load rather than after one full period.
pub fn spawn_badge_poller(state: crate::state::AppState, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // A stalled backend should not cause a burst of catch-up probes
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            match state.api().admin_pending_counts().await {
                Ok(counts) => {
                    debug!(
                        orders = counts.orders,
                        refunds = counts.refunds,
                        returns = counts.returns,
                        "Badge counts refreshed"
                    );
                    state.badges().store(counts);
                }
                Err(e) => {
                    warn!("Badge count refresh failed, keeping previous counts: {e}");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip() {
        let counters = BadgeCounters::default();
        assert_eq!(counters.snapshot(), PendingCounts::default());

        counters.store(PendingCounts {
            orders: 3,
            refunds: 1,
            returns: 2,
        });
        let snap = counters.snapshot();
        assert_eq!(snap.orders, 3);
        assert_eq!(snap.refunds, 1);
        assert_eq!(snap.returns, 2);
    }
}
