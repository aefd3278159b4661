//! Per-timer countdown task

use std::{sync::Weak, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::state::{registry::{Shared, Tick}, TimerId};

/// Cadence of a running timer
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drive one timer down a second at a time until it finishes, its schedule is
/// replaced, or the registry goes away.
pub(crate) async fn countdown_task(
    registry: Weak<Shared>,
    id: TimerId,
    generation: u64,
    first_tick: Instant,
) {
    let mut interval = interval_at(first_tick, TICK_PERIOD);

    loop {
        interval.tick().await;

        let Some(shared) = registry.upgrade() else {
            debug!("Registry dropped, stopping countdown for timer {}", id);
            break;
        };

        if shared.tick(id, generation) == Tick::Finished {
            break;
        }
    }
}
