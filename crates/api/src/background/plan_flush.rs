//! Debounced persistence of edited shot plans.
//!
//! Every edit to a session sends its shooting day id down the flush channel.
//! This task keeps one deadline per day, pushed back to `now + quiet_period`
//! on each notification, and writes the day's plan once its deadline passes
//! without further edits. A failed write leaves the session dirty and is
//! retried after `retry_delay`. On cancellation every open session is
//! written before the task returns.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use callsheet_core::types::DbId;
use sqlx::PgPool;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::session::{FlushReceiver, PlanSessions};

/// Run the flush loop until `cancel` fires or every sender is dropped.
pub async fn run(
    pool: PgPool,
    sessions: Arc<PlanSessions>,
    mut edits: FlushReceiver,
    quiet_period: Duration,
    retry_delay: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        quiet_period_ms = quiet_period.as_millis() as u64,
        retry_delay_ms = retry_delay.as_millis() as u64,
        "Shot plan flush task started"
    );

    let mut deadlines: HashMap<DbId, Instant> = HashMap::new();

    loop {
        let next_deadline = deadlines.values().min().copied();

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Shot plan flush task stopping");
                break;
            }
            edit = edits.recv() => match edit {
                Some(day_id) => {
                    deadlines.insert(day_id, Instant::now() + quiet_period);
                }
                None => {
                    tracing::info!("Flush channel closed");
                    break;
                }
            },
            _ = sleep_until(next_deadline) => {
                let now = Instant::now();
                let due: Vec<DbId> = deadlines
                    .iter()
                    .filter(|(_, deadline)| **deadline <= now)
                    .map(|(day_id, _)| *day_id)
                    .collect();

                for day_id in due {
                    deadlines.remove(&day_id);
                    match sessions.flush(&pool, day_id).await {
                        Ok(true) => {
                            tracing::debug!(shooting_day_id = day_id, "Shot plan flushed");
                        }
                        Ok(false) => {}
                        Err(e) => {
                            tracing::error!(
                                shooting_day_id = day_id,
                                error = %e,
                                retry_in_ms = retry_delay.as_millis() as u64,
                                "Shot plan flush failed",
                            );
                            deadlines.insert(day_id, Instant::now() + retry_delay);
                        }
                    }
                }
            }
        }
    }

    let written = sessions.flush_all(&pool).await;
    tracing::info!(written, "Shot plan flush task drained");
}

/// Sleep until `deadline`, or forever if there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
