//! In-memory edit sessions for shot plans.
//!
//! A shooting day gets a [`PlanSession`] on its first edit: the current
//! [`ShotPlan`] plus the ids of rows removed since the last save. Edits are
//! applied to the session and written back by the
//! [`plan_flush`](crate::background::plan_flush) task, which every mutation
//! notifies through an unbounded channel. Once a flush leaves a session
//! clean it is retired and dropped from the map; the next edit reloads the
//! plan from the database.
//!
//! Lock order is session then map. The only place the map lock is held
//! while taking a session lock is [`PlanSessions::lock`], on a mutex no
//! other task can see yet.

use std::collections::HashMap;
use std::sync::Arc;

use callsheet_core::error::CoreError;
use callsheet_core::shot_plan::{ShotPlan, ShotRow};
use callsheet_core::types::{DbId, RowId};
use callsheet_db::repositories::{ShootingDayRepo, ShotRowRepo};
use sqlx::PgPool;
use tokio::sync::{mpsc, Mutex, OwnedMutexGuard, RwLock};

use crate::error::{AppError, AppResult};

/// Receiving half of the "day edited" channel, consumed by the flush task.
pub type FlushReceiver = mpsc::UnboundedReceiver<DbId>;

/// The shot plan of one shooting day plus its unsaved removals.
#[derive(Debug, Default)]
pub struct PlanSession {
    plan: ShotPlan,
    pending_removals: Vec<RowId>,
    dirty: bool,
    /// Set when the session leaves the map. A retired session must not be
    /// edited; callers holding one reopen the day instead.
    retired: bool,
}

impl PlanSession {
    pub fn plan(&self) -> &ShotPlan {
        &self.plan
    }

    pub fn plan_mut(&mut self) -> &mut ShotPlan {
        &mut self.plan
    }

    /// Remove a row, remembering its id so the next save soft-deletes it.
    pub fn remove_row(&mut self, id: RowId) -> Result<ShotRow, CoreError> {
        let removed = self.plan.remove_row(id)?;
        self.pending_removals.push(removed.id);
        Ok(removed)
    }
}

type SharedSession = Arc<Mutex<PlanSession>>;

/// All open edit sessions, keyed by shooting day id.
///
/// Designed to be wrapped in `Arc` and shared across the application.
pub struct PlanSessions {
    sessions: RwLock<HashMap<DbId, SharedSession>>,
    flush_tx: mpsc::UnboundedSender<DbId>,
}

impl PlanSessions {
    /// Create an empty session store and the receiver for its edit
    /// notifications.
    pub fn new() -> (Self, FlushReceiver) {
        let (flush_tx, flush_rx) = mpsc::unbounded_channel();
        let sessions = Self {
            sessions: RwLock::new(HashMap::new()),
            flush_tx,
        };
        (sessions, flush_rx)
    }

    async fn get(&self, day_id: DbId) -> Option<SharedSession> {
        self.sessions.read().await.get(&day_id).cloned()
    }

    /// Number of sessions currently held in memory.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Load a day's plan from the database.
    ///
    /// Fails with `NotFound` if the shooting day does not exist.
    async fn load(pool: &PgPool, day_id: DbId) -> AppResult<ShotPlan> {
        ShootingDayRepo::find_by_id(pool, day_id)
            .await?
            .ok_or_else(|| AppError::not_found("ShootingDay", day_id))?;

        let rows = ShotRowRepo::list_by_day(pool, day_id)
            .await?
            .into_iter()
            .map(|record| record.into_row())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ShotPlan::from_rows(rows))
    }

    /// Lock the live session for `day_id`, opening it if needed.
    ///
    /// A new session is inserted already locked, so nobody can observe it
    /// before its plan is loaded, and an `evict` racing the load retires it
    /// instead of being undone by a late insert.
    async fn lock(&self, pool: &PgPool, day_id: DbId) -> AppResult<OwnedMutexGuard<PlanSession>> {
        loop {
            if let Some(session) = self.get(day_id).await {
                let guard = session.lock_owned().await;
                if !guard.retired {
                    return Ok(guard);
                }
                continue;
            }

            let mut sessions = self.sessions.write().await;
            if sessions.contains_key(&day_id) {
                continue;
            }
            let session: SharedSession = Arc::default();
            let mut guard = Arc::clone(&session).lock_owned().await;
            sessions.insert(day_id, Arc::clone(&session));
            drop(sessions);

            match Self::load(pool, day_id).await {
                Ok(plan) => {
                    guard.plan = plan;
                    tracing::debug!(shooting_day_id = day_id, "Shot plan session opened");
                    return Ok(guard);
                }
                Err(e) => {
                    guard.retired = true;
                    self.remove_entry(day_id, &session).await;
                    return Err(e);
                }
            }
        }
    }

    /// Drop `session` from the map if it is still the entry for `day_id`.
    async fn remove_entry(&self, day_id: DbId, session: &SharedSession) {
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(&day_id)
            .is_some_and(|current| Arc::ptr_eq(current, session))
        {
            sessions.remove(&day_id);
        }
    }

    /// Read the current rows of a day's plan.
    ///
    /// Served from the session when the day is being edited, otherwise
    /// straight from the database without opening a session.
    pub async fn rows(&self, pool: &PgPool, day_id: DbId) -> AppResult<Vec<ShotRow>> {
        if let Some(session) = self.get(day_id).await {
            let guard = session.lock().await;
            if !guard.retired {
                return Ok(guard.plan().rows().to_vec());
            }
        }
        Ok(Self::load(pool, day_id).await?.into_rows())
    }

    /// Apply `edit` to a day's session, mark it dirty, and schedule a flush.
    ///
    /// If `edit` fails the session is left as it was.
    pub async fn edit<T, F>(&self, pool: &PgPool, day_id: DbId, edit: F) -> AppResult<T>
    where
        F: FnOnce(&mut PlanSession) -> Result<T, CoreError>,
    {
        let mut guard = self.lock(pool, day_id).await?;
        let out = edit(&mut *guard)?;
        guard.dirty = true;
        drop(guard);

        self.notify(day_id);
        Ok(out)
    }

    fn notify(&self, day_id: DbId) {
        if self.flush_tx.send(day_id).is_err() {
            tracing::warn!(shooting_day_id = day_id, "Plan flush task is not running");
        }
    }

    /// Write a day's plan to the database if it has unsaved edits, then
    /// retire the now clean session.
    ///
    /// Returns `true` if anything was written. On error the session stays
    /// open and dirty. The session lock is held for the duration of the
    /// write, so edits wait rather than race the save.
    pub async fn flush(&self, pool: &PgPool, day_id: DbId) -> Result<bool, sqlx::Error> {
        let Some(session) = self.get(day_id).await else {
            return Ok(false);
        };
        let mut guard = session.lock().await;
        if guard.retired {
            return Ok(false);
        }

        let written = guard.dirty;
        if written {
            ShotRowRepo::save_plan(pool, day_id, guard.plan.rows(), &guard.pending_removals)
                .await?;
            guard.pending_removals.clear();
            guard.dirty = false;
        }

        guard.retired = true;
        self.remove_entry(day_id, &session).await;
        tracing::debug!(shooting_day_id = day_id, written, "Shot plan session closed");
        Ok(written)
    }

    /// Flush every open session. Failures are logged and skipped.
    ///
    /// Returns the number of sessions written.
    pub async fn flush_all(&self, pool: &PgPool) -> usize {
        let day_ids: Vec<DbId> = self.sessions.read().await.keys().copied().collect();
        let mut written = 0;
        for day_id in day_ids {
            match self.flush(pool, day_id).await {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(shooting_day_id = day_id, error = %e, "Shot plan flush failed");
                }
            }
        }
        written
    }

    /// Drop a day's session without saving, e.g. after the day is deleted.
    pub async fn evict(&self, day_id: DbId) {
        let removed = self.sessions.write().await.remove(&day_id);
        if let Some(session) = removed {
            session.lock().await.retired = true;
            tracing::debug!(shooting_day_id = day_id, "Shot plan session evicted");
        }
    }

    /// Whether a day has edits that are not yet in the database.
    pub async fn is_dirty(&self, day_id: DbId) -> bool {
        let Some(session) = self.get(day_id).await else {
            return false;
        };
        let dirty = session.lock().await.dirty;
        dirty
    }
}
