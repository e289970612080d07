//! Shooting-day time allocation.
//!
//! Walks the rows once, left to right, keeping a running clock (`cursor`,
//! minutes since midnight) and assigning each cut a start and end time. A
//! meal break, when configured, is inserted exactly once: either when the
//! cursor has already reached the meal start, or when the next cut would run
//! through it. A cut is never split around the meal; it is pushed to start
//! after the meal instead.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::CoreError;
use crate::shot_plan::row::ShotRow;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How the per-cut duration is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationMode {
    /// Every cut takes a fixed number of minutes.
    PerCut { minutes_per_cut: u32 },
    /// Cuts share the window between the day start and `end_time`.
    ByRange { end_time: ClockTime },
}

/// A meal break inserted once into the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealBreak {
    pub start: ClockTime,
    pub minutes: u32,
}

/// Validated allocator configuration. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    pub mode: AllocationMode,
    pub start_time: ClockTime,
    /// Gap between consecutive cuts (N - 1 gaps for N cuts).
    pub break_minutes: u32,
    pub meal: Option<MealBreak>,
}

/// Wire name of the allocation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationModeKind {
    PerCut,
    ByRange,
}

/// Flat request form of [`AllocatorConfig`], as submitted by the editor.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocateRequest {
    pub mode: AllocationModeKind,
    pub start_time: String,
    pub end_time: Option<String>,
    pub minutes_per_cut: Option<u32>,
    #[serde(default)]
    pub break_minutes: u32,
    #[serde(default)]
    pub include_meal: bool,
    pub meal_start: Option<String>,
    pub meal_minutes: Option<u32>,
}

impl AllocateRequest {
    /// Validate the request and build an [`AllocatorConfig`].
    ///
    /// Rejects rather than clamps: unparseable times, a zero per-cut
    /// duration, a range whose end is not after its start, and a meal
    /// without a start or with a zero duration.
    pub fn into_config(self) -> Result<AllocatorConfig, CoreError> {
        let start_time: ClockTime = self.start_time.parse()?;

        let mode = match self.mode {
            AllocationModeKind::PerCut => {
                let minutes_per_cut = self.minutes_per_cut.unwrap_or(0);
                if minutes_per_cut == 0 {
                    return Err(CoreError::Validation(
                        "minutes_per_cut must be >= 1 in per_cut mode".to_string(),
                    ));
                }
                AllocationMode::PerCut { minutes_per_cut }
            }
            AllocationModeKind::ByRange => {
                let end_time: ClockTime = self
                    .end_time
                    .as_deref()
                    .ok_or_else(|| {
                        CoreError::Validation("end_time is required in by_range mode".to_string())
                    })?
                    .parse()?;
                if end_time <= start_time {
                    return Err(CoreError::Validation(format!(
                        "end_time {end_time} must be after start_time {start_time}"
                    )));
                }
                AllocationMode::ByRange { end_time }
            }
        };

        let meal = if self.include_meal {
            let start: ClockTime = self
                .meal_start
                .as_deref()
                .ok_or_else(|| {
                    CoreError::Validation("meal_start is required when include_meal".to_string())
                })?
                .parse()?;
            let minutes = self.meal_minutes.unwrap_or(0);
            if minutes == 0 {
                return Err(CoreError::Validation(
                    "meal_minutes must be >= 1 when include_meal".to_string(),
                ));
            }
            Some(MealBreak { start, minutes })
        } else {
            None
        };

        Ok(AllocatorConfig {
            mode,
            start_time,
            break_minutes: self.break_minutes,
            meal,
        })
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// What a run of the allocator decided, alongside the rows it timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationSummary {
    /// Minutes assigned to every cut.
    pub minutes_per_cut: i64,
    pub meal_inserted: bool,
    /// End time of the last cut, `None` for an empty plan.
    pub wrap_up: Option<ClockTime>,
}

/// Per-cut duration for `n` cuts under `cfg`.
///
/// In range mode this is computed once for the whole day; the remainder of
/// the floor division is left as slack at the end of the day.
pub fn cut_duration(cfg: &AllocatorConfig, n: usize) -> i64 {
    match cfg.mode {
        AllocationMode::PerCut { minutes_per_cut } => i64::from(minutes_per_cut),
        AllocationMode::ByRange { end_time } => {
            if n == 0 {
                return 1;
            }
            let n = n as i64;
            let meal = cfg.meal.map_or(0, |m| i64::from(m.minutes));
            let available = (end_time.minutes() - cfg.start_time.minutes())
                - meal
                - i64::from(cfg.break_minutes) * (n - 1);
            available.div_euclid(n).max(1)
        }
    }
}

/// Assign start and end times to every row, in order.
///
/// Only `start_time` and `end_time` change. An empty plan is returned as is.
pub fn allocate(rows: &[ShotRow], cfg: &AllocatorConfig) -> Vec<ShotRow> {
    allocate_with_summary(rows, cfg).0
}

/// [`allocate`], also reporting the duration used and whether the meal fit.
pub fn allocate_with_summary(
    rows: &[ShotRow],
    cfg: &AllocatorConfig,
) -> (Vec<ShotRow>, AllocationSummary) {
    let n = rows.len();
    let day_start = cfg.start_time.minutes();
    let duration = cut_duration(cfg, n);
    let break_minutes = i64::from(cfg.break_minutes);

    let mut cursor = day_start;
    let mut meal_inserted = false;
    let mut wrap_up = None;
    let mut out = Vec::with_capacity(n);

    for (i, row) in rows.iter().enumerate() {
        if let (Some(meal), false) = (cfg.meal, meal_inserted) {
            let meal_start = meal.start.minutes();
            let reached = cursor >= meal_start && meal_start > day_start;
            let straddles = cursor < meal_start && cursor + duration > meal_start;
            if reached || straddles {
                cursor = meal_start + i64::from(meal.minutes);
                meal_inserted = true;
            }
        }

        let end = cursor + duration;
        let mut timed = row.clone();
        timed.start_time = Some(ClockTime::wrapping(cursor));
        timed.end_time = Some(ClockTime::wrapping(end));
        wrap_up = timed.end_time;
        out.push(timed);

        cursor = end;
        if i + 1 < n {
            cursor += break_minutes;
        }
    }

    let summary = AllocationSummary {
        minutes_per_cut: duration,
        meal_inserted,
        wrap_up,
    };
    (out, summary)
}
