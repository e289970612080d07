//! Shot row data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::ClockTime;
use crate::error::CoreError;
use crate::types::RowId;

// ---------------------------------------------------------------------------
// Scene attribute enums
// ---------------------------------------------------------------------------

/// Time of day the scene is set in (not when it is shot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneTime {
    Morning,
    Day,
    Evening,
    Night,
}

impl SceneTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Day => "day",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for SceneTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "day" => Ok(Self::Day),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            other => Err(CoreError::Validation(format!(
                "unknown scene_time '{other}'"
            ))),
        }
    }
}

/// Interior or exterior set-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Interior,
    Exterior,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Exterior => "exterior",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interior" => Ok(Self::Interior),
            "exterior" => Ok(Self::Exterior),
            other => Err(CoreError::Validation(format!(
                "unknown location_type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ShotRow
// ---------------------------------------------------------------------------

/// One planned camera set-up (a cut) within a shooting day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRow {
    pub id: RowId,
    /// 1-based position within the day; always equals index + 1.
    pub sequence: i32,
    pub scene_number: Option<String>,
    pub cut_number: Option<String>,
    pub scene_time: Option<SceneTime>,
    pub location_type: Option<LocationType>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub location: Option<String>,
    pub content: String,
    pub cast_ids: Vec<String>,
    pub notes: Option<String>,
}

impl ShotRow {
    /// An empty row, as created by "add row".
    pub fn empty(id: RowId, sequence: i32) -> Self {
        Self {
            id,
            sequence,
            scene_number: None,
            cut_number: None,
            scene_time: None,
            location_type: None,
            start_time: None,
            end_time: None,
            location: None,
            content: String::new(),
            cast_ids: Vec::new(),
            notes: None,
        }
    }

    /// The scene number if it is set and not blank.
    pub fn scene_key(&self) -> Option<&str> {
        self.scene_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Append a cast id unless it is already present.
    ///
    /// Returns `true` if the id was added.
    pub fn add_cast(&mut self, cast: &str) -> bool {
        let cast = cast.trim();
        if cast.is_empty() || self.cast_ids.iter().any(|c| c == cast) {
            return false;
        }
        self.cast_ids.push(cast.to_string());
        true
    }

    /// Apply an inline field edit. Fields absent from the patch are kept.
    pub fn apply_patch(&mut self, patch: &ShotRowPatch) {
        if let Some(v) = &patch.scene_number {
            self.scene_number = non_blank(v);
        }
        if let Some(v) = &patch.cut_number {
            self.cut_number = non_blank(v);
        }
        if let Some(v) = patch.scene_time {
            self.scene_time = v;
        }
        if let Some(v) = patch.location_type {
            self.location_type = v;
        }
        if let Some(v) = patch.start_time {
            self.start_time = v;
        }
        if let Some(v) = patch.end_time {
            self.end_time = v;
        }
        if let Some(v) = &patch.location {
            self.location = non_blank(v);
        }
        if let Some(v) = &patch.content {
            self.content = v.clone();
        }
        if let Some(cast) = &patch.cast_ids {
            self.cast_ids.clear();
            for c in cast {
                self.add_cast(c);
            }
        }
        if let Some(v) = &patch.notes {
            self.notes = v.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// ShotRowPatch
// ---------------------------------------------------------------------------

/// Inline edit of a single row.
///
/// Nullable fields use a double `Option`: an absent key leaves the field
/// untouched, an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShotRowPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub scene_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub cut_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub scene_time: Option<Option<SceneTime>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location_type: Option<Option<LocationType>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_time: Option<Option<ClockTime>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_time: Option<Option<ClockTime>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    pub content: Option<String>,
    pub cast_ids: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// Blank text clears a field.
fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.trim().is_empty())
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
