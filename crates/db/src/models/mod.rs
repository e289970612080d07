//! Row models and DTOs, one module per table.

pub mod project;
pub mod shooting_day;
pub mod shot_row;
