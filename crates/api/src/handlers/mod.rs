pub mod project;
pub mod shooting_day;
pub mod shot_plan;
