//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod project_repo;
pub mod shooting_day_repo;
pub mod shot_row_repo;

pub use project_repo::ProjectRepo;
pub use shooting_day_repo::ShootingDayRepo;
pub use shot_row_repo::ShotRowRepo;
