//! GeoGrow Calendar - Frost windows, growing profiles, and planting schedules
//!
//! Every component here is a stateless function over its inputs and the
//! immutable reference tables, so calls can run concurrently without locking.

pub mod calendar;
pub mod frost;
pub mod profile;
pub mod scheduler;

pub use calendar::MonthlyCalendarBuilder;
pub use frost::FrostDateCalculator;
pub use profile::GrowingProfileBuilder;
pub use scheduler::PlantingScheduler;
