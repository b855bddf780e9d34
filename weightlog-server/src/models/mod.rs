//! Domain models with validation at construction
//!
//! Form input is parsed into these types before it reaches storage.
//! Invalid input returns ValidationError, not panic.

pub mod chart;
pub mod record;
pub mod validation;

pub use chart::ChartSeries;
pub use record::{parse_date, parse_weight, DailyRecord, NewRecord, DATE_FORMAT};
pub use validation::ValidationError;
