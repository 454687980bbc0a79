//! Value Objects - Immutable, identity-less domain primitives

mod date_range;
mod observation_date;
mod station_id;

pub use date_range::DateRange;
pub use observation_date::{DATE_FORMAT, ObservationDate, TRAILING_WINDOW_DAYS};
pub use station_id::StationId;
