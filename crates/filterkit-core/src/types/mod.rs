mod date;
mod float64;
mod timestamp;

pub use date::Date;
pub use float64::Float64;
pub use timestamp::Timestamp;
pub use ulid::Ulid;
