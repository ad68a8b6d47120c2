pub mod period;
pub mod response;

pub use period::{AcademicPeriod, Trimester};
pub use response::ApiResponse;
