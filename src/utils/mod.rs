pub mod error_response;
pub mod extractor;
pub mod parameter_error_handler;
pub mod validate;

pub use error_response::error_response;
pub use extractor::{SafeClassName, SafeIDI64, SafeStudentIdI64};
pub use parameter_error_handler::{json_error_handler, query_error_handler};
