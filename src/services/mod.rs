pub mod marks;
pub mod results;

pub use marks::MarkService;
pub use results::ResultService;
