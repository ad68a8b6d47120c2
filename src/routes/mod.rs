pub mod marks;

pub mod results;

pub use marks::configure_marks_routes;
pub use results::configure_results_routes;
