pub mod chart_service;
pub mod optimizer_service;
pub mod range_service;
pub mod session_service;
