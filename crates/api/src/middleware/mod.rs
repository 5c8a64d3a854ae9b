/// Standardized error responses for the API
pub mod error_handling;
