/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the study domain and reaches external tools
/// and the dataset only through ports.
pub mod dto;
pub mod use_cases;
