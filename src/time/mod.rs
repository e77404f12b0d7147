pub mod error;
pub mod timeunit;
