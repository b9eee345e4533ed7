pub mod error;
pub mod logger;
pub mod messages;
pub mod validation;
