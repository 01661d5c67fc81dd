pub mod metrics;
pub mod token;
pub mod validate;
