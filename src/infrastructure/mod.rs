pub mod observability;
pub mod stub;
