mod health;
mod stub;

pub use health::{HEALTHY, health_handler};
pub use stub::{ErrorResponse, StubError, stub_action_handler};
