mod stub_actions;

pub use stub_actions::{StubActionError, StubActions, StubRequest, StubResponse};
