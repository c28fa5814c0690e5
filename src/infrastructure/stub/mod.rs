mod echo_stub_actions;

pub use echo_stub_actions::EchoStubActions;
