//! Shared test fixtures for the kernel workspace (§10.4): fixture server
//! configs for the fourteen domain workers and a scripted fake transport,
//! so unit and end-to-end-scenario tests can drive the executor and
//! facade without a real worker process. Not published; dev-dependency
//! only.

mod fixtures;
mod transport;

pub use fixtures::server_configs;
pub use transport::{ScriptStep, ScriptedTransport, ScriptedTransportBuilder};
