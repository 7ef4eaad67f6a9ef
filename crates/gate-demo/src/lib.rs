//! # gate-demo
//!
//! The orchestration layer of credit-gate-rs: load credentials, run the
//! endpoint as an ephemeral child process, publish it behind the Nevermined
//! paywall as the creator, then purchase credits and call it as the
//! consumer.
//!
//! The sequence is strictly linear (deployed -> published -> purchased ->
//! invoked); any failure propagates out of [`driver::run`] and ends the run.

pub mod driver;
pub mod ephemeral;
pub mod settings;

pub use driver::run;
pub use ephemeral::{EphemeralEndpoint, ENDPOINT_BIN_VAR};
pub use settings::DemoSettings;
