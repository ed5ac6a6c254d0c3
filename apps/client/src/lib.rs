//! Client-side workflow core for the CV Customiser.
//!
//! Covers the full user journey the surfaces drive: credential verification
//! behind the session gate, then the analyze → generate → download workflow
//! against the remote CV service. Rendering, layout, and the host
//! environment's file picker and URL opener stay outside this crate, behind
//! the seams in [`store`] and [`workflow`].

pub mod auth;
pub mod errors;
pub mod models;
pub mod service_client;
pub mod session;
pub mod store;
pub mod workflow;

pub use errors::StepError;
pub use service_client::ServiceClient;
pub use session::{GateState, SessionGate};
pub use workflow::{DownloadOpener, Workflow};
