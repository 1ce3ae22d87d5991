//! Provider orchestration.
//!
//! Wires the individual providers into ordered fallback chains and
//! validates what they return before anything downstream sees it.

mod registry;
mod validator;

pub use registry::ProviderRegistry;
