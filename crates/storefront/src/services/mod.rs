//! Outbound service clients for the storefront.
//!
//! # Services
//!
//! - `notify` - Fire-and-forget order notification dispatch
//! - `gemini` - Shop-image analysis via the Gemini API
//!
//! Both are one-way from the engine's point of view: order commitment never
//! waits on, retries, or observes either of them.

pub mod gemini;
pub mod notify;
