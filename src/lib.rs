//! Watch-party client library.
//!
//! This library implements the client half of a synchronized video-watching
//! application: session bootstrap over HTTP, a real-time event channel,
//! playback synchronization across viewers, and room chat. The room state
//! machine itself is authoritative on the backend service; this crate only
//! consumes it.

// layers
pub mod client;
pub mod domain;
pub mod infrastructure;

// shared library
pub mod common;
