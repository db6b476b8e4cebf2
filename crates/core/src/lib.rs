//! Core data model for the tracelens logging system
//!
//! This crate defines the shared vocabulary between the stack capture the
//! host runtime hands us and the demystification pipeline:
//! - Type and method descriptors, including generics, arrays, nullable
//!   wrappers, value tuples and nesting
//! - Raw and normalized stack frames
//! - Captured exception values with their causal children
//! - The load-time state-machine metadata index
//!
//! Everything here is plain immutable data; all behavior lives in the
//! `tracelens-demystify` and `tracelens-logging` crates.

pub mod metadata;
pub mod types;

pub use metadata::MetadataIndex;
pub use types::{
    CapturedException, MethodDescriptor, NormalizedFrame, Parameter, PassMode, RawFrame,
    TypeDescriptor,
};

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
