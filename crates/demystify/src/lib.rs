//! Stack-trace demystification for the tracelens logging system
//!
//! This crate converts a raw, captured exception and call-stack snapshot
//! into a stable, human-readable rendering that undoes compiler-inserted
//! transformations:
//! - Async-continuation and iterator state-machine frames map back to the
//!   user method the compiler transformed
//! - Closure and local-function names lose their mangled form
//! - Runtime/concurrency/reflection plumbing frames are hidden by default
//! - Generics, nullable wrappers, value tuples, arrays and nested types
//!   render the way the developer wrote them
//!
//! The pipeline is synchronous and pure: every operation reads only its
//! arguments and fixed tables computed at process start, and it never
//! fails. It runs inside exception-handling paths where a secondary
//! failure would mask the original error.

pub mod classifier;
pub mod formatter;
pub mod normalizer;
pub mod remapper;
pub mod renderer;

pub use classifier::is_infrastructure;
pub use formatter::{format_method, format_type, pretty_name};
pub use normalizer::{normalize, normalize_stack};
pub use remapper::{remap, STATE_MACHINE_ENTRY};
pub use renderer::{render, RenderOptions, MAX_CHAIN_DEPTH};

use tracelens_core::{CapturedException, MetadataIndex};

/// Render an exception with default options (infrastructure filtering on)
pub fn demystify(exception: &CapturedException, index: &MetadataIndex) -> String {
    render(Some(exception), index, RenderOptions::default())
}

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
