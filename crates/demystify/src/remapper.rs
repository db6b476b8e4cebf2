//! State-machine frame remapping
//!
//! Async continuations and iterator blocks execute inside compiler-generated
//! types whose entry point is conventionally named `MoveNext`. Remapping
//! resolves such a frame back to the user method the compiler transformed,
//! using the load-time metadata index.

use tracelens_core::{MetadataIndex, MethodDescriptor};

/// Conventional entry point of async and iterator state machines
pub const STATE_MACHINE_ENTRY: &str = "MoveNext";

/// Resolve a state-machine entry frame to its original user method
///
/// Applies only when the method is `MoveNext` on a compiler-generated type
/// that has an enclosing type. Returns `None` on any miss; callers fall back
/// to the original descriptor unchanged.
pub fn remap(method: &MethodDescriptor, index: &MetadataIndex) -> Option<MethodDescriptor> {
    if method.name != STATE_MACHINE_ENTRY {
        return None;
    }
    let declaring = method.declaring_type.as_ref()?;
    if !declaring.compiler_generated {
        return None;
    }
    // A state machine always nests inside the type that declared the
    // transformed method; a generated type with no owner cannot remap.
    declaring.declaring_type.as_ref()?;

    index.resolve_state_machine(declaring).cloned()
}
