//! Infrastructure-frame classification
//!
//! Decides whether a normalized frame belongs to runtime/concurrency/
//! reflection plumbing and should be hidden from default output. The
//! classification tables are fixed at process start; there is no runtime
//! reconfiguration.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use tracelens_core::NormalizedFrame;

/// Namespace prefixes whose frames are runtime plumbing
static DENIED_NAMESPACE_PREFIXES: &[&str] = &[
    "System.Runtime.CompilerServices",
    "System.Runtime.ExceptionServices",
    "System.Reflection",
    "Microsoft.CSharp.RuntimeBinder",
];

/// Known scheduler and thread-pool types outside the denied namespaces
static SCHEDULER_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "System.Threading.Tasks.Task",
        "System.Threading.Tasks.Task`1",
        "System.Threading.Tasks.AwaitTaskContinuation",
        "System.Threading.ExecutionContext",
        "System.Threading.ThreadPoolWorkQueue",
        "System.Threading.ThreadHelper",
    ])
});

/// Whether the frame belongs to compiler/runtime plumbing
///
/// A frame with no declaring type (e.g. a native frame) is never
/// infrastructure: unknown is treated as "keep" so information is not
/// silently lost. Compiler-generated members and types are hidden even
/// when un-remapped, since they carry no information once the state-machine
/// entry frame has been remapped.
pub fn is_infrastructure(frame: &NormalizedFrame) -> bool {
    let Some(declaring) = &frame.method.declaring_type else {
        return false;
    };

    if frame.method.compiler_generated || declaring.compiler_generated {
        return true;
    }

    let namespace = declaring.root_namespace();
    if DENIED_NAMESPACE_PREFIXES
        .iter()
        .any(|prefix| namespace.starts_with(prefix))
    {
        return true;
    }

    SCHEDULER_TYPES.contains(declaring.full_name().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelens_core::{MethodDescriptor, TypeDescriptor};

    fn frame_for(method: MethodDescriptor) -> NormalizedFrame {
        NormalizedFrame {
            method,
            file: None,
            line: 0,
            column: 0,
        }
    }

    #[test]
    fn test_user_frame_is_kept() {
        let owner = TypeDescriptor::new("MyApp.Services", "OrderService");
        let frame = frame_for(MethodDescriptor::new(Some(owner), "PlaceOrder"));
        assert!(!is_infrastructure(&frame));
    }

    #[test]
    fn test_denied_namespace_is_hidden() {
        let owner = TypeDescriptor::new("System.Runtime.CompilerServices", "TaskAwaiter");
        let frame = frame_for(MethodDescriptor::new(Some(owner), "GetResult"));
        assert!(is_infrastructure(&frame));
    }

    #[test]
    fn test_denied_namespace_applies_to_nested_types() {
        let owner = TypeDescriptor::new("System.Reflection", "RuntimeMethodInfo");
        let nested = TypeDescriptor::nested(owner, "InvocationHelper");
        let frame = frame_for(MethodDescriptor::new(Some(nested), "Invoke"));
        assert!(is_infrastructure(&frame));
    }

    #[test]
    fn test_generated_type_is_hidden() {
        let owner = TypeDescriptor::new("MyApp", "Worker");
        let generated = TypeDescriptor::nested(owner, "<Bar>d__3").generated();
        let frame = frame_for(MethodDescriptor::new(Some(generated), "SetStateMachine"));
        assert!(is_infrastructure(&frame));
    }

    #[test]
    fn test_generated_member_is_hidden() {
        let owner = TypeDescriptor::new("MyApp", "Worker");
        let frame = frame_for(MethodDescriptor::new(Some(owner), "<Bar>b__4_0").generated());
        assert!(is_infrastructure(&frame));
    }

    #[test]
    fn test_scheduler_type_is_hidden() {
        let owner = TypeDescriptor::new("System.Threading", "ExecutionContext");
        let frame = frame_for(MethodDescriptor::new(Some(owner), "RunInternal"));
        assert!(is_infrastructure(&frame));
    }

    #[test]
    fn test_frame_without_declaring_type_is_kept() {
        let frame = frame_for(MethodDescriptor::new(None, "NativeEntry"));
        assert!(!is_infrastructure(&frame));
    }

    #[test]
    fn test_threading_user_lookalike_is_kept() {
        // Only the fixed scheduler set is denied under System.Threading.
        let owner = TypeDescriptor::new("System.Threading", "Timer");
        let frame = frame_for(MethodDescriptor::new(Some(owner), "Change"));
        assert!(!is_infrastructure(&frame));
    }
}
