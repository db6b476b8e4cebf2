//! Frame normalization
//!
//! Builds one immutable [`NormalizedFrame`] per resolvable raw frame,
//! applying best-effort state-machine remapping and carrying the source
//! location through unchanged.

use tracing::trace;

use tracelens_core::{MetadataIndex, NormalizedFrame, RawFrame};

use crate::formatter::pretty_name;
use crate::remapper::remap;

/// Normalize one raw frame
///
/// Returns `None` only for frames without a method descriptor, which stack
/// captures may legitimately contain; those are dropped, not errors.
/// Remapping is best-effort and falls back to the original descriptor on
/// any lookup miss, so normalization always succeeds for a resolvable frame.
pub fn normalize(raw: &RawFrame, index: &MetadataIndex) -> Option<NormalizedFrame> {
    let Some(method) = &raw.method else {
        trace!("dropping unresolvable frame at line {}", raw.line);
        return None;
    };

    let mut method = remap(method, index).unwrap_or_else(|| method.clone());
    // Mangled names are an intermediate form only; they never survive
    // normalization.
    method.name = pretty_name(&method.name);

    Some(NormalizedFrame {
        method,
        file: raw.file.clone(),
        line: raw.line,
        column: raw.column,
    })
}

/// Normalize a whole capture, preserving order and dropping unresolvable frames
pub fn normalize_stack(frames: &[RawFrame], index: &MetadataIndex) -> Vec<NormalizedFrame> {
    frames
        .iter()
        .filter_map(|frame| normalize(frame, index))
        .collect()
}
