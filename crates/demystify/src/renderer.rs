//! Exception tree rendering
//!
//! Walks an exception and its causal chain, emitting one header line per
//! exception plus its filtered, formatted frames. The renderer runs inside
//! exception-handling paths, so it must never fail: every input renders to
//! some string, and a missing exception renders to the empty string.

use tracelens_core::{CapturedException, MetadataIndex};

use crate::classifier::is_infrastructure;
use crate::formatter::format_method;
use crate::normalizer::normalize_stack;

/// Maximum inner/aggregate recursion depth rendered before truncation
///
/// Normal language construction cannot build chains anywhere near this
/// deep; the cap only guards against adversarially constructed graphs.
pub const MAX_CHAIN_DEPTH: usize = 16;

const INNER_HEADER_PREFIX: &str = " ---> ";
const FRAME_PREFIX: &str = "   at ";
const CHAIN_FOOTER: &str = "   --- end of inner exception stack ---";

/// Rendering options
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Whether infrastructure frames are dropped from the output
    pub filter_infrastructure: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            filter_infrastructure: true,
        }
    }
}

/// Render an exception and its causal chain as a newline-delimited string
///
/// Headers carry the exception type and message; frame lines carry the
/// demystified signature plus the source file and line when both are known.
/// Children recurse in original order, each followed by a fixed boundary
/// footer. Returns an empty string when no exception is supplied.
pub fn render(
    exception: Option<&CapturedException>,
    index: &MetadataIndex,
    options: RenderOptions,
) -> String {
    let Some(root) = exception else {
        return String::new();
    };
    let mut out = String::new();
    render_node(root, index, options, 0, &mut out);
    out
}

fn render_node(
    node: &CapturedException,
    index: &MetadataIndex,
    options: RenderOptions,
    depth: usize,
    out: &mut String,
) {
    if depth > 0 {
        out.push_str(INNER_HEADER_PREFIX);
    }
    out.push_str(&node.type_name);
    if let Some(message) = &node.message {
        if !message.is_empty() {
            out.push_str(": ");
            out.push_str(message);
        }
    }
    out.push('\n');

    for frame in normalize_stack(&node.frames, index) {
        if options.filter_infrastructure && is_infrastructure(&frame) {
            continue;
        }
        out.push_str(FRAME_PREFIX);
        out.push_str(&format_method(&frame.method));
        if frame.line > 0 {
            if let Some(file) = &frame.file {
                out.push_str(" in ");
                out.push_str(file_base_name(file));
                out.push_str(":line ");
                out.push_str(&frame.line.to_string());
            }
        }
        out.push('\n');
    }

    for child in &node.children {
        if depth + 1 > MAX_CHAIN_DEPTH {
            break;
        }
        render_node(child, index, options, depth + 1, out);
        out.push_str(CHAIN_FOOTER);
        out.push('\n');
    }
}

fn file_base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
