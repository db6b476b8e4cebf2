//! Bridge from captured exceptions into the logging sinks
//!
//! The demystifier's output is consumed verbatim: the rendered trace is
//! emitted as one ERROR event carrying the logger name. This path runs
//! inside exception handling and therefore never fails, even when the
//! logging system was never initialized.

use tracing::error;

use tracelens_core::{CapturedException, MetadataIndex};
use tracelens_demystify::{render, RenderOptions};

use crate::Logger;

/// Render an exception and emit it under the given logger name
///
/// Infrastructure filtering follows the global configuration when a logger
/// is installed, and defaults to on otherwise. Returns the rendered text;
/// a missing exception yields an empty string and emits nothing.
pub fn log_exception(
    logger: &str,
    exception: Option<&CapturedException>,
    index: &MetadataIndex,
) -> String {
    let filter_infrastructure = Logger::global()
        .map(|l| l.config.filter_infrastructure)
        .unwrap_or(true);

    let rendered = render(
        exception,
        index,
        RenderOptions {
            filter_infrastructure,
        },
    );
    if !rendered.is_empty() {
        error!(logger = %logger, "{}", rendered.trim_end_matches('\n'));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelens_core::{MethodDescriptor, RawFrame, TypeDescriptor};

    #[test]
    fn test_missing_exception_is_silent() {
        let rendered = log_exception("app", None, &MetadataIndex::new());
        assert_eq!(rendered, "");
    }

    #[test]
    fn test_renders_without_initialized_logger() {
        let owner = TypeDescriptor::new("MyApp", "Worker");
        let exception = CapturedException::new("System.Exception")
            .with_message("boom")
            .with_frames(vec![RawFrame::new(MethodDescriptor::new(
                Some(owner),
                "Run",
            ))]);

        let rendered = log_exception("app", Some(&exception), &MetadataIndex::new());
        assert!(rendered.starts_with("System.Exception: boom\n"));
        assert!(rendered.contains("   at MyApp.Worker.Run()"));
    }
}
