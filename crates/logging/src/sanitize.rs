//! Log-path sanitization and permission preflight
//!
//! Sink file names come from configuration and may contain separators or
//! characters the filesystem rejects; they are reduced to a safe base name
//! before any appender is built. The preflight probes the log directory for
//! writability so misconfiguration surfaces as a typed error at startup
//! instead of a lost log line later.

use std::path::Path;

use crate::error::{LoggingError, LoggingResult};

/// Characters never allowed in a sink file name
const RESERVED: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Fallback file name when sanitization leaves nothing usable
const DEFAULT_FILE_NAME: &str = "tracelens.log";

/// Reduce a configured sink file name to a safe base name
///
/// Path separators are stripped down to the final component, reserved and
/// control characters are replaced, and leading/trailing dots and spaces
/// are trimmed.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == ' ');
    if trimmed.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Verify the log directory exists and is writable
///
/// Creates the directory if missing, then probes it with a throwaway file.
pub fn preflight(dir: &Path) -> LoggingResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|err| LoggingError::DirectoryNotWritable(format!("{}: {err}", dir.display())))?;

    let probe = dir.join(".tracelens-write-probe");
    match std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            Ok(())
        }
        Err(err) => Err(LoggingError::DirectoryNotWritable(format!(
            "{}: {err}",
            dir.display()
        ))),
    }
}
