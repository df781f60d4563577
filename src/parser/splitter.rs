//! Channel splitting for multi-channel SMC files.
//!
//! Every channel block ends with the `/&` marker. Splitting on the marker
//! leaves the rest of the marker line at the top of the next block, which
//! is dropped, and an empty tail after the final marker, which is
//! discarded.

use crate::constants::CHANNEL_DELIMITER;
use crate::error::{Result, SmcError};
use std::path::Path;
use tracing::{debug, warn};

/// Split file contents into per-channel line lists
pub fn split_channels<'a>(contents: &'a str, path: &Path) -> Result<Vec<Vec<&'a str>>> {
    let mut fragments: Vec<&str> = contents.split(CHANNEL_DELIMITER).collect();

    // Whatever follows the final delimiter is not a channel
    if let Some(tail) = fragments.pop() {
        if !tail.trim().is_empty() {
            warn!(
                "Discarding {} bytes after the last channel delimiter in {}",
                tail.len(),
                path.display()
            );
        }
    }

    if fragments.is_empty() {
        return Err(SmcError::EmptyOrTruncatedFile {
            path: path.to_path_buf(),
        });
    }

    let channels: Vec<Vec<&str>> = fragments
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| {
            let lines = fragment.lines();
            if index == 0 {
                lines.collect()
            } else {
                lines.skip(1).collect()
            }
        })
        .collect();

    debug!("Split {} into {} channel(s)", path.display(), channels.len());
    Ok(channels)
}
