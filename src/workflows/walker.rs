use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SubError};

const VIDEO_EXTENSIONS: &[&str] = &["avi", "mp4", "mkv", "mov", "mpeg", "wmv", "flv"];

/// Per-file work driven by the walker.
pub trait FileHandler {
    fn handle(&mut self, file_path: &Path) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub visited: usize,
    pub failed: usize,
}

/// Runs `handler` on every video file below `root`, one at a time, in path
/// order. Symlinked directories are not entered. A failing file or an
/// unreadable subdirectory is logged and the walk moves on.
pub fn walk(root: &Path, handler: &mut dyn FileHandler) -> Result<WalkSummary> {
    if !root.is_dir() {
        return Err(SubError::NotADirectory(root.to_path_buf()));
    }
    info!(root = %root.display(), "scanning for videos");

    let mut summary = WalkSummary::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                summary.failed += 1;
                continue;
            }
        };

        if entry.file_type().is_dir() || !is_video_file(entry.path()) {
            continue;
        }

        summary.visited += 1;
        if let Err(e) = handler.handle(entry.path()) {
            warn!(file = %entry.path().display(), "{e}");
            summary.failed += 1;
        }
    }

    Ok(summary)
}

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
