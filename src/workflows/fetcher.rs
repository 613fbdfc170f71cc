use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::models::{SubtitleAsset, SubtitleMatch};
use crate::error::{Result, SubError};
use crate::infra::http::HttpClient;

// rw--w--w-, kept as the tool has always written subtitles
#[cfg(unix)]
const SUBTITLE_MODE: u32 = 0o622;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Written { path: PathBuf, bytes: usize },
    Skipped { path: PathBuf },
}

pub struct SubtitleFetcher<'a> {
    http: &'a HttpClient,
}

impl<'a> SubtitleFetcher<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Saves every asset of `subtitle` next to `video`. Stops at the first
    /// failure; files already written stay in place.
    pub fn persist(&self, subtitle: &SubtitleMatch, video: &Path) -> Result<Vec<AssetOutcome>> {
        let video = std::path::absolute(video).map_err(|source| SubError::FileAccess {
            path: video.to_path_buf(),
            source,
        })?;

        let mut outcomes = Vec::with_capacity(subtitle.files.len());
        for asset in &subtitle.files {
            let target = subtitle_path(&video, &asset.extension);
            if target.exists() {
                debug!(path = %target.display(), "subtitle already exists, skipping");
                outcomes.push(AssetOutcome::Skipped { path: target });
                continue;
            }

            let bytes = self.download(asset, &target)?;
            outcomes.push(AssetOutcome::Written {
                path: target,
                bytes,
            });
        }

        Ok(outcomes)
    }

    fn download(&self, asset: &SubtitleAsset, target: &Path) -> Result<usize> {
        let body = self
            .http
            .client()
            .get(&asset.link)
            .send()?
            .error_for_status()?
            .bytes()?;

        write_subtitle(target, &body).map_err(|source| SubError::WriteFailure {
            path: target.to_path_buf(),
            source,
        })?;
        Ok(body.len())
    }
}

/// `<dir>/<video name up to its last '.'>.<ext>`
pub fn subtitle_path(video: &Path, extension: &str) -> PathBuf {
    let directory = video.parent().unwrap_or(Path::new("."));
    let name = video
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name.as_str(),
    };
    directory.join(format!("{base}.{extension}"))
}

fn write_subtitle(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SUBTITLE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)
}
