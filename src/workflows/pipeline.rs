use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, SubError};
use crate::infra::shooter::{Language, ShooterClient};
use crate::workflows::fetcher::{AssetOutcome, SubtitleFetcher};
use crate::workflows::walker::FileHandler;

/// Looks up one video and saves every match's subtitles beside it.
pub struct SubtitleDownloader<'a> {
    shooter: ShooterClient<'a>,
    fetcher: SubtitleFetcher<'a>,
    language: Language,
}

impl<'a> SubtitleDownloader<'a> {
    pub fn new(shooter: ShooterClient<'a>, fetcher: SubtitleFetcher<'a>, language: Language) -> Self {
        Self {
            shooter,
            fetcher,
            language,
        }
    }
}

impl FileHandler for SubtitleDownloader<'_> {
    fn handle(&mut self, file_path: &Path) -> Result<()> {
        info!(file = %file_path.display(), "looking up subtitles");

        let matches = match self.shooter.lookup_file(file_path, self.language) {
            Ok(matches) => matches,
            Err(SubError::UnsupportedFile { size, .. }) => {
                debug!(file = %file_path.display(), size, "too small to fingerprint, skipping");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        debug!(file = %file_path.display(), count = matches.len(), "lookup finished");

        for subtitle in &matches {
            match self.fetcher.persist(subtitle, file_path) {
                Ok(outcomes) => {
                    debug!(
                        description = %subtitle.description,
                        delay = subtitle.delay,
                        "match processed"
                    );
                    for outcome in &outcomes {
                        match outcome {
                            AssetOutcome::Written { path, bytes } => {
                                info!(path = %path.display(), bytes, "saved subtitle")
                            }
                            AssetOutcome::Skipped { path } => {
                                debug!(path = %path.display(), "kept existing subtitle")
                            }
                        }
                    }
                }
                Err(e) => warn!(file = %file_path.display(), "download failed: {e}"),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::http::HttpClient;
    use mockito::Server;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_video_gets_every_match_downloaded() {
        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("Film.2019.720p.mkv");
        fs::write(&video, vec![3u8; 20_000]).unwrap();

        let mut server = Server::new();
        let url = server.url();
        let lookup_body = format!(
            r#"[{{"Desc":"first","Delay":0,"Files":[{{"Ext":"srt","Link":"{url}/s/1.srt"}}]}},
               {{"Desc":"second","Delay":500,"Files":[{{"Ext":"ass","Link":"{url}/s/2.ass"}}]}}]"#
        );
        let lookup = server
            .mock("POST", "/api")
            .match_body(mockito::Matcher::UrlEncoded(
                "shortname".into(),
                "film 2019 ".into(),
            ))
            .with_body(lookup_body)
            .create();
        server.mock("GET", "/s/1.srt").with_body("one").create();
        server.mock("GET", "/s/2.ass").with_body("two").create();

        let http = HttpClient::new().unwrap();
        let mut downloader = SubtitleDownloader::new(
            ShooterClient::new(&http, format!("{url}/api")),
            SubtitleFetcher::new(&http),
            Language::Chn,
        );
        downloader.handle(&video).unwrap();

        lookup.assert();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Film.2019.720p.srt")).unwrap(),
            "one"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Film.2019.720p.ass")).unwrap(),
            "two"
        );
    }

    #[test]
    fn test_failed_match_does_not_block_next_match() {
        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("clip.avi");
        fs::write(&video, vec![9u8; 10_000]).unwrap();

        let mut server = Server::new();
        let url = server.url();
        let lookup_body = format!(
            r#"[{{"Desc":"broken","Delay":0,"Files":[{{"Ext":"srt","Link":"{url}/gone.srt"}}]}},
               {{"Desc":"good","Delay":0,"Files":[{{"Ext":"sub","Link":"{url}/ok.sub"}}]}}]"#
        );
        server.mock("POST", "/").with_body(lookup_body).create();
        server.mock("GET", "/gone.srt").with_status(404).create();
        server.mock("GET", "/ok.sub").with_body("ok").create();

        let http = HttpClient::new().unwrap();
        let mut downloader = SubtitleDownloader::new(
            ShooterClient::new(&http, url.clone()),
            SubtitleFetcher::new(&http),
            Language::Chn,
        );
        downloader.handle(&video).unwrap();

        assert!(!temp_dir.path().join("clip.srt").exists());
        assert!(temp_dir.path().join("clip.sub").exists());
    }

    #[test]
    fn test_small_video_is_skipped_without_network() {
        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("tiny.mkv");
        fs::write(&video, b"not much").unwrap();

        let mut server = Server::new();
        let lookup = server.mock("POST", "/").expect(0).create();

        let http = HttpClient::new().unwrap();
        let mut downloader = SubtitleDownloader::new(
            ShooterClient::new(&http, server.url()),
            SubtitleFetcher::new(&http),
            Language::Chn,
        );
        downloader.handle(&video).unwrap();
        lookup.assert();
    }

    #[test]
    fn test_lookup_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("movie.mkv");
        fs::write(&video, vec![1u8; 10_000]).unwrap();

        let mut server = Server::new();
        server.mock("POST", "/").with_body([0xffu8]).create();

        let http = HttpClient::new().unwrap();
        let mut downloader = SubtitleDownloader::new(
            ShooterClient::new(&http, server.url()),
            SubtitleFetcher::new(&http),
            Language::Chn,
        );
        assert!(matches!(
            downloader.handle(&video),
            Err(SubError::MalformedResponse(_))
        ));
    }
}
