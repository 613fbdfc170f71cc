use std::path::Path;
use tracing::debug;

use crate::domain::models::{BlockDigest, SubtitleMatch};
use crate::error::{Result, SubError};
use crate::infra::http::HttpClient;
use crate::media::{fingerprint, short_name};

pub const SHOOTER_API_URL: &str = "http://shooter.cn/api/subapi.php";

/// Anything shorter is the service's "nothing found" reply, not JSON.
const MIN_RESPONSE_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Chn,
    // only reachable through the library API; the CLI always asks for Chn
    #[allow(dead_code)]
    Eng,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Chn => "chn",
            Language::Eng => "eng",
        }
    }
}

pub struct ShooterClient<'a> {
    http: &'a HttpClient,
    endpoint: String,
}

impl<'a> ShooterClient<'a> {
    pub fn new(http: &'a HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Fingerprints and names the video, then queries the service.
    pub fn lookup_file(&self, video: &Path, lang: Language) -> Result<Vec<SubtitleMatch>> {
        let video = std::path::absolute(video).map_err(|source| SubError::FileAccess {
            path: video.to_path_buf(),
            source,
        })?;

        let fp = fingerprint::compute(&video)?;
        if fp.is_degraded() {
            let offsets: Vec<u64> = fp
                .blocks()
                .iter()
                .filter_map(|b| match b {
                    BlockDigest::Unreadable { offset } => Some(*offset),
                    BlockDigest::Hashed(_) => None,
                })
                .collect();
            debug!(file = %video.display(), ?offsets, "fingerprint has unreadable blocks");
        }
        let name = short_name::short_name(&video);
        self.lookup(&fp.to_string(), &name, lang)
    }

    pub fn lookup(
        &self,
        filehash: &str,
        shortname: &str,
        lang: Language,
    ) -> Result<Vec<SubtitleMatch>> {
        debug!(filehash, shortname, lang = lang.code(), "querying {}", self.endpoint);

        let response = self
            .http
            .client()
            .post(&self.endpoint)
            .form(&lookup_form(filehash, shortname, lang))
            .send()?
            .error_for_status()?;
        let body = response.bytes()?;

        if body.len() < MIN_RESPONSE_LEN {
            return Err(SubError::MalformedResponse(format!(
                "body is only {} bytes",
                body.len()
            )));
        }

        serde_json::from_slice(&body).map_err(|e| SubError::MalformedResponse(e.to_string()))
    }
}

fn lookup_form(filehash: &str, shortname: &str, lang: Language) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("filehash", filehash.to_string()),
        ("shortname", shortname.to_string()),
        ("format", "json".to_string()),
    ];
    // The service treats a missing lang as Chinese.
    if lang != Language::Chn {
        form.push(("lang", lang.code().to_string()));
    }
    form
}
