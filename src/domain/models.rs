use serde::{Deserialize, Deserializer};
use std::fmt;

/// Digest of one 4096-byte sample block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockDigest {
    Hashed(String),
    /// The block could not be read in full. It contributes an empty component.
    Unreadable { offset: u64 },
}

/// Four block digests in sample order, rendered as `a;b;c;d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFingerprint {
    blocks: [BlockDigest; 4],
}

impl MediaFingerprint {
    pub fn new(blocks: [BlockDigest; 4]) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[BlockDigest; 4] {
        &self.blocks
    }

    pub fn is_degraded(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, BlockDigest::Unreadable { .. }))
    }
}

impl fmt::Display for MediaFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            if let BlockDigest::Hashed(hex) = block {
                f.write_str(hex)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SubtitleMatch {
    #[serde(rename = "Desc", alias = "desc", default)]
    pub description: String,
    #[serde(rename = "Delay", alias = "delay", default)]
    pub delay: i64,
    #[serde(
        rename = "Files",
        alias = "files",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub files: Vec<SubtitleAsset>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SubtitleAsset {
    #[serde(rename = "Ext", alias = "ext")]
    pub extension: String,
    #[serde(rename = "Link", alias = "link")]
    pub link: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
