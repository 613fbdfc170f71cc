use md5::{Digest, Md5};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::domain::models::{BlockDigest, MediaFingerprint};
use crate::error::{Result, SubError};

const BLOCK_SIZE: u64 = 4096;
const MIN_FILE_SIZE: u64 = 8192;

/// Sample offsets in the order they appear in the fingerprint.
fn sample_offsets(size: u64) -> [u64; 4] {
    [BLOCK_SIZE, size / 3 * 2, size / 3, size - MIN_FILE_SIZE]
}

pub fn compute(path: &Path) -> Result<MediaFingerprint> {
    let access = |source| SubError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(access)?;
    let size = file.metadata().map_err(access)?.len();
    if size < MIN_FILE_SIZE {
        return Err(SubError::UnsupportedFile {
            path: path.to_path_buf(),
            size,
        });
    }

    let blocks = sample_offsets(size).map(|offset| block_digest(&mut file, offset));
    Ok(MediaFingerprint::new(blocks))
}

fn block_digest(file: &mut File, offset: u64) -> BlockDigest {
    let mut buf = vec![0u8; BLOCK_SIZE as usize];
    let read = file
        .seek(SeekFrom::Start(offset))
        .and_then(|_| file.read_exact(&mut buf));

    match read {
        Ok(()) => BlockDigest::Hashed(hex::encode(Md5::digest(&buf))),
        Err(_) => BlockDigest::Unreadable { offset },
    }
}
