//! Leaf digests from fixed-size ranges of a file

use crate::error::TreeError;
use crate::source::LeafSource;
use crate::tree::hasher::{self, HashingScheme};
use crate::types::Digest;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Byte range `[start_offset, end_offset)` of a file backing one leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileChunk {
    pub start_offset: u64,
    pub end_offset: u64,
}

impl FileChunk {
    pub fn len(&self) -> u64 {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits a file into `chunk_size` ranges and hashes each into one leaf
///
/// Files no larger than `chunk_size` are split at a quarter of it instead, so
/// small files still produce more than one leaf.
#[derive(Debug, Clone)]
pub struct FileChunkSource {
    path: PathBuf,
    chunk_size: u64,
}

impl FileChunkSource {
    pub fn new(path: impl Into<PathBuf>, chunk_size: u64) -> Result<Self, TreeError> {
        if chunk_size == 0 {
            return Err(TreeError::Configuration(
                "Chunk size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            path: path.into(),
            chunk_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Chunk size as configured
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Chunk size actually used for a file of `file_size` bytes
    pub fn effective_chunk_size(&self, file_size: u64) -> u64 {
        if file_size <= self.chunk_size {
            (self.chunk_size / 4).max(1)
        } else {
            self.chunk_size
        }
    }

    /// Byte ranges of every leaf, in file order
    pub fn chunks(&self) -> Result<Vec<FileChunk>, TreeError> {
        let file_size = std::fs::metadata(&self.path)?.len();
        let chunk_size = self.effective_chunk_size(file_size);

        let mut chunks = Vec::new();
        let mut start_offset = 0;
        while start_offset < file_size {
            let end_offset = start_offset.saturating_add(chunk_size).min(file_size);
            chunks.push(FileChunk {
                start_offset,
                end_offset,
            });
            start_offset = end_offset;
        }
        Ok(chunks)
    }
}

impl LeafSource for FileChunkSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn leaf_digests(&self, scheme: HashingScheme) -> Result<Vec<Digest>, TreeError> {
        let mut file = File::open(&self.path)?;
        let file_size = file.metadata()?.len();
        let chunk_size = self.effective_chunk_size(file_size);
        if chunk_size != self.chunk_size {
            info!(
                file_size,
                configured_chunk_size = self.chunk_size,
                chunk_size,
                "File not larger than chunk size, splitting at a quarter"
            );
        }

        // A chunk never holds more than the whole file
        let buffer_len = usize::try_from(chunk_size.min(file_size)).map_err(|_| {
            TreeError::Configuration(format!("Chunk size {} exceeds addressable memory", chunk_size))
        })?;
        let mut buffer = vec![0u8; buffer_len];
        let mut digests = Vec::new();

        loop {
            let filled = fill_buffer(&mut file, &mut buffer)?;
            if filled == 0 {
                break;
            }
            digests.push(hasher::hash(scheme, &buffer[..filled]));
            if filled < buffer.len() {
                break;
            }
        }

        info!(
            leaves = digests.len(),
            chunk_size,
            scheme = %scheme,
            "Prepared leaf digests from file chunks"
        );
        Ok(digests)
    }
}

/// Read until `buffer` is full or the reader is exhausted
fn fill_buffer(reader: &mut impl Read, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    if filled > 0 {
        debug!(bytes = filled, "Read file chunk");
    }
    Ok(filled)
}
