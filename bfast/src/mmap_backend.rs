//! Memory-mapped file backend for BFAST containers
//!
//! Maps a container read-only so that parsing touches only the pages holding
//! the header and range table, and each buffer's pages are faulted in when
//! that buffer is read. The mapping is owned by the backend and released when
//! the decoder is dropped.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use bfast_core::{BfastError, BfastHeader, StorageBackend};
use memmap2::{Mmap, MmapOptions};
use tracing::debug;

use crate::{decoder::Bfast, error::Result};

/// Options for mapping container files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MmapConfig {
    /// Pre-fault every page at map time (Linux only, ignored elsewhere)
    pub populate: bool,
}

impl MmapConfig {
    /// Set whether pages are pre-faulted when the file is mapped
    pub fn with_populate(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }
}

/// Read-only mapping of a container file
#[derive(Debug)]
pub struct MappedFile {
    mmap: Mmap,
    path: PathBuf,
}

impl MappedFile {
    /// Map `path` read-only
    pub fn open<P: AsRef<Path>>(path: P, config: MmapConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;

        // Reject files that cannot hold a header before mapping them
        let len = file.metadata()?.len();
        if len < BfastHeader::SIZE as u64 {
            return Err(BfastError::TooSmall {
                required: BfastHeader::SIZE as u64,
                actual: len,
            }
            .into());
        }

        let mut options = MmapOptions::new();
        if config.populate {
            options.populate();
        }

        // SAFETY: Read-only mapping. Containers are immutable once written;
        // the caller must not truncate or rewrite the file while it is mapped.
        let mmap = unsafe { options.map(&file)? };
        debug!(path = %path.display(), bytes = mmap.len(), "mapped BFAST file");

        Ok(Self { mmap, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for MappedFile {
    fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}

impl Bfast<MappedFile> {
    /// Open and parse a container file through a memory mapping
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, MmapConfig::default())
    }

    /// Open a container file with explicit mapping options
    pub fn open_with<P: AsRef<Path>>(path: P, config: MmapConfig) -> Result<Self> {
        Self::parse(MappedFile::open(path, config)?)
    }

    pub fn path(&self) -> &Path {
        self.backend().path()
    }
}
