//! BFAST encoder
//!
//! Serializes an ordered list of byte buffers as header, range table, zero
//! padding up to `data_start`, then each buffer at its aligned offset.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use bfast_core::{ByteOrder, Layout, ALIGNMENT};
use tracing::{debug, trace};

use crate::error::Result;

/// Configuration for writing containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderConfig {
    /// Byte order for header and range table integers
    pub byte_order: ByteOrder,
}

impl EncoderConfig {
    /// Set the byte order of the written container
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn little_endian() -> Self {
        Self::default().with_byte_order(ByteOrder::Little)
    }

    pub fn big_endian() -> Self {
        Self::default().with_byte_order(ByteOrder::Big)
    }
}

/// Single-writer container encoder
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Compute the validated layout for `buffers` without writing anything
    pub fn plan<B: AsRef<[u8]>>(&self, buffers: &[B]) -> Result<Layout> {
        let sizes = buffers.iter().map(|b| b.as_ref().len() as u64);
        Ok(Layout::plan(sizes, self.config.byte_order)?)
    }

    /// Write a container to `writer`, returning the number of bytes written
    ///
    /// On error the sink holds a partial container that must be discarded.
    pub fn write_to<W, B>(&self, writer: &mut W, buffers: &[B]) -> Result<u64>
    where
        W: Write,
        B: AsRef<[u8]>,
    {
        let layout = self.plan(buffers)?;

        writer.write_all(&layout.prelude_bytes())?;
        let mut cursor = layout.header.data_start;

        for (index, (buffer, range)) in buffers.iter().zip(&layout.ranges).enumerate() {
            write_zeros(writer, range.begin - cursor)?;
            writer.write_all(buffer.as_ref())?;
            trace!(index, begin = range.begin, end = range.end, "wrote buffer");
            cursor = range.end;
        }

        let file_len = layout.file_len();
        write_zeros(writer, file_len - cursor)?;

        debug!(
            buffers = layout.header.num_buffers,
            bytes = file_len,
            byte_order = %layout.header.byte_order,
            "encoded BFAST container"
        );
        Ok(file_len)
    }

    /// Encode into a new byte vector sized exactly for the container
    pub fn encode<B: AsRef<[u8]>>(&self, buffers: &[B]) -> Result<Vec<u8>> {
        let capacity = self.plan(buffers)?.file_len() as usize;
        let mut bytes = Vec::with_capacity(capacity);
        self.write_to(&mut bytes, buffers)?;
        Ok(bytes)
    }

    /// Create (or truncate) `path` and write a container to it
    pub fn write_file<P, B>(&self, path: P, buffers: &[B]) -> Result<u64>
    where
        P: AsRef<Path>,
        B: AsRef<[u8]>,
    {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let written = self.write_to(&mut writer, buffers)?;
        writer.flush()?;
        debug!(path = %path.display(), bytes = written, "wrote BFAST file");
        Ok(written)
    }
}

/// Encode `buffers` with the native byte order
pub fn encode<B: AsRef<[u8]>>(buffers: &[B]) -> Result<Vec<u8>> {
    Encoder::default().encode(buffers)
}

fn write_zeros<W: Write>(writer: &mut W, mut count: u64) -> std::io::Result<()> {
    const ZEROS: [u8; ALIGNMENT as usize] = [0; ALIGNMENT as usize];
    while count > 0 {
        let chunk = count.min(ALIGNMENT) as usize;
        writer.write_all(&ZEROS[..chunk])?;
        count -= chunk as u64;
    }
    Ok(())
}
