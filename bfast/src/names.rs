//! Named buffer convention
//!
//! By convention the first buffer of a container holds the UTF-8 names of
//! every buffer, itself included, each terminated by a NUL byte and stored
//! in buffer order. The names buffer itself is named
//! [`NAMES_BUFFER_NAME`]. This module builds such containers and resolves
//! names back to buffer indices.

use std::{borrow::Cow, io::Write, path::Path};

use bfast_core::{validate_name, NameError, StorageBackend, NAMES_BUFFER_NAME};
use hashbrown::{hash_map::Entry, HashMap};
use tracing::warn;

use crate::{
    decoder::Bfast,
    encoder::{Encoder, EncoderConfig},
    error::{Error, Result},
};

/// Split a names buffer into its NUL-terminated entries
///
/// A missing terminator after the last name is tolerated.
pub fn parse_names(bytes: &[u8]) -> Result<Vec<&str>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let body = bytes.strip_suffix(&[0u8]).unwrap_or(bytes);
    body.split(|&b| b == 0)
        .enumerate()
        .map(|(index, raw)| {
            std::str::from_utf8(raw).map_err(|_| Error::from(NameError::InvalidUtf8 { index }))
        })
        .collect()
}

/// Serialize names as consecutive NUL-terminated strings
pub fn encode_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(names.iter().map(|n| n.as_ref().len() + 1).sum());
    for name in names {
        let name = name.as_ref();
        if name.bytes().any(|b| b == 0) {
            return Err(NameError::ContainsNul.into());
        }
        bytes.extend_from_slice(name.as_bytes());
        bytes.push(0);
    }
    Ok(bytes)
}

/// Name to index lookup over a parsed names buffer
#[derive(Debug, Clone)]
pub struct NameTable<'a> {
    names: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
}

impl<'a> NameTable<'a> {
    /// Build the lookup; on duplicate names the first occurrence wins
    pub fn new(names: Vec<&'a str>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (i, &name) in names.iter().enumerate() {
            match index.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
                Entry::Occupied(_) => {
                    warn!(name, index = i, "duplicate buffer name, keeping first");
                }
            }
        }
        Self { names, index }
    }

    /// Index of the buffer called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, index: usize) -> Option<&'a str> {
        self.names.get(index).copied()
    }

    pub fn names(&self) -> &[&'a str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<B: StorageBackend> Bfast<B> {
    /// Names of all buffers, read from buffer 0
    ///
    /// A container without buffers has no names.
    pub fn names(&self) -> Result<Vec<&str>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let names = parse_names(self.buffer(0)?)?;
        if names.len() != self.buffer_count() {
            return Err(Error::NameCount {
                names: names.len(),
                buffers: self.buffer_count(),
            });
        }
        Ok(names)
    }

    /// Build a reusable name lookup for this container
    pub fn name_table(&self) -> Result<NameTable<'_>> {
        Ok(NameTable::new(self.names()?))
    }

    /// Borrow the buffer called `name`, if present
    ///
    /// Scans the names buffer on every call. Build a [`NameTable`] with
    /// [`Bfast::name_table`] for repeated lookups.
    pub fn buffer_by_name(&self, name: &str) -> Result<Option<&[u8]>> {
        self.names()?
            .iter()
            .position(|&n| n == name)
            .map(|index| self.buffer(index))
            .transpose()
    }
}

/// Builder for containers that follow the named buffer convention
#[derive(Debug, Clone, Default)]
pub struct NamedBuffers<'a> {
    names: Vec<String>,
    buffers: Vec<Cow<'a, [u8]>>,
    config: EncoderConfig,
}

impl<'a> NamedBuffers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoder configuration used when writing
    pub fn with_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a named buffer
    pub fn push(&mut self, name: &str, data: impl Into<Cow<'a, [u8]>>) -> Result<&mut Self> {
        validate_name(name)?;
        self.names.push(name.to_owned());
        self.buffers.push(data.into());
        Ok(self)
    }

    /// Append a named buffer of plain-old-data elements without copying
    pub fn push_pod<T: bytemuck::Pod>(&mut self, name: &str, data: &'a [T]) -> Result<&mut Self> {
        self.push(name, bytemuck::cast_slice::<T, u8>(data))
    }

    /// Builder-style [`NamedBuffers::push`]
    pub fn with_buffer(mut self, name: &str, data: impl Into<Cow<'a, [u8]>>) -> Result<Self> {
        self.push(name, data)?;
        Ok(self)
    }

    /// Number of user buffers, excluding the names buffer
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Full buffer list: names buffer first, then user buffers in order
    pub fn to_buffers(&self) -> Result<Vec<Cow<'_, [u8]>>> {
        let names: Vec<&str> = std::iter::once(NAMES_BUFFER_NAME)
            .chain(self.names.iter().map(String::as_str))
            .collect();

        let mut buffers = Vec::with_capacity(self.buffers.len() + 1);
        buffers.push(Cow::Owned(encode_names(&names)?));
        buffers.extend(self.buffers.iter().map(|b| Cow::Borrowed(b.as_ref())));
        Ok(buffers)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Encoder::new(self.config).encode(&self.to_buffers()?)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        Encoder::new(self.config).write_to(writer, &self.to_buffers()?)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        Encoder::new(self.config).write_file(path, &self.to_buffers()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use crate::encoder::encode;
    use bfast_core::{BfastError, ErrorCategory};

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_names(b"a\0bb\0").unwrap(), ["a", "bb"]);
        assert_eq!(parse_names(b"\0a\0").unwrap(), ["", "a"]);
        assert_eq!(parse_names(b"a\0bb").unwrap(), ["a", "bb"]);
        assert_eq!(parse_names(b"\0").unwrap(), [""]);
        assert!(parse_names(b"").unwrap().is_empty());

        let err = parse_names(b"ok\0\xff\xfe\0").unwrap_err();
        assert!(matches!(
            err,
            Error::Format(BfastError::InvalidName(NameError::InvalidUtf8 { index: 1 }))
        ));
    }

    #[test]
    fn test_encode_names() {
        assert_eq!(encode_names(&["", "pos"]).unwrap(), b"\0pos\0");
        assert!(encode_names(&["a\0b"]).is_err());
    }

    #[test]
    fn test_buffer_by_name() {
        let bytes = encode(&[b"a\0bb\0".as_slice(), b"payload"]).unwrap();
        let bfast = decode(&bytes).unwrap();
        assert_eq!(bfast.buffer_by_name("bb").unwrap(), Some(b"payload".as_slice()));
        assert_eq!(bfast.buffer_by_name("a").unwrap(), Some(b"a\0bb\0".as_slice()));
        assert_eq!(bfast.buffer_by_name("missing").unwrap(), None);
    }

    #[test]
    fn test_buffer_by_name_matches_table() {
        let bytes = encode(&[b"\0dup\0dup\0".as_slice(), b"first", b"second"]).unwrap();
        let bfast = decode(&bytes).unwrap();
        let table = bfast.name_table().unwrap();
        for name in ["", "dup", "missing"] {
            let via_table = table.index_of(name).map(|i| bfast.buffer(i).unwrap());
            assert_eq!(bfast.buffer_by_name(name).unwrap(), via_table);
        }
        assert_eq!(bfast.buffer_by_name("dup").unwrap(), Some(b"first".as_slice()));
    }

    #[test]
    fn test_name_count_mismatch() {
        let bytes = encode(&[b"a\0".as_slice(), b"payload"]).unwrap();
        let bfast = decode(&bytes).unwrap();
        let err = bfast.names().unwrap_err();
        assert!(matches!(err, Error::NameCount { names: 1, buffers: 2 }));
        assert_eq!(err.category(), ErrorCategory::Malformed);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let table = NameTable::new(vec!["", "dup", "dup"]);
        assert_eq!(table.index_of("dup"), Some(1));
        assert_eq!(table.name(2), Some("dup"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_named_builder() {
        let indices: [u32; 6] = [0, 1, 2, 2, 1, 3];
        let mut builder = NamedBuffers::new();
        builder
            .push("g3d:corner:index:0:int32:1", bytemuck::cast_slice::<u32, u8>(&indices))
            .unwrap()
            .push("meta", b"{}".to_vec())
            .unwrap();
        assert_eq!(builder.len(), 2);

        let bytes = builder.encode().unwrap();
        let bfast = decode(&bytes).unwrap();
        assert_eq!(bfast.buffer_count(), 3);
        assert_eq!(
            bfast.names().unwrap(),
            ["", "g3d:corner:index:0:int32:1", "meta"]
        );

        let table = bfast.name_table().unwrap();
        assert_eq!(table.index_of("meta"), Some(2));
        assert_eq!(bfast.buffer(2).unwrap(), b"{}");
        assert_eq!(
            bfast.buffer_by_name("g3d:corner:index:0:int32:1").unwrap(),
            Some(bytemuck::cast_slice::<u32, u8>(&indices))
        );
    }

    #[test]
    fn test_builder_rejects_bad_names() {
        let mut builder = NamedBuffers::new();
        assert!(builder.push("", b"x".as_slice()).is_err());
        assert!(builder.push("a\0b", b"x".as_slice()).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_empty_builder() {
        let bytes = NamedBuffers::new().encode().unwrap();
        let bfast = decode(&bytes).unwrap();
        assert_eq!(bfast.buffer_count(), 1);
        assert_eq!(bfast.names().unwrap(), [""]);
    }
}
