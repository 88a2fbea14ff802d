//! Big-endian cursor and length-prefix helpers shared by the extension types.

use crate::error::{ExtensionError, ExtensionResult};

/// Forward-only reader over an extension value.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self, what: &'static str) -> ExtensionResult<u8> {
        Ok(self.read_bytes(1, what)?[0])
    }

    pub fn read_u16(&mut self, what: &'static str) -> ExtensionResult<u16> {
        let bytes = self.read_bytes(2, what)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_bytes(&mut self, len: usize, what: &'static str) -> ExtensionResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ExtensionError::Decode(what));
        }
        let slice = &self.bytes[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(slice)
    }

    /// `u16` length followed by that many bytes.
    pub fn read_opaque16(&mut self, what: &'static str) -> ExtensionResult<&'a [u8]> {
        let len = self.read_u16(what)?;
        self.read_bytes(usize::from(len), what)
    }

    /// Reader over the next `u16`-prefixed block; `self` moves past it.
    pub fn sub_reader16(&mut self, what: &'static str) -> ExtensionResult<Reader<'a>> {
        self.read_opaque16(what).map(Reader::new)
    }

    /// Fails with `TrailingData` unless every byte was consumed.
    pub fn expect_end(&self) -> ExtensionResult<()> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(ExtensionError::TrailingData(extra)),
        }
    }
}

pub(crate) fn len_to_u16(len: usize, label: &'static str) -> ExtensionResult<u16> {
    u16::try_from(len).map_err(|_| ExtensionError::InternalError(label))
}

pub(crate) fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_opaque16(
    out: &mut Vec<u8>,
    bytes: &[u8],
    label: &'static str,
) -> ExtensionResult<()> {
    write_u16(out, len_to_u16(bytes.len(), label)?);
    out.extend_from_slice(bytes);
    Ok(())
}
