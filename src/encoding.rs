//! Byte <-> text conversion for patched files.
//!
//! Encodings are selected by WHATWG label (`"utf-8"`, `"windows-1252"`,
//! `"shift_jis"`, ...) and resolved through `encoding_rs`. Decoding is strict:
//! malformed input is an error rather than being replaced with U+FFFD. File
//! content is additionally required to encode back to the exact bytes it was
//! decoded from ([`TextEncoding::decode_exact`]); legacy multi-byte encodings
//! have duplicate byte forms (Shift_JIS NEC/IBM extensions) that would
//! otherwise be rewritten outside the edited range. A BOM, if present, is kept
//! as ordinary text and written back unchanged.

use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::error::{PatchError, PatchResult};

/// A text encoding usable for both reading and writing
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static encoding_rs::Encoding);

impl TextEncoding {
    /// Resolve an encoding label.
    ///
    /// Labels whose encoder writes a different encoding than the decoder reads
    /// (the UTF-16 family and `replacement`) are rejected, since the file could
    /// not be written back in its own encoding.
    pub fn for_label(label: &str) -> PatchResult<Self> {
        let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PatchError::unsupported_encoding(label))?;

        if encoding.output_encoding() != encoding {
            return Err(PatchError::unsupported_encoding(label));
        }

        Ok(Self(encoding))
    }

    /// Canonical name of the encoding
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decode file bytes. Malformed input yields `InvalidData`.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> io::Result<Cow<'a, str>> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("content is not valid {}", self.name()),
                )
            })
    }

    /// Decode bytes that must encode back to themselves unchanged.
    /// Content with non-canonical byte forms yields `InvalidData`.
    pub fn decode_exact<'a>(&self, bytes: &'a [u8]) -> io::Result<Cow<'a, str>> {
        let text = self.decode(bytes)?;
        let canonical = self.encode(&text).ok().is_some_and(|b| b.as_ref() == bytes);
        if !canonical {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "content does not round-trip through {}; writing it back would alter unedited lines",
                    self.name()
                ),
            ));
        }
        Ok(text)
    }

    /// Encode text for writing. Unmappable characters yield `InvalidData`.
    pub fn encode<'a>(&self, text: &'a str) -> io::Result<Cow<'a, [u8]>> {
        let (bytes, _, had_unmappable) = self.0.encode(text);
        if had_unmappable {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("text contains characters not representable in {}", self.name()),
            ));
        }
        Ok(bytes)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self(encoding_rs::UTF_8)
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
