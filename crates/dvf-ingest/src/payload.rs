//! Decoding of raw CSV payloads.
//!
//! Payloads arrive either plain or gzip-compressed, from the network or a
//! local file. Every column is read as text; numeric casts happen once the
//! payload becomes a [`crate::Dataset`] so postcodes keep their leading zeros.

use std::io::{Cursor, Read};

use flate2::read::GzDecoder;
use polars::prelude::*;

use crate::error::{IngestError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Whether the bytes start with the gzip magic number.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Decompress gzip payloads; plain payloads pass through.
pub fn decompress(bytes: Vec<u8>, origin: &str) -> Result<Vec<u8>> {
    if !is_gzip(&bytes) {
        return Ok(bytes);
    }
    let mut decoded = Vec::with_capacity(bytes.len() * 4);
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut decoded)
        .map_err(|source| IngestError::Decompress {
            origin: origin.to_string(),
            source,
        })?;
    Ok(decoded)
}

/// Decode a CSV payload into a string-typed frame.
///
/// Returns `Ok(None)` when the payload holds no rows (empty body or header
/// only): the source answered, it simply has nothing for this key.
pub fn decode_table(bytes: Vec<u8>, origin: &str) -> Result<Option<DataFrame>> {
    let mut bytes = decompress(bytes, origin)?;
    if bytes.starts_with(&UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

    if frame.height() == 0 {
        return Ok(None);
    }
    Ok(Some(frame))
}
