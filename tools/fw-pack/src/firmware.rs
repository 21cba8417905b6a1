//! Coprocessor firmware packing
//!
//! The ESP32 firmware flashes the dimmer coprocessor from an image baked into
//! `src/coprocessor.h`. The image is zlib-compressed with the 2-byte zlib header and
//! the 4-byte Adler-32 trailer removed, leaving a raw deflate stream. The on-device
//! inflater runs in raw mode, so it never sees zlib framing.

use flate2::read::DeflateDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::codegen::{self, HeaderOptions};
use crate::error::{PackError, Result};

/// zlib header length (CMF + FLG)
const ZLIB_HEADER_LEN: usize = 2;

/// zlib trailer length (big-endian Adler-32)
const ZLIB_TRAILER_LEN: usize = 4;

/// Raw deflate stream ready to be embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    /// Size of the firmware image before compression
    pub original_len: usize,
    /// Deflate stream without zlib framing
    pub bytes: Vec<u8>,
}

impl CompressedPayload {
    /// Compressed size as a fraction of the original (1.0 when the input is empty)
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            1.0
        } else {
            self.bytes.len() as f64 / self.original_len as f64
        }
    }
}

/// Options for a single packing run
#[derive(Debug, Clone)]
pub struct PackOptions {
    pub header: HeaderOptions,
    /// Inflate the payload again and compare it with the input before writing
    pub verify: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            header: HeaderOptions::default(),
            verify: true,
        }
    }
}

/// Result of a packing run
#[derive(Debug, Clone)]
pub struct PackReport {
    pub original_len: usize,
    pub compressed_len: usize,
    pub verified: bool,
}

/// Compress a firmware image into a raw deflate stream.
///
/// Uses a zlib stream at the default level (6) and strips the framing afterwards.
/// The exact bytes depend on the deflate backend; only the inflated result is fixed.
pub fn compress(data: &[u8]) -> Result<CompressedPayload> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(PackError::Deflate)?;
    let framed = encoder.finish().map_err(PackError::Deflate)?;

    let bytes = strip_zlib_framing(&framed)?.to_vec();
    Ok(CompressedPayload {
        original_len: data.len(),
        bytes,
    })
}

/// Drop the zlib header and Adler-32 trailer
fn strip_zlib_framing(framed: &[u8]) -> Result<&[u8]> {
    if framed.len() < ZLIB_HEADER_LEN + ZLIB_TRAILER_LEN {
        return Err(PackError::Framing(framed.len()));
    }
    Ok(&framed[ZLIB_HEADER_LEN..framed.len() - ZLIB_TRAILER_LEN])
}

/// Inflate a raw deflate stream, as the coprocessor loader does on device
pub fn decompress(payload: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(payload);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(PackError::Deflate)?;
    Ok(out)
}

/// Check that `payload` inflates back to `original`
pub fn verify_round_trip(original: &[u8], payload: &[u8]) -> Result<()> {
    let inflated = decompress(payload)?;
    if inflated != original {
        return Err(PackError::RoundTrip {
            expected: original.len(),
            actual: inflated.len(),
        });
    }
    Ok(())
}

/// Read a firmware image in full
pub fn read_firmware(input: &Path) -> Result<Vec<u8>> {
    std::fs::read(input).map_err(|e| PackError::read(input, e))
}

/// Read, compress and render the header text for `input`
fn build_header(input: &Path, options: &PackOptions) -> Result<(String, PackReport)> {
    let data = read_firmware(input)?;
    let payload = compress(&data)?;

    if options.verify {
        verify_round_trip(&data, &payload.bytes)?;
        debug!("Round-trip verified ({} bytes)", data.len());
    }

    let header = codegen::render_header(&payload.bytes, &options.header);
    let report = PackReport {
        original_len: payload.original_len,
        compressed_len: payload.bytes.len(),
        verified: options.verify,
    };
    Ok((header, report))
}

/// Pack `input` into a C header at `output`.
///
/// The input is read completely before the output is opened, so a missing
/// firmware image never leaves a truncated header behind. An existing header is
/// overwritten unconditionally.
pub fn pack_firmware(input: &Path, output: &Path, options: &PackOptions) -> Result<PackReport> {
    info!("Reading coprocessor firmware");
    let (header, report) = build_header(input, options)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| PackError::write(parent, e))?;
        }
    }
    std::fs::write(output, header).map_err(|e| PackError::write(output, e))?;

    info!(
        "Compressed from {} to {}",
        report.original_len, report.compressed_len
    );
    debug!("Wrote {}", output.display());
    Ok(report)
}

/// Check whether the header at `output` matches what `input` would generate now.
///
/// A missing header counts as out of sync.
pub fn check_header(input: &Path, output: &Path, options: &PackOptions) -> Result<bool> {
    let (fresh, _) = build_header(input, options)?;

    let existing = match std::fs::read_to_string(output) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Header missing: {}", output.display());
            return Ok(false);
        }
        Err(e) => return Err(PackError::read(output, e)),
    };

    if fresh == existing {
        info!("Header in sync: {}", output.display());
        Ok(true)
    } else {
        warn!("Header out of sync: {}", output.display());
        Ok(false)
    }
}
