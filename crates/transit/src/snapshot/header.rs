//! Snapshot file framing.
//!
//! Header layout (16 bytes, little-endian):
//!   [0..4]   magic "TCAT"
//!   [4..8]   schema version (u32)
//!   [8..12]  payload length in bytes (u32)
//!   [12..16] xxHash32 of the payload
//!
//! The bitcode payload follows directly.

use xxhash_rust::xxh32::xxh32;

use crate::models::types::{Result, TransitError};

pub const MAGIC: [u8; 4] = *b"TCAT";
pub const HEADER_SIZE: usize = 16;

/// Bumped whenever the persisted records change shape.
pub const SNAPSHOT_VERSION: u32 = 1;

const XXHASH_SEED: u32 = 0;

/// Prepend a header describing `payload`.
pub fn wrap_with_header(payload: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|_| {
        TransitError::InvalidData(format!(
            "snapshot payload of {} bytes is too large",
            payload.len()
        ))
    })?;

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(&xxh32(payload, XXHASH_SEED).to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Validate the header and return the payload it describes.
pub fn unwrap_header(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < HEADER_SIZE {
        return Err(TransitError::CorruptSnapshot(format!(
            "file is {} bytes, shorter than the {HEADER_SIZE} byte header",
            bytes.len()
        )));
    }
    if bytes[..4] != MAGIC {
        return Err(TransitError::CorruptSnapshot(
            "not a transport catalogue snapshot".to_string(),
        ));
    }

    let version = read_u32(bytes, 4);
    if version != SNAPSHOT_VERSION {
        return Err(TransitError::CorruptSnapshot(format!(
            "schema version {version} is not supported, expected {SNAPSHOT_VERSION}"
        )));
    }

    let payload = &bytes[HEADER_SIZE..];
    let length = read_u32(bytes, 8) as usize;
    if payload.len() != length {
        return Err(TransitError::CorruptSnapshot(format!(
            "payload is {} bytes, header declares {length}",
            payload.len()
        )));
    }

    let checksum = read_u32(bytes, 12);
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(TransitError::CorruptSnapshot(format!(
            "checksum mismatch (expected {checksum:#010X}, got {computed:#010X})"
        )));
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_corrupt(result: Result<&[u8]>) {
        assert!(matches!(result, Err(TransitError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_wrap_and_unwrap() {
        let wrapped = wrap_with_header(b"route data").unwrap();

        assert_eq!(&wrapped[..4], b"TCAT");
        assert_eq!(wrapped.len(), HEADER_SIZE + 10);
        assert_eq!(unwrap_header(&wrapped).unwrap(), b"route data");
    }

    #[test]
    fn test_empty_payload() {
        let wrapped = wrap_with_header(&[]).unwrap();
        assert!(unwrap_header(&wrapped).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_truncated_and_foreign_files() {
        let wrapped = wrap_with_header(b"route data").unwrap();

        assert_corrupt(unwrap_header(&wrapped[..HEADER_SIZE - 1]));
        assert_corrupt(unwrap_header(&wrapped[..wrapped.len() - 1]));
        assert_corrupt(unwrap_header(b"MEGA............route data"));
    }

    #[test]
    fn test_rejects_other_version() {
        let mut wrapped = wrap_with_header(b"route data").unwrap();
        wrapped[4..8].copy_from_slice(&(SNAPSHOT_VERSION + 1).to_le_bytes());
        assert_corrupt(unwrap_header(&wrapped));
    }

    #[test]
    fn test_rejects_flipped_payload_bit() {
        let mut wrapped = wrap_with_header(b"route data").unwrap();
        let last = wrapped.len() - 1;
        wrapped[last] ^= 0x01;
        assert_corrupt(unwrap_header(&wrapped));
    }
}
