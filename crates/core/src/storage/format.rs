use crate::errors::CoreError;

/// Magic bytes identifying a store snapshot.
pub const MAGIC: &[u8; 4] = b"FNTK";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + payload_len(8)
pub const HEADER_SIZE: usize = 14;

/// Header read from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub payload_len: u64,
}

/// Frame a payload.
///
/// Layout:
/// ```text
/// [FNTK: 4B] [version: 2B LE] [payload_len: 8B LE] [payload: variable]
/// ```
pub fn write_snapshot(version: u16, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Parse the header and return it together with the payload slice.
pub fn read_snapshot(data: &[u8]) -> Result<(SnapshotHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a snapshot".into(),
        ));
    }
    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes, not a snapshot file".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let payload_len = u64::from_le_bytes(
        data[6..HEADER_SIZE]
            .try_into()
            .map_err(|_| CoreError::InvalidFileFormat("Failed to read payload length".into()))?,
    );

    let actual = (data.len() - HEADER_SIZE) as u64;
    if actual != payload_len {
        return Err(CoreError::InvalidFileFormat(format!(
            "Payload length mismatch: header says {payload_len} bytes, found {actual}"
        )));
    }

    Ok((
        SnapshotHeader {
            version,
            payload_len,
        },
        &data[HEADER_SIZE..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_prepended() {
        let bytes = write_snapshot(CURRENT_VERSION, b"abc");
        assert_eq!(&bytes[0..4], MAGIC);
        assert_eq!(bytes.len(), HEADER_SIZE + 3);
        let (header, payload) = read_snapshot(&bytes).unwrap();
        assert_eq!(header.payload_len, 3);
        assert_eq!(payload, b"abc");
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = write_snapshot(CURRENT_VERSION, b"abc");
        bytes.push(0);
        assert!(matches!(
            read_snapshot(&bytes),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let bytes = write_snapshot(CURRENT_VERSION + 1, b"");
        assert!(matches!(
            read_snapshot(&bytes),
            Err(CoreError::UnsupportedVersion(v)) if v == CURRENT_VERSION + 1
        ));
    }
}
