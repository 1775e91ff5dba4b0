//! Binary detection and decoding utilities.

use memchr::memchr;

use crate::error::IoError;

/// Number of leading bytes inspected for NULL bytes.
const BINARY_SNIFF_LEN: usize = 8192;

/// Quick binary detection - checks the first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_SNIFF_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a String.
///
/// Unlike a lossy decode, invalid UTF-8 is rejected: the decoded text is
/// later written back over the original file.
///
/// # Errors
/// `IoError::BinaryFile` for binary content, `IoError::Encoding` for invalid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }
    String::from_utf8(buffer).map_err(|_| IoError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_byte_past_sniff_window_is_text() {
        let mut buffer = vec![b'a'; BINARY_SNIFF_LEN];
        buffer.push(0);
        assert!(!is_binary(&buffer));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let result = decode_buffer(vec![b'o', b'k', 0xff, 0xfe]);
        assert!(matches!(result, Err(IoError::Encoding)));
    }
}
