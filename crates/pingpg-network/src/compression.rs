//! snappy 압축 어댑터.
//!
//! `Compressor` 포트 구현. remote-write 는 프레이밍 없는 snappy block 포맷만 허용한다.

use pingpg_core::error::CoreError;
use pingpg_core::ports::compressor::Compressor;

/// snappy block 압축기
#[derive(Debug, Default, Clone, Copy)]
pub struct SnappyCompressor;

impl SnappyCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for SnappyCompressor {
    fn content_encoding(&self) -> &'static str {
        "snappy"
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CoreError> {
        snap::raw::Encoder::new()
            .compress_vec(data)
            .map_err(|e| CoreError::Internal(format!("snappy 압축 실패: {e}")))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CoreError> {
        snap::raw::Decoder::new()
            .decompress_vec(data)
            .map_err(|e| CoreError::Internal(format!("snappy 해제 실패: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_format_has_no_stream_header() {
        let compressed = SnappyCompressor::new().compress(b"pingpg").unwrap();
        // block 포맷은 원본 길이 varint로 시작 (스트림 포맷은 0xff 청크)
        assert_eq!(compressed[0], 6);
        assert_ne!(compressed[0], 0xff);
    }

    #[test]
    fn compress_then_decompress() {
        let c = SnappyCompressor::new();
        let data: Vec<u8> = b"min_rtt_ns client_id abc ".repeat(40);
        let compressed = c.compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(c.decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn decompress_garbage_fails() {
        assert!(SnappyCompressor::new().decompress(&[0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn content_encoding_is_snappy() {
        assert_eq!(SnappyCompressor::new().content_encoding(), "snappy");
    }
}
