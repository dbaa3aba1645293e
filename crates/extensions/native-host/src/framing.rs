//! Length-prefixed JSON frames.

use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tokio_util::codec::{Decoder, Encoder, LengthDelimitedCodec};

use crate::error::FramingError;

pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

const LENGTH_FIELD_BYTES: usize = 4;

/// Decodes frames to raw payloads and encodes any `Serialize` value as a frame.
///
/// Payloads are left undecoded so one bad JSON frame does not end the stream.
#[derive(Debug)]
pub struct NativeMessageCodec {
    inner: LengthDelimitedCodec,
    max_frame_length: usize,
}

impl NativeMessageCodec {
    pub fn new(max_frame_length: usize) -> Self {
        let inner = LengthDelimitedCodec::builder()
            .length_field_length(LENGTH_FIELD_BYTES)
            .native_endian()
            .max_frame_length(max_frame_length)
            .new_codec();
        Self {
            inner,
            max_frame_length,
        }
    }

    pub fn max_frame_length(&self) -> usize {
        self.max_frame_length
    }

    fn check_size(&self, size: usize) -> Result<(), FramingError> {
        if size > self.max_frame_length {
            return Err(FramingError::FrameTooLarge {
                size,
                max: self.max_frame_length,
            });
        }
        Ok(())
    }
}

impl Default for NativeMessageCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_BYTES)
    }
}

impl Decoder for NativeMessageCodec {
    type Item = Bytes;
    type Error = FramingError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, FramingError> {
        if src.len() >= LENGTH_FIELD_BYTES {
            let mut header = [0u8; LENGTH_FIELD_BYTES];
            header.copy_from_slice(&src[..LENGTH_FIELD_BYTES]);
            self.check_size(u32::from_ne_bytes(header) as usize)?;
        }
        Ok(self.inner.decode(src)?.map(BytesMut::freeze))
    }
}

impl<T: Serialize> Encoder<T> for NativeMessageCodec {
    type Error = FramingError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), FramingError> {
        let payload = serde_json::to_vec(&item)?;
        self.check_size(payload.len())?;
        self.inner.encode(Bytes::from(payload), dst)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "framing_tests.rs"]
mod tests;
