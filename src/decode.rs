//! Streaming transcoding of the input file to UTF-8.
//!
//! Input files arrive in whatever encoding the issuing agency used, so the
//! detected encoding is applied while streaming rather than by decoding the
//! whole file in memory. Malformed sequences are replaced, never fatal.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, Encoding};

const CHUNK_LEN: usize = 8192;

/// A reader adapter that decodes an inner byte stream to UTF-8.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    chunk: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
    finished: bool,
}

impl<R: Read> DecodingReader<R> {
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder(),
            chunk: vec![0; CHUNK_LEN],
            start: 0,
            end: 0,
            eof: false,
            finished: false,
        }
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.finished || out.is_empty() {
            return Ok(0);
        }

        loop {
            if self.start == self.end && !self.eof {
                let filled = self.inner.read(&mut self.chunk)?;
                self.start = 0;
                self.end = filled;
                if filled == 0 {
                    self.eof = true;
                }
            }

            let last = self.eof && self.start == self.end;
            let (result, consumed, written, _had_errors) =
                self.decoder
                    .decode_to_utf8(&self.chunk[self.start..self.end], out, last);
            self.start += consumed;

            if last && result == CoderResult::InputEmpty {
                self.finished = true;
            }
            if written > 0 || self.finished {
                return Ok(written);
            }
            if result == CoderResult::OutputFull {
                // The caller's buffer cannot hold a single decoded scalar.
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "output buffer too small to decode",
                ));
            }
        }
    }
}
