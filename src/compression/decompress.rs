use super::{CopyEncoding, Operation};
use std::io::{self, Read};
use thiserror::Error;

/// Longest run a single literal opcode can carry.
const MAX_LITERAL: usize = 0x80;

#[derive(Debug)]
pub struct Decompressor<R> {
    src: R,
    dst: Vec<u8>,

    /// bytes consumed from `src` so far
    bytes_read: usize,
}

#[derive(Error, Debug)]
pub enum DecompressError {
    #[error("Input ended in the middle of an operation")]
    TruncatedInput,
    #[error("Copy distance {distance} exceeds the {available} bytes decoded so far")]
    InvalidDistance { distance: usize, available: usize },
    #[error("Failed to read input")]
    Io(#[from] io::Error),
}

impl Operation {
    fn decode<R: Read>(
        op: u8,
        decompressor: &mut Decompressor<R>,
    ) -> Result<Self, DecompressError> {
        let operation = match op {
            n @ 0x00..0x80 => Self::Literal {
                length: usize::from(n) + 1,
            },
            n @ 0x80..0xc0 => Self::decode_copy_short(n, decompressor)?,
            n @ 0xc0..=0xff => Self::decode_copy_long(n, decompressor)?,
        };

        Ok(operation)
    }

    fn decode_copy_short<R: Read>(
        op: u8,
        decompressor: &mut Decompressor<R>,
    ) -> Result<Self, DecompressError> {
        let length = usize::from(op & 0x3f) + 4;
        let distance = usize::from(decompressor.read()?) + 1;

        Ok(Self::Copy {
            encoding: CopyEncoding::Short,
            length,
            distance,
        })
    }

    fn decode_copy_long<R: Read>(
        op: u8,
        decompressor: &mut Decompressor<R>,
    ) -> Result<Self, DecompressError> {
        // second byte only keeps the stream aligned, it never contributes to the length
        let [extra, _] = decompressor.read_array::<2>()?;
        let length = usize::from(extra | (op & 0x3f));
        let distance = usize::from(decompressor.read()?) + 1;

        Ok(Self::Copy {
            encoding: CopyEncoding::Long,
            length,
            distance,
        })
    }
}

impl<R: Read> Decompressor<R> {
    pub fn new(src: R) -> Self {
        Self {
            src,
            dst: Vec::new(),
            bytes_read: 0,
        }
    }

    /// Number of input bytes consumed so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Decode the whole stream. Running out of input between two operations ends the
    /// decode normally, running out inside one is an error.
    pub fn decompress(mut self) -> Result<Vec<u8>, DecompressError> {
        let mut operations = 0usize;

        while let Some(value) = self.read_opcode()? {
            let operation = Operation::decode(value, &mut self)?;
            log::trace!("operation: {:?}", operation);

            match operation {
                Operation::Literal { length } => self.copy_literal(length)?,
                Operation::Copy {
                    length, distance, ..
                } => self.copy_backread(length, distance)?,
            }

            operations += 1;
        }

        log::debug!(
            "decoded {} operations from {} bytes into {} bytes",
            operations,
            self.bytes_read,
            self.dst.len()
        );

        Ok(self.dst)
    }

    fn read_opcode(&mut self) -> Result<Option<u8>, DecompressError> {
        let mut buf = [0u8; 1];

        loop {
            match self.src.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read(&mut self) -> Result<u8, DecompressError> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecompressError> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecompressError> {
        self.src.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => DecompressError::TruncatedInput,
            _ => DecompressError::Io(e),
        })?;
        self.bytes_read += buf.len();

        Ok(())
    }

    fn copy_literal(&mut self, length: usize) -> Result<(), DecompressError> {
        debug_assert!(length <= MAX_LITERAL);

        let mut buf = [0u8; MAX_LITERAL];
        self.read_exact(&mut buf[..length])?;
        self.dst.extend_from_slice(&buf[..length]);

        Ok(())
    }

    fn copy_backread(&mut self, length: usize, distance: usize) -> Result<(), DecompressError> {
        if distance == 0 || distance > self.dst.len() {
            return Err(DecompressError::InvalidDistance {
                distance,
                available: self.dst.len(),
            });
        }

        // byte by byte: when distance < length the run reads what it just wrote
        let start = self.dst.len() - distance;
        self.dst.reserve(length);
        for i in start..start + length {
            self.dst.push(self.dst[i]);
        }

        Ok(())
    }
}

/// Decode an entire opcode stream read from `src`.
pub fn decompress<R: Read>(src: R) -> Result<Vec<u8>, DecompressError> {
    Decompressor::new(src).decompress()
}
