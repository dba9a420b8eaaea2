mod decompress;
pub use decompress::{decompress, DecompressError, Decompressor};

/// Which packing a copy opcode used for its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyEncoding {
    /// `10xxxxxx`: length in the low six bits, one distance byte.
    Short,
    /// `11xxxxxx`: length from the next byte, one ignored byte, one distance byte.
    Long,
}

/// A single decoded step of the opcode stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Append the next `length` input bytes verbatim.
    Literal { length: usize },
    /// Append `length` bytes starting `distance` bytes back from the end of the output.
    Copy {
        encoding: CopyEncoding,
        length: usize,
        distance: usize,
    },
}
