mod compression;
pub use compression::{decompress, CopyEncoding, DecompressError, Decompressor, Operation};

mod output;
pub use output::write_output;
