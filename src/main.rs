use anyhow::Context;
use clap::Parser;
use std::{fs::File, io::BufReader, path::PathBuf};

/// Decode an LZ opcode stream back into the original bytes
#[derive(Parser, Debug)]
struct Arguments {
    /// The encoded input file
    input: PathBuf,

    /// Where to write the decoded data
    output: PathBuf,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    colog::init();

    if !args.force && args.output.exists() {
        anyhow::bail!(
            "Output file {} already exists, use --force to overwrite it",
            args.output.display()
        );
    }

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input file {}", args.input.display()))?;
    let input_len = input.metadata().map(|meta| meta.len()).unwrap_or_default();
    log::info!("Decoding {} ({} bytes)", args.input.display(), input_len);

    // decode fully before touching the output so a bad stream leaves nothing behind
    let decoded = lzcopy::decompress(BufReader::new(input))
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    lzcopy::write_output(&args.output, &decoded)
        .with_context(|| format!("Failed to write output file {}", args.output.display()))?;

    log::info!(
        "Wrote {} bytes to {} with CRC: {:#010x}",
        decoded.len(),
        args.output.display(),
        crc32fast::hash(&decoded)
    );

    Ok(())
}
