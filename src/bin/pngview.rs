//! Lists the chunks of a PNG file and then decodes it.
//!
//! Set `RUST_LOG=trace` to see what the decoder is doing along the way.

use anyhow::{Context, Result};
use clap::Parser;
use pngview::{
  png::{PngChunk, PngChunks, ZlibDecompressor},
  PixelBuffer,
};
use std::path::PathBuf;

/// pngview: chunk listing and decoding for 8-bit RGB PNG files
#[derive(Parser, Debug)]
#[command(name = "pngview")]
#[command(version)]
#[command(about = "Lists the chunks of a PNG and decodes the image", long_about = None)]
struct Cli {
  /// The PNG file to read
  path: PathBuf,

  /// Print this many pixels from the start of the decoded image
  #[arg(short, long, default_value = "0")]
  pixels: usize,

  /// Don't print the chunk listing
  #[arg(short, long)]
  quiet: bool,
}

fn main() {
  env_logger::init();
  let cli = Cli::parse();

  if let Err(e) = run(&cli) {
    eprintln!("Error: {e:#}");
    std::process::exit(1);
  }
}

fn run(cli: &Cli) -> Result<()> {
  let bytes =
    std::fs::read(&cli.path).with_context(|| format!("reading {}", cli.path.display()))?;
  let chunks = PngChunks::parse(&bytes).context("parsing chunks")?;

  if !cli.quiet {
    print_chunks(&chunks);
  }

  let image = PixelBuffer::try_from_png_chunks(&chunks, &mut ZlibDecompressor)
    .context("decoding image data")?;
  println!("Image: {}x{} ({} pixels)", image.width(), image.height(), image.pixels().len());
  for (i, p) in image.pixels().iter().take(cli.pixels).enumerate() {
    let x = i % image.width() as usize;
    let y = i / image.width() as usize;
    println!("({x},{y}): r={} g={} b={} a={}", p.r, p.g, p.b, p.a);
  }
  Ok(())
}

fn print_chunks(chunks: &PngChunks) {
  for (i, record) in chunks.iter().enumerate() {
    println!(
      "Chunk {i}: length {}, type {}, CRC {:08X}",
      record.declared_length(),
      record.chunk_type(),
      record.declared_crc()
    );
    match record.chunk() {
      PngChunk::IHDR(ihdr) => {
        println!("  width: {}", ihdr.width);
        println!("  height: {}", ihdr.height);
        println!("  bit depth: {}", ihdr.bit_depth);
        println!("  color type: {}", ihdr.color_type);
        println!("  compression method: {}", ihdr.compression_method);
        println!("  filter method: {}", ihdr.filter_method);
        println!("  interlace method: {}", ihdr.interlace_method);
      }
      PngChunk::tEXt(text) => {
        // Latin-1 maps directly onto the first 256 chars.
        let keyword: String = text.keyword().iter().map(|&u| u as char).collect();
        let value: String = text.text().iter().map(|&u| u as char).collect();
        println!("  {keyword}: {value}");
      }
      PngChunk::IDAT(_) => println!("  ..."),
      PngChunk::IEND => println!("  No data"),
    }
  }
}
