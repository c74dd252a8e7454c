//! Program Loader.
//!
//! This module provides utilities for getting programs from disk into memory. It performs:
//! 1. **Binary images:** Reads and writes `.bin` files holding little-endian 32-bit words.
//! 2. **Source files:** Any other extension is assembled on the fly.
//! 3. **Placement:** Copies an image into memory starting at address 0.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::error::{Result, SimError};
use crate::sim::assembler::{AssembleOptions, assemble};
use crate::soc::Memory;

/// File extension of binary program images.
pub const BINARY_EXTENSION: &str = "bin";

/// Size in bytes of one encoded word.
const WORD_BYTES: usize = 4;

fn io_error(path: &Path, source: std::io::Error) -> SimError {
    SimError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Decodes a little-endian byte stream into words.
///
/// # Errors
///
/// `MemoryFault` if the length is not a whole number of words.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<i32>> {
    if bytes.len() % WORD_BYTES != 0 {
        return Err(SimError::memory(
            bytes.len() as i64,
            format!("binary image length is not a multiple of {WORD_BYTES} bytes"),
        ));
    }
    Ok(bytes
        .chunks_exact(WORD_BYTES)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Encodes words as a little-endian byte stream.
pub fn words_to_bytes(words: &[i32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Reads a program file into an image.
///
/// Files ending in `.bin` are read as binary images; anything else is
/// treated as assembly source.
///
/// # Arguments
///
/// * `path` - Program file.
/// * `options` - Assembler options for source files.
///
/// # Errors
///
/// `Io` if the file cannot be read, `ParseFault`/`DecodeFault` from the
/// assembler, `MemoryFault` for a truncated binary image.
pub fn read_program(path: &Path, options: AssembleOptions) -> Result<Vec<i32>> {
    let is_binary = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BINARY_EXTENSION));

    let image = if is_binary {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        words_from_bytes(&bytes)?
    } else {
        let source = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        assemble(&source, options)?
    };
    info!(path = %path.display(), words = image.len(), binary = is_binary, "program read");
    Ok(image)
}

/// Writes an image as a `.bin` file.
///
/// # Errors
///
/// `Io` if the file cannot be written.
pub fn write_binary(path: &Path, image: &[i32]) -> Result<()> {
    fs::write(path, words_to_bytes(image)).map_err(|e| io_error(path, e))
}

/// Reads a program file and loads it into `mem` at address 0.
///
/// # Errors
///
/// As [`read_program`], plus `MemoryFault` if the image does not fit.
pub fn load_program(path: &Path, mem: &mut Memory, options: AssembleOptions) -> Result<usize> {
    let image = read_program(path, options)?;
    mem.load_image(&image)?;
    Ok(image.len())
}
