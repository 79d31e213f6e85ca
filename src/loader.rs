//! Reads assembled `.ls8` programs.
//!
//! One byte per line as eight binary digits. Everything after `#` is a
//! comment, and lines that do not start with a binary digit are skipped.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::mem::MEM_SIZE;

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("cannot read program: {0}")]
  Io(#[from] io::Error),
  #[error("line {line}: {text:?} is not a binary byte")]
  InvalidByte { line: usize, text: String },
  #[error("program is {len} bytes, memory holds {}", MEM_SIZE)]
  TooLarge { len: usize },
}

pub fn parse(source: &str) -> Result<Vec<u8>, LoadError> {
  let mut program = Vec::new();
  for (i, line) in source.lines().enumerate() {
    if !line.starts_with(|c: char| c == '0' || c == '1') {
      continue;
    }
    let text = line.split('#').next().unwrap_or("").trim();
    let byte = u8::from_str_radix(text, 2).map_err(|_| LoadError::InvalidByte {
      line: i + 1,
      text: text.to_string(),
    })?;
    program.push(byte);
  }

  if program.len() > MEM_SIZE {
    return Err(LoadError::TooLarge { len: program.len() });
  }
  Ok(program)
}

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
  let source = fs::read_to_string(path)?;
  parse(&source)
}
