use crate::error::{Fault, Result};

pub const MEM_SIZE: usize = 0x100;

#[derive(Debug)]
pub struct Memory {
  ram: [u8; MEM_SIZE],
}

impl Memory {
  pub fn new() -> Memory {
    Memory { ram: [0; MEM_SIZE] }
  }

  /// Read a byte at address `addr`.
  pub fn rb(&self, addr: usize) -> Result<u8> {
    self.ram.get(addr).copied().ok_or(Fault::OutOfBounds { addr })
  }

  /// Write `value` at address `addr`.
  pub fn wb(&mut self, addr: usize, value: u8) -> Result<()> {
    match self.ram.get_mut(addr) {
      Some(slot) => {
        *slot = value;
        Ok(())
      }
      None => Err(Fault::OutOfBounds { addr }),
    }
  }

  /// Write an arbitrary number of bytes to memory.
  /// Bytes before the first out-of-range address are kept.
  pub fn write(&mut self, addr: usize, values: &[u8]) -> Result<()> {
    for (i, v) in values.iter().enumerate() {
      self.wb(addr + i, *v)?;
    }
    Ok(())
  }
}

impl Default for Memory {
  fn default() -> Memory {
    Memory::new()
  }
}
