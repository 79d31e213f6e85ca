use crate::cpu::Registers;
use crate::error::{Fault, Result};

pub const COUNT: usize = 8;

/// Interrupt mask.
pub const IM: usize = 5;
/// Interrupt status.
pub const IS: usize = 6;
/// Stack pointer.
pub const SP: usize = 7;

pub const SP_INIT: u8 = 0xf4;

pub const E: u8 = 0b001;
pub const G: u8 = 0b010;
pub const L: u8 = 0b100;

impl Registers {
  pub fn new() -> Registers {
    let mut r = [0; COUNT];
    r[SP] = SP_INIT;
    Registers { r, pc: 0, fl: 0 }
  }

  /// Panics on an index above 7; decoded operands go through `index`.
  pub fn get(&self, i: usize) -> u8 {
    self.r[i]
  }

  pub fn set(&mut self, i: usize, value: u8) {
    self.r[i] = value;
  }

  pub fn sp(&self) -> u8 {
    self.r[SP]
  }

  pub fn e(&self) -> bool {
    //! Equal flag
    self.fl & E != 0
  }
  pub fn g(&self) -> bool {
    //! Greater-than flag
    self.fl & G != 0
  }
  pub fn l(&self) -> bool {
    //! Less-than flag
    self.fl & L != 0
  }
}

impl Default for Registers {
  fn default() -> Registers {
    Registers::new()
  }
}

/// Validate a register operand byte taken from the instruction stream.
pub fn index(operand: u8) -> Result<usize> {
  let i = usize::from(operand);
  if i < COUNT {
    Ok(i)
  } else {
    Err(Fault::InvalidRegister(operand))
  }
}
