use std::io;

use thiserror::Error;

/// Conditions that stop the machine.
///
/// None of these are recovered from. The engine stops on the first fault
/// and leaves any state already mutated by the faulting instruction as is.
#[derive(Debug, Error)]
pub enum Fault {
  #[error("address {addr:#04x} is outside memory")]
  OutOfBounds { addr: usize },
  #[error("register index {0} is outside R0-R7")]
  InvalidRegister(u8),
  #[error("division by zero")]
  DivisionByZero,
  #[error("unsupported operation {0:#010b}")]
  UnsupportedOperation(u8),
  #[error("interrupt number {0} is outside 0-7")]
  InvalidInterrupt(u8),
  #[error("ALU operation needs a second operand")]
  MissingOperand,
  #[error("stack overflow")]
  StackOverflow,
  #[error("stack underflow")]
  StackUnderflow,
  #[error("output error: {0}")]
  Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Fault>;
