mod alu;
mod cpu;
pub mod isa;
pub mod reg;

use std::io::Write;

use crate::mem::Memory;
use crate::timer::Timer;

pub use self::alu::{AluOp, AluResult};
pub use self::cpu::{TIMER_INTERRUPT, VECTOR_TABLE};
pub use self::isa::{Ctl, Op};

pub struct CPU<W: Write> {
  pub regs: Registers,
  pub mem: Memory,
  pub timer: Timer,

  /// Observation output for PRN and PRA.
  out: W,

  /// Interrupt mask saved while an interrupt is being handled.
  saved_im: Option<u8>,

  running: bool,
}


#[derive(Debug, Eq, PartialEq)]
pub struct Registers {
  /// General-purpose registers. R5-R7 are reserved, see `reg`.
  r: [u8; reg::COUNT],

  /// Program counter.
  pub pc: usize,

  /// Flag register.
  pub fl: u8,
}
