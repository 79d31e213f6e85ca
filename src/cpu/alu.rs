use crate::cpu::reg;
use crate::error::{Fault, Result};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AluOp {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  Inc,
  Dec,
  Cmp,
  And,
  Not,
  Or,
  Xor,
  Shl,
  Shr,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AluResult {
  /// Written back to the first operand register.
  Value(u8),
  /// Written to the flag register.
  Flags(u8),
}

impl AluOp {
  /// Apply the operation to `a` and, for two-operand operations, `b`.
  /// Results wrap to 8 bits.
  pub fn apply(self, a: u8, b: Option<u8>) -> Result<AluResult> {
    let rhs = || b.ok_or(Fault::MissingOperand);
    let value = match self {
      AluOp::Add => a.wrapping_add(rhs()?),
      AluOp::Sub => a.wrapping_sub(rhs()?),
      AluOp::Mul => a.wrapping_mul(rhs()?),
      AluOp::Div => a.checked_div(rhs()?).ok_or(Fault::DivisionByZero)?,
      AluOp::Mod => a.checked_rem(rhs()?).ok_or(Fault::DivisionByZero)?,
      AluOp::Inc => a.wrapping_add(1),
      AluOp::Dec => a.wrapping_sub(1),
      AluOp::And => a & rhs()?,
      AluOp::Not => !a,
      AluOp::Or => a | rhs()?,
      AluOp::Xor => a ^ rhs()?,
      AluOp::Shl => a.checked_shl(u32::from(rhs()?)).unwrap_or(0),
      AluOp::Shr => a.checked_shr(u32::from(rhs()?)).unwrap_or(0),
      AluOp::Cmp => return Ok(AluResult::Flags(compare(a, rhs()?))),
    };
    Ok(AluResult::Value(value))
  }
}

fn compare(a: u8, b: u8) -> u8 {
  if a == b {
    reg::E
  } else if a > b {
    reg::G
  } else {
    reg::L
  }
}
