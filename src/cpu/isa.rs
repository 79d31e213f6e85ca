//! Opcode table.
//!
//! An opcode byte reads `AABCDDDD`: `AA` is the number of operand bytes,
//! `B` marks an ALU instruction and `C` marks an instruction that moves the
//! program counter itself.

use crate::cpu::alu::AluOp;

pub const ALU_BIT: u8 = 0x20;
pub const SETS_PC_BIT: u8 = 0x10;

/// Control (non-ALU) operations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Ctl {
  Nop,
  Hlt,
  Ldi,
  Ld,
  St,
  Push,
  Pop,
  Prn,
  Pra,
  Call,
  Ret,
  Int,
  Iret,
  Jmp,
  Jeq,
  Jne,
  Jgt,
  Jlt,
  Jle,
  Jge,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Op {
  Alu(AluOp),
  Control(Ctl),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Instr {
  pub op: Op,
  /// Operand bytes following the opcode.
  pub operands: u8,
  pub sets_pc: bool,
}

const fn instr(opcode: u8, op: Op) -> Option<Instr> {
  Some(Instr {
    op,
    operands: opcode >> 6,
    sets_pc: opcode & SETS_PC_BIT != 0,
  })
}

const OPCODES: [(u8, Op); 34] = [
  (0x00, Op::Control(Ctl::Nop)),
  (0x01, Op::Control(Ctl::Hlt)),
  (0x11, Op::Control(Ctl::Ret)),
  (0x13, Op::Control(Ctl::Iret)),
  (0x45, Op::Control(Ctl::Push)),
  (0x46, Op::Control(Ctl::Pop)),
  (0x47, Op::Control(Ctl::Prn)),
  (0x48, Op::Control(Ctl::Pra)),
  (0x50, Op::Control(Ctl::Call)),
  (0x52, Op::Control(Ctl::Int)),
  (0x54, Op::Control(Ctl::Jmp)),
  (0x55, Op::Control(Ctl::Jeq)),
  (0x56, Op::Control(Ctl::Jne)),
  (0x57, Op::Control(Ctl::Jgt)),
  (0x58, Op::Control(Ctl::Jlt)),
  (0x59, Op::Control(Ctl::Jle)),
  (0x5a, Op::Control(Ctl::Jge)),
  (0x82, Op::Control(Ctl::Ldi)),
  (0x83, Op::Control(Ctl::Ld)),
  (0x84, Op::Control(Ctl::St)),
  (0x65, Op::Alu(AluOp::Inc)),
  (0x66, Op::Alu(AluOp::Dec)),
  (0x69, Op::Alu(AluOp::Not)),
  (0xa0, Op::Alu(AluOp::Add)),
  (0xa1, Op::Alu(AluOp::Sub)),
  (0xa2, Op::Alu(AluOp::Mul)),
  (0xa3, Op::Alu(AluOp::Div)),
  (0xa4, Op::Alu(AluOp::Mod)),
  (0xa7, Op::Alu(AluOp::Cmp)),
  (0xa8, Op::Alu(AluOp::And)),
  (0xaa, Op::Alu(AluOp::Or)),
  (0xab, Op::Alu(AluOp::Xor)),
  (0xac, Op::Alu(AluOp::Shl)),
  (0xad, Op::Alu(AluOp::Shr)),
];

const fn build() -> [Option<Instr>; 256] {
  let mut table = [None; 256];
  let mut i = 0;
  while i < OPCODES.len() {
    let (opcode, op) = OPCODES[i];
    table[opcode as usize] = instr(opcode, op);
    i += 1;
  }
  table
}

static TABLE: [Option<Instr>; 256] = build();

pub fn decode(opcode: u8) -> Option<Instr> {
  TABLE[usize::from(opcode)]
}

pub fn is_alu(opcode: u8) -> bool {
  opcode & ALU_BIT != 0
}
