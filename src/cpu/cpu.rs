use std::io::{self, Write};
use std::time::Instant;

use crate::cpu::alu::AluResult;
use crate::cpu::isa::{self, Ctl, Op};
use crate::cpu::reg;
use crate::cpu::{Registers, CPU};
use crate::error::{Fault, Result};
use crate::mem::{Memory, MEM_SIZE};
use crate::timer::Timer;

/// Interrupt n's handler address is stored at `VECTOR_TABLE + n`.
pub const VECTOR_TABLE: usize = 0xf8;

/// Timer interrupt bit in the interrupt status register.
pub const TIMER_INTERRUPT: u8 = 0b0000_0001;

impl CPU<io::Stdout> {
  pub fn new() -> CPU<io::Stdout> {
    CPU::with_output(io::stdout())
  }
}

impl<W: Write> CPU<W> {
  pub fn with_output(out: W) -> CPU<W> {
    CPU {
      regs: Registers::new(),
      mem: Memory::new(),
      timer: Timer::default(),
      out,
      saved_im: None,
      running: false,
    }
  }

  pub fn output(&self) -> &W {
    &self.out
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  /// Copy a program image into memory starting at address 0.
  pub fn load(&mut self, program: &[u8]) -> Result<()> {
    debug!("loading {} bytes", program.len());
    self.mem.write(0, program)
  }

  /// Run until HLT or a fault.
  pub fn run(&mut self) -> Result<()> {
    self.run_for(None).map(|_| ())
  }

  /// Run until HLT, a fault, or `limit` cycles.
  /// Return the number of cycles executed.
  pub fn run_for(&mut self, limit: Option<u64>) -> Result<u64> {
    self.running = true;
    self.timer.reset(Instant::now());
    let mut cycles = 0;
    while self.running {
      if limit.map_or(false, |l| cycles >= l) {
        warn!("stopping after {} cycles", cycles);
        self.running = false;
        break;
      }
      self.step()?;
      cycles += 1;
    }
    Ok(cycles)
  }

  /// Run one cycle: dispatch a pending interrupt, or poll the timer and
  /// execute the instruction at the program counter.
  /// Any fault stops the machine.
  pub fn step(&mut self) -> Result<()> {
    let result = self.cycle(Instant::now());
    if result.is_err() {
      self.running = false;
    }
    result
  }

  fn cycle(&mut self, now: Instant) -> Result<()> {
    if self.check_interrupts()? {
      return Ok(());
    }

    if self.timer.poll(now) {
      let status = self.regs.get(reg::IS);
      self.regs.set(reg::IS, status | TIMER_INTERRUPT);
    }

    trace!("{}", self.trace());
    self.exec()
  }

  /// Execute the instruction at the program counter.
  fn exec(&mut self) -> Result<()> {
    let opcode = self.mem.rb(self.regs.pc)?;
    let instr =
      isa::decode(opcode).ok_or(Fault::UnsupportedOperation(opcode))?;

    match instr.op {
      Op::Alu(op) => {
        let a = self.operand_reg(1)?;
        let b = if instr.operands > 1 {
          Some(self.regs.get(self.operand_reg(2)?))
        } else {
          None
        };
        match op.apply(self.regs.get(a), b)? {
          AluResult::Value(v) => self.regs.set(a, v),
          AluResult::Flags(f) => self.regs.fl = f,
        }
      }
      Op::Control(ctl) => self.control(ctl)?,
    }

    if !instr.sets_pc {
      self.regs.pc += 1 + usize::from(instr.operands);
    }
    Ok(())
  }

  fn control(&mut self, ctl: Ctl) -> Result<()> {
    macro_rules! jump_if {
      ($cond:expr) => {{
        if $cond {
          self.regs.pc = usize::from(self.reg_a()?);
        } else {
          self.regs.pc += 2;
        }
      }};
    }

    match ctl {
      Ctl::Nop => (),
      Ctl::Hlt => {
        info!("halted at {:#04x}", self.regs.pc);
        self.running = false;
      }
      Ctl::Ldi => {
        let a = self.operand_reg(1)?;
        let value = self.operand(2)?;
        self.regs.set(a, value);
      }
      Ctl::Ld => {
        let a = self.operand_reg(1)?;
        let b = self.operand_reg(2)?;
        let value = self.mem.rb(usize::from(self.regs.get(b)))?;
        self.regs.set(a, value);
      }
      Ctl::St => {
        let a = self.operand_reg(1)?;
        let b = self.operand_reg(2)?;
        self.mem.wb(usize::from(self.regs.get(a)), self.regs.get(b))?;
      }
      Ctl::Push => {
        let value = self.reg_a()?;
        self.push(value)?;
      }
      Ctl::Pop => {
        let a = self.operand_reg(1)?;
        let value = self.pop()?;
        self.regs.set(a, value);
      }
      Ctl::Prn => {
        let value = self.reg_a()?;
        writeln!(self.out, "{}", value)?;
      }
      Ctl::Pra => {
        let value = self.reg_a()?;
        write!(self.out, "{}", value as char)?;
        self.out.flush()?;
      }
      Ctl::Call => {
        let target = self.reg_a()?;
        let ret = self.pc_byte(self.regs.pc + 2)?;
        self.push(ret)?;
        self.regs.pc = usize::from(target);
      }
      Ctl::Ret => {
        self.regs.pc = usize::from(self.pop()?);
      }
      Ctl::Int => {
        let n = self.reg_a()?;
        let bit = 1u8
          .checked_shl(u32::from(n))
          .ok_or(Fault::InvalidInterrupt(n))?;
        let status = self.regs.get(reg::IS);
        self.regs.set(reg::IS, status | bit);
        self.regs.pc += 2;
      }
      Ctl::Iret => self.iret()?,
      Ctl::Jmp => jump_if!(true),
      Ctl::Jeq => jump_if!(self.regs.e()),
      Ctl::Jne => jump_if!(!self.regs.e()),
      Ctl::Jgt => jump_if!(self.regs.g()),
      Ctl::Jlt => jump_if!(self.regs.l()),
      Ctl::Jle => jump_if!(self.regs.l() || self.regs.e()),
      Ctl::Jge => jump_if!(self.regs.g() || self.regs.e()),
    }
    Ok(())
  }

  /// Dispatch the lowest pending interrupt, if any.
  /// Return true if control was transferred to a handler.
  fn check_interrupts(&mut self) -> Result<bool> {
    if self.saved_im.is_some() {
      return Ok(false);
    }
    let pending = self.regs.get(reg::IM) & self.regs.get(reg::IS);
    if pending == 0 {
      return Ok(false);
    }

    let n = pending.trailing_zeros() as usize;
    info!(
      "INTERRUPT {} im=0b{:08b} is=0b{:08b}",
      n,
      self.regs.get(reg::IM),
      self.regs.get(reg::IS)
    );

    self.saved_im = Some(self.regs.get(reg::IM));
    self.regs.set(reg::IM, 0);
    let status = self.regs.get(reg::IS);
    self.regs.set(reg::IS, status & !(1 << n));

    let ret = self.pc_byte(self.regs.pc)?;
    self.push(ret)?;
    self.push(self.regs.fl)?;
    for i in 0..reg::SP {
      self.push(self.regs.get(i))?;
    }

    self.regs.pc = usize::from(self.mem.rb(VECTOR_TABLE + n)?);
    Ok(true)
  }

  fn iret(&mut self) -> Result<()> {
    for i in (0..reg::SP).rev() {
      let value = self.pop()?;
      self.regs.set(i, value);
    }
    self.regs.fl = self.pop()?;
    self.regs.pc = usize::from(self.pop()?);

    match self.saved_im.take() {
      Some(im) => {
        debug!("interrupt return to {:#04x}", self.regs.pc);
        self.regs.set(reg::IM, im);
      }
      None => warn!("IRET at {:#04x} with no interrupt taken", self.regs.pc),
    }
    Ok(())
  }

  fn push(&mut self, value: u8) -> Result<()> {
    let sp = self.regs.sp().checked_sub(1).ok_or(Fault::StackOverflow)?;
    self.regs.set(reg::SP, sp);
    self.mem.wb(usize::from(sp), value)
  }

  fn pop(&mut self) -> Result<u8> {
    let sp = self.regs.sp();
    let value = self.mem.rb(usize::from(sp))?;
    let next = sp.checked_add(1).ok_or(Fault::StackUnderflow)?;
    self.regs.set(reg::SP, next);
    Ok(value)
  }

  /// The byte `offset` past the opcode.
  fn operand(&self, offset: usize) -> Result<u8> {
    self.mem.rb(self.regs.pc + offset)
  }

  fn operand_reg(&self, offset: usize) -> Result<usize> {
    reg::index(self.operand(offset)?)
  }

  /// Value of the register named by the first operand.
  fn reg_a(&self) -> Result<u8> {
    Ok(self.regs.get(self.operand_reg(1)?))
  }

  /// An address to be pushed; it must still fit in memory.
  fn pc_byte(&self, addr: usize) -> Result<u8> {
    if addr < MEM_SIZE {
      Ok(addr as u8)
    } else {
      Err(Fault::OutOfBounds { addr })
    }
  }

  /// PC, the next three bytes and all registers.
  pub fn trace(&self) -> String {
    let byte = |addr: usize| match self.mem.rb(addr) {
      Ok(b) => format!("{:02X}", b),
      Err(_) => "--".to_string(),
    };
    let mut line = format!(
      "TRACE: {:02X} | {} {} {} |",
      self.regs.pc,
      byte(self.regs.pc),
      byte(self.regs.pc + 1),
      byte(self.regs.pc + 2)
    );
    for i in 0..reg::COUNT {
      line.push_str(&format!(" {:02X}", self.regs.get(i)));
    }
    line
  }
}
