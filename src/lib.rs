#[macro_use]
extern crate log;

pub mod cpu;
pub mod error;
pub mod loader;
pub mod mem;
pub mod timer;

pub use crate::cpu::CPU;
pub use crate::error::Fault;
