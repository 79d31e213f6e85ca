#[macro_use]
extern crate log;

use std::time::Duration;

use anyhow::Context;
use clap::{App, Arg};

use ls8::loader;
use ls8::timer::Timer;
use ls8::CPU;

fn main() -> anyhow::Result<()> {
  let matches = App::new("ls8")
    .about("Runs an LS-8 program")
    .arg(
      Arg::with_name("PROGRAM")
        .help("Assembled .ls8 file")
        .required(true)
        .index(1),
    )
    .arg(
      Arg::with_name("trace")
        .long("trace")
        .help("Log the machine state before every instruction"),
    )
    .arg(
      Arg::with_name("timer-ms")
        .long("timer-ms")
        .takes_value(true)
        .default_value("1000")
        .help("Timer interrupt period in milliseconds"),
    )
    .arg(
      Arg::with_name("max-steps")
        .long("max-steps")
        .takes_value(true)
        .help("Stop after this many cycles"),
    )
    .get_matches();

  let mut logger = env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("warn"),
  );
  if matches.is_present("trace") {
    logger.filter_module("ls8", log::LevelFilter::Trace);
  }
  logger.init();

  let path = matches.value_of("PROGRAM").unwrap_or_default();
  let timer_ms: u64 = matches
    .value_of("timer-ms")
    .unwrap_or("1000")
    .parse()
    .context("--timer-ms must be a number")?;
  let max_steps = match matches.value_of("max-steps") {
    Some(n) => Some(n.parse::<u64>().context("--max-steps must be a number")?),
    None => None,
  };

  let program = loader::load_file(path)
    .with_context(|| format!("failed to load {}", path))?;

  let mut cpu = CPU::new();
  cpu.timer = Timer::new(Duration::from_millis(timer_ms));
  cpu.load(&program)?;

  let cycles = cpu
    .run_for(max_steps)
    .with_context(|| format!("machine fault\n{}", cpu.trace()))?;
  info!("ran {} cycles", cycles);
  Ok(())
}
