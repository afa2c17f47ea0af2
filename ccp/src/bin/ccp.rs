//! Hosted command processor: the console is stdin/stdout and the BDOS is
//! simulated in-process.
//!
//! `JX_LOG=<level>` routes runtime diagnostics to stderr.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use jx_abi::{Bdos, BdosConsole, BdosFunction, EOF_MARKER, HeapLayout};
use jx_ccp::{Ccp, CcpConfig, Exit};
use jx_lib::{KlogLevel, klog_attach, klog_error, klog_info, klog_set_level};

/// Top of the simulated transient program area.
const SIM_TPA_TOP: u16 = 0xE400;
/// First heap address, above a notional program image.
const SIM_HEAP_ORIGIN: u16 = 0x2000;
const SIM_MEMORY_KB: u16 = 64;
/// BDOS 2.2.
const SIM_VERSION: u16 = 0x0202;

struct HostBdos {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl HostBdos {
    fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        match self.stdin.lock().read(&mut byte) {
            Ok(1) => byte[0],
            _ => EOF_MARKER,
        }
    }
}

impl Bdos for HostBdos {
    fn call(&mut self, func: BdosFunction, arg: u16) -> u16 {
        match func {
            BdosFunction::Conin => self.read_byte() as u16,
            BdosFunction::Conout => {
                let mut out = self.stdout.lock();
                let _ = out.write_all(&[arg as u8]);
                let _ = out.flush();
                0
            }
            BdosFunction::ConstStatus => 0xFF,
            BdosFunction::Getver => SIM_VERSION,
            BdosFunction::Gettpa => SIM_TPA_TOP,
            BdosFunction::Getmem => SIM_MEMORY_KB,
            BdosFunction::Reset => {
                klog_info!("bdos: warm boot requested");
                0
            }
            other => {
                klog_info!("bdos: {} not supported", other.name());
                0
            }
        }
    }
}

fn log_to_stderr(byte: u8) {
    let _ = io::stderr().write_all(&[byte]);
}

fn init_logging() {
    let Ok(name) = std::env::var("JX_LOG") else {
        return;
    };
    if let Some(level) = KlogLevel::from_name(&name) {
        klog_set_level(level);
        klog_attach(log_to_stderr);
    }
}

fn main() -> ExitCode {
    init_logging();

    let layout = HeapLayout::new(SIM_HEAP_ORIGIN, SIM_TPA_TOP);
    let memory = Box::leak(vec![0u8; layout.capacity() as usize].into_boxed_slice());
    if let Err(err) = jx_lib::heap_init(layout, memory) {
        klog_error!("ccp: heap init failed: {}", err);
        return ExitCode::FAILURE;
    }

    // Every handle talks to the same process stdin/stdout.
    let mut ccp = Ccp::new(
        BdosConsole::new(HostBdos::new()),
        BdosConsole::new(HostBdos::new()),
        HostBdos::new(),
        CcpConfig::new(),
    );
    let exit = ccp.run();

    match exit {
        Exit::Requested | Exit::EndOfInput => ExitCode::SUCCESS,
        Exit::Failed(err) => {
            klog_error!("ccp: {}", err);
            ExitCode::FAILURE
        }
    }
}
