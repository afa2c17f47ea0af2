//! Built-in commands.

use jx_abi::{Bdos, ConsoleOut, MemoryMap, TPA_BASE};
use jx_lib::{CharSink, printf};

use crate::config::HeapProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Memory,
    Clear,
    Exit,
}

pub struct BuiltinEntry {
    pub names: &'static [&'static [u8]],
    pub desc: &'static [u8],
    pub command: Command,
}

pub static BUILTINS: &[BuiltinEntry] = &[
    BuiltinEntry {
        names: &[b"help", b"?"],
        desc: b"Show this help message",
        command: Command::Help,
    },
    BuiltinEntry {
        names: &[b"ver", b"version"],
        desc: b"Show system version",
        command: Command::Version,
    },
    BuiltinEntry {
        names: &[b"mem", b"memory"],
        desc: b"Show memory information",
        command: Command::Memory,
    },
    BuiltinEntry {
        names: &[b"cls", b"clear"],
        desc: b"Clear screen",
        command: Command::Clear,
    },
    BuiltinEntry {
        names: &[b"exit", b"quit"],
        desc: b"Exit to system",
        command: Command::Exit,
    },
];

/// Column where the help descriptions start.
const HELP_COLUMN: usize = 14;

const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

/// Find a built-in by exact, case-sensitive name.
pub fn lookup(name: &[u8]) -> Option<Command> {
    BUILTINS
        .iter()
        .find(|entry| entry.names.iter().any(|&n| n == name))
        .map(|entry| entry.command)
}

pub fn banner<O: ConsoleOut>(sink: &mut CharSink<O>) {
    printf!(sink, "\n");
    printf!(sink, "========================================\n");
    printf!(sink, "  JX Operating System\n");
    printf!(sink, "  Console Command Processor v1.0\n");
    printf!(sink, "========================================\n");
    printf!(sink, "\n");
    printf!(sink, "Type 'help' for available commands\n");
    printf!(sink, "\n");
}

pub fn help<O: ConsoleOut>(sink: &mut CharSink<O>) {
    printf!(sink, "Available commands:\n");
    for entry in BUILTINS {
        let mut column = 2;
        sink.write_bytes(b"  ");
        for (i, name) in entry.names.iter().enumerate() {
            if i > 0 {
                column += sink.write_bytes(b", ");
            }
            column += sink.write_bytes(name);
        }
        while column < HELP_COLUMN {
            sink.emit(b' ');
            column += 1;
        }
        printf!(sink, "  %s\n", entry.desc);
    }
    printf!(sink, "\n");
    printf!(sink, "Built-in commands are case-sensitive.\n");
}

pub fn version<O: ConsoleOut, B: Bdos>(sink: &mut CharSink<O>, bdos: &mut B) {
    printf!(sink, "JX Operating System\n");
    printf!(sink, "  CCP Version:  1.0\n");

    let ver = bdos.version();
    if ver != 0 {
        printf!(sink, "  BDOS Version: %u.%u\n", (ver >> 8) & 0xFF, ver & 0xFF);
    }

    printf!(sink, "  Architecture: Intel 8080\n");
}

pub fn memory<O: ConsoleOut, B: Bdos>(sink: &mut CharSink<O>, bdos: &mut B, probe: HeapProbe) {
    let map = MemoryMap::new(bdos.tpa_top());
    let total_kb = bdos.memory_kb();
    let tpa_size = map.tpa_size();

    printf!(sink, "Memory Layout:\n");
    printf!(sink, "  Total Memory:  %u KB\n", total_kb);
    printf!(sink, "\n");
    printf!(
        sink,
        "  TPA:   0x%x - 0x%x  (%u bytes, %u KB)\n",
        TPA_BASE,
        map.tpa_top,
        tpa_size,
        tpa_size / 1024
    );
    printf!(sink, "  BDOS:  0x%x - 0x%x\n", map.bdos_start(), map.bdos_end());
    printf!(sink, "  BIOS:  0x%x - 0xffff\n", map.bios_start());
    printf!(sink, "\n");

    let (used, available) = probe().map_or((0, 0), |s| (s.used(), s.available()));
    printf!(sink, "Heap Status:\n");
    printf!(sink, "  Used:      %u bytes\n", used);
    printf!(sink, "  Available: %u bytes\n", available);
}

pub fn clear<O: ConsoleOut>(sink: &mut CharSink<O>) {
    sink.write_bytes(CLEAR_SCREEN);
}

/// Load and run an external program. There is no disk I/O yet, so nothing is
/// ever found.
pub fn load_program(_name: &[u8], _args: Option<&[u8]>) -> bool {
    false
}
