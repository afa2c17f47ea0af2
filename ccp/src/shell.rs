//! The command loop.

use jx_abi::{Bdos, ConsoleIn, ConsoleOut, RuntimeError};
use jx_lib::{CharSink, Tokenizer, klog_debug, klog_info, klog_warn, printf, read_line};

use crate::commands::{self, Command};
use crate::config::{CMD_MAX, CcpConfig};

const TOKEN_DELIMS: &[u8] = b" \t";

/// Why [`Ccp::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// `exit` or `quit`; a warm boot was requested.
    Requested,
    /// The console stream closed.
    EndOfInput,
    /// Line input failed for another reason.
    Failed(RuntimeError),
}

/// What to do after a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Ccp<I: ConsoleIn, O: ConsoleOut, B: Bdos> {
    input: I,
    sink: CharSink<O>,
    bdos: B,
    config: CcpConfig,
}

impl<I: ConsoleIn, O: ConsoleOut, B: Bdos> Ccp<I, O, B> {
    pub fn new(input: I, output: O, bdos: B, config: CcpConfig) -> Self {
        Self {
            input,
            sink: CharSink::new(output),
            bdos,
            config,
        }
    }

    #[inline]
    pub fn sink(&mut self) -> &mut CharSink<O> {
        &mut self.sink
    }

    #[inline]
    pub fn bdos(&mut self) -> &mut B {
        &mut self.bdos
    }

    pub fn into_parts(self) -> (I, O, B) {
        (self.input, self.sink.into_inner(), self.bdos)
    }

    /// Print the banner and serve command lines until exit or end of input.
    pub fn run(&mut self) -> Exit {
        commands::banner(&mut self.sink);

        let mut line = [0u8; CMD_MAX];
        let capacity = self.config.effective_capacity();

        loop {
            self.sink.write_bytes(self.config.prompt);

            let text = match read_line(&mut self.input, &mut self.sink, &mut line[..capacity]) {
                Ok(text) => text,
                Err(RuntimeError::EndOfInput) => {
                    self.sink.newline();
                    klog_info!("ccp: console closed");
                    return Exit::EndOfInput;
                }
                Err(err) => {
                    klog_warn!("ccp: line input failed: {}", err);
                    return Exit::Failed(err);
                }
            };
            self.sink.newline();

            if self.execute(text) == Flow::Exit {
                return Exit::Requested;
            }
        }
    }

    /// Run one command line. Blank lines do nothing.
    pub fn execute(&mut self, line: &[u8]) -> Flow {
        let mut tokens = Tokenizer::new(line, TOKEN_DELIMS);
        let Some(cmd) = tokens.next() else {
            return Flow::Continue;
        };
        let arg = tokens.rest();

        match commands::lookup(cmd) {
            Some(Command::Help) => commands::help(&mut self.sink),
            Some(Command::Version) => commands::version(&mut self.sink, &mut self.bdos),
            Some(Command::Memory) => {
                commands::memory(&mut self.sink, &mut self.bdos, self.config.heap_probe)
            }
            Some(Command::Clear) => commands::clear(&mut self.sink),
            Some(Command::Exit) => {
                printf!(&mut self.sink, "Exiting JX...\n");
                klog_debug!("ccp: warm boot");
                self.bdos.reset();
                return Flow::Exit;
            }
            None => {
                if !commands::load_program(cmd, arg) {
                    printf!(&mut self.sink, "Unknown command: %s\n", cmd);
                    printf!(&mut self.sink, "Type 'help' for available commands\n");
                }
            }
        }

        self.sink.newline();
        Flow::Continue
    }
}
