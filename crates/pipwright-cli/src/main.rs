//! Entrypoint for the pipwright helper binary.
//!
//! The binary delegates to [`pipwright_cli::run`], which loads configuration,
//! installs telemetry, reads the invocation request from standard input, and
//! dispatches it. Stream handles are passed in so the runtime is fully
//! exercisable from tests.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    pipwright_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
