//! Runtime for the pipwright helper binary.
//!
//! The helper handles exactly one invocation per process: it reads a JSON
//! request from standard input, dispatches it to the parser or hasher
//! operation it names, prints the result to standard output, and exits.
//! Standard output carries nothing but operation results; all diagnostics go
//! to standard error.
//!
//! ## Protocol
//!
//! The request is a single JSON object:
//!
//! ```json
//! {"function": "parse_requirements", "args": ["requirements.txt"]}
//! ```
//!
//! Parse operations print a compact JSON array of dependency records; hash
//! operations print a bare hex digest. An unrecognised `function` is a
//! silent no-op with exit status 0. Request and operation errors exit with
//! status 1, infrastructure failures with status 2.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use pipwright_config::{Config, LogFormat, Overrides};

mod dispatch;
pub mod telemetry;

pub use dispatch::{
    DispatchError, InvocationRequest, Operation, OperationOutput, OutputWriter, Router,
};
use dispatch::DISPATCH_TARGET;

/// Maximum size of a request payload in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;

/// Command-line interface for the pipwright helper.
///
/// The helper takes no positional arguments; the request arrives on standard
/// input. The flags only tune diagnostics.
#[derive(Parser, Debug)]
#[command(name = "pipwright", disable_help_subcommand = true)]
struct Cli {
    /// Overrides the tracing filter expression.
    #[arg(long, value_name = "EXPR")]
    log_filter: Option<String>,
    /// Overrides the log output format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

/// Runs the helper using the provided arguments and stream handles.
#[must_use]
pub fn run<I, R, W, E>(args: I, input: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            return ExitCode::FAILURE;
        }
    };

    let overrides = Overrides {
        log_filter: cli.log_filter,
        log_format: cli.log_format,
    };
    let config = match Config::load_with_overrides(&overrides) {
        Ok(config) => config,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(error) = telemetry::initialise(&config) {
        let _ = writeln!(stderr, "{error}");
        return ExitCode::FAILURE;
    }

    match execute(input, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "error: {error}");
            exit_code_from_status(error.exit_status())
        }
    }
}

/// Reads, dispatches, and prints a single invocation request.
fn execute<R, W>(input: &mut R, stdout: &mut W) -> Result<(), DispatchError>
where
    R: Read,
    W: Write,
{
    let payload = read_request(input)?;
    let request = InvocationRequest::parse(&payload)?;
    let router = Router::new();
    match router.dispatch(&request)? {
        Some(output) => OutputWriter::new(stdout).write_output(&output),
        None => {
            debug!(
                target: DISPATCH_TARGET,
                function = request.function(),
                "no output for unrecognised function"
            );
            Ok(())
        }
    }
}

/// Reads the request payload, enforcing the size cap before parsing.
fn read_request<R: Read>(input: &mut R) -> Result<Vec<u8>, DispatchError> {
    let mut payload = Vec::new();
    let limit = (MAX_REQUEST_BYTES as u64).saturating_add(1);
    input.take(limit).read_to_end(&mut payload)?;
    if payload.len() > MAX_REQUEST_BYTES {
        return Err(DispatchError::request_too_large(
            payload.len(),
            MAX_REQUEST_BYTES,
        ));
    }
    Ok(payload)
}

fn exit_code_from_status(status: i32) -> ExitCode {
    if (0..=255).contains(&status) {
        ExitCode::from(status as u8)
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests;
