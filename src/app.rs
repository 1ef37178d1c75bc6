//! Command cycles for the host binary.

use std::io::{BufRead, Write};

use log::{error, info, warn};
use selector_core::{
    strip_line_ending, tokens, ChannelTargets, CommandError, LineError, RoutingController,
    SelectorDriver, Token,
};

use crate::cli::Cli;
use crate::error::RunError;
use crate::report::{self, TokenLine};

/// Every command was well-formed.
pub const EXIT_OK: u8 = 0;

/// A command was rejected as a whole, or the hardware description is wrong.
pub const EXIT_FAILURE: u8 = 1;

/// Run the CLI against `driver` and return the process exit code.
///
/// Per-token lines and usage messages go to `out`; fatal errors go to `err`.
/// `input` is only read in `--stdin` mode.
pub fn run<D, R, W, E>(
    cli: &Cli,
    program: &str,
    driver: D,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<u8, RunError>
where
    D: SelectorDriver,
    R: BufRead,
    W: Write,
    E: Write,
{
    let config = cli.latch_config()?;

    if cli.stdin {
        let mut controller = RoutingController::new(driver, config);
        return run_lines(cli, &mut controller, input, out, err);
    }

    let Some(command) = cli.command.as_deref() else {
        writeln!(out, "{}", report::usage(program))?;
        return Ok(EXIT_FAILURE);
    };

    let decoded = match decode_unbounded(command) {
        Ok(decoded) => decoded,
        Err(e) => {
            writeln!(out, "{}", report::rejection(&e))?;
            return Ok(EXIT_FAILURE);
        }
    };
    write_tokens(&decoded, out)?;

    let mut controller = RoutingController::new(driver, config);
    run_cycle(cli, &mut controller, &decoded, out, err)
}

/// Every token of `command`, with no length limit.
///
/// The host has no fixed receive buffer, so it walks the lazy token iterator
/// instead of the bounded `decode` the firmware uses.
fn decode_unbounded(command: &str) -> Result<Vec<Token>, CommandError> {
    Ok(tokens(command)?.collect())
}

/// One command per line until end of input. A rejected line is reported and skipped.
fn run_lines<D, R, W, E>(
    cli: &Cli,
    controller: &mut RoutingController<D>,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<u8, RunError>
where
    D: SelectorDriver,
    R: BufRead,
    W: Write,
    E: Write,
{
    for raw in input.split(b'\n') {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            warn!("rejected line of {} bytes: not UTF-8", raw.len());
            writeln!(out, "{}", LineError::Encoding)?;
            continue;
        };
        let command = strip_line_ending(line);
        if command.is_empty() {
            continue;
        }

        let decoded = match decode_unbounded(command) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("rejected {command:?}: {e}");
                writeln!(out, "{}", report::rejection(&e))?;
                continue;
            }
        };
        write_tokens(&decoded, out)?;

        let code = run_cycle(cli, controller, &decoded, out, err)?;
        if code != EXIT_OK {
            return Ok(code);
        }
        out.flush()?;
    }
    Ok(EXIT_OK)
}

fn run_cycle<D, W, E>(
    cli: &Cli,
    controller: &mut RoutingController<D>,
    decoded: &[Token],
    out: &mut W,
    err: &mut E,
) -> Result<u8, RunError>
where
    D: SelectorDriver,
    W: Write,
    E: Write,
{
    let targets: ChannelTargets = decoded.iter().filter_map(|token| token.ok()).collect();
    match controller.apply_targets(&targets) {
        Ok(latched) => info!(
            "{} channels latched across {} groups",
            latched.channels,
            latched.groups.len()
        ),
        Err(e) => {
            error!("sequencing aborted: {e}");
            writeln!(err, "error: {e}")?;
            return Ok(EXIT_FAILURE);
        }
    }

    if cli.status {
        for line in report::status_lines(controller.state()) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(EXIT_OK)
}

fn write_tokens<W: Write>(decoded: &[Token], out: &mut W) -> Result<(), RunError> {
    for token in decoded {
        writeln!(out, "{}", TokenLine(token))?;
    }
    Ok(())
}
