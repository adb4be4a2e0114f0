#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `repo-slice`. It parses
//! the arguments, configures tracing from the verbosity flags and hands a
//! [`engine::SliceOptions`] to [`engine::run_slice`].
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error so the whole front-end can be driven from
//! tests. A [`clap`](https://docs.rs/clap/) command built with the builder
//! API performs the parse. Help and version output are rendered here rather
//! than by clap so their wording stays fixed.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit code `1`.
//! - Diagnostics go to the error handle as `repo-slice: error: ...` lines via
//!   [`logging::MessageSink`]. Only help, version, dry-run listings and the
//!   success line go to the output handle.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["repo-slice", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("repo-slice "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use engine::{SliceOptions, run_slice};
use logging::{Message, MessageSink, PROGRAM_NAME, Verbosity, init_tracing};

mod arguments;

use arguments::{ParsedArgs, parse_args};

/// Argument parsing exposed for integration tests.
///
/// Not part of the stable public API.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::arguments::{ParsedArgs, parse_args};
}

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Help text for the supported command-line surface.
const HELP_TEXT: &str = concat!(
    "repo-slice ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Copy the part of a source tree selected by a manifest.\n",
    "\n",
    "Usage: repo-slice --manifest <PATH> --output <DIR> [OPTIONS]\n",
    "\n",
    "Options:\n",
    "  -m, --manifest <PATH>        Manifest of '+'/'-' rules and '.' inherit directives.\n",
    "  -s, --source <DIR>           Source tree to slice (default: current directory).\n",
    "  -o, --output <DIR>           Destination directory; created when missing.\n",
    "      --remap-extensions <MAP> Rename copied files, e.g. 'go:txt,md:markdown'.\n",
    "  -n, --dry-run                List the selection without copying anything.\n",
    "  -L, --follow-symlinks        Descend into symlinked directories.\n",
    "  -v, --verbose                Increase diagnostic output (repeatable).\n",
    "  -q, --quiet                  Only report errors.\n",
    "  -h, --help                   Show this help message and exit.\n",
    "  -V, --version                Output version information and exit.\n",
    "\n",
    "Rules are evaluated in order and the first match decides; paths that no\n",
    "rule matches are left out. Set RUST_LOG to override the log filter.\n",
);

/// Renders the help text describing the supported options.
fn render_help() -> String {
    HELP_TEXT.to_string()
}

/// Renders the version banner.
fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}

/// Strips clap's own `error: ` prefix and trailing blank lines.
fn clap_error_text(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let trimmed = rendered.trim_end();
    trimmed
        .strip_prefix("error: ")
        .unwrap_or(trimmed)
        .to_owned()
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller: `0` on success and `1` on any failure, usage errors included.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut stderr_sink = MessageSink::new(stderr);
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, &mut stderr_sink),
        Err(error) => {
            let message = Message::error(clap_error_text(&error));
            if stderr_sink.write(&message).is_err() {
                let _ = writeln!(stderr_sink.get_mut(), "{error}");
            }
            1
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut MessageSink<Err>) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return write_or_fail(stdout, &render_help());
    }
    if parsed.show_version {
        return write_or_fail(stdout, &render_version());
    }

    let ParsedArgs {
        manifest: Some(manifest),
        source,
        output: Some(output),
        remap,
        dry_run,
        follow_symlinks,
        verbose,
        quiet,
        ..
    } = parsed
    else {
        let _ = stderr.write(Message::error("--manifest and --output are required"));
        return 1;
    };

    let verbosity = Verbosity::from_flags(verbose, quiet);
    init_tracing(verbosity);

    let mut options = SliceOptions::new(manifest, source, &output)
        .dry_run(dry_run)
        .follow_symlinks(follow_symlinks);
    if let Some(map) = remap {
        options = options.remap_extensions(map);
    }

    let report = match run_slice(&options, &mut *stdout) {
        Ok(report) => report,
        Err(error) => {
            if stderr.write(Message::error(error.to_string())).is_err() {
                let _ = writeln!(stderr.get_mut(), "{error}");
            }
            return 1;
        }
    };

    if verbosity.is_quiet() {
        return 0;
    }

    if report.files_selected() == 0 {
        let _ = stderr.write(Message::warning("the manifest selected no files"));
    }

    let summary = if dry_run {
        Message::info(format!(
            "Dry run: {} files selected, nothing written to {}",
            report.files_selected(),
            output.display()
        ))
    } else {
        Message::info(format!(
            "Successfully created repository slice in {}",
            output.display()
        ))
    };
    let mut stdout_sink = MessageSink::new(&mut *stdout);
    if stdout_sink.write(&summary).is_err() {
        return 1;
    }
    0
}

fn write_or_fail<W: Write>(writer: &mut W, text: &str) -> i32 {
    match writer.write_all(text.as_bytes()).and_then(|()| writer.flush()) {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
