use std::ffi::OsString;
use std::path::PathBuf;

use logging::PROGRAM_NAME;

use super::{ParsedArgs, clap_command};

/// Parses command-line arguments into a [`ParsedArgs`] structure.
///
/// An empty iterator is treated as a bare program name.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        manifest: matches.remove_one::<PathBuf>("manifest"),
        source: matches
            .remove_one::<PathBuf>("source")
            .unwrap_or_else(|| PathBuf::from(".")),
        output: matches.remove_one::<PathBuf>("output"),
        remap: matches.remove_one::<String>("remap-extensions"),
        dry_run: matches.get_flag("dry-run"),
        follow_symlinks: matches.get_flag("follow-symlinks"),
        verbose: matches.get_count("verbose"),
        quiet: matches.get_flag("quiet"),
    })
}
