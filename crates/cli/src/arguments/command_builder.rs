use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use logging::PROGRAM_NAME;

/// Builds the `clap` command used for parsing.
///
/// Built-in help and version flags are disabled; both are rendered by the
/// front-end so their text stays fixed.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .short('m')
                .value_name("PATH")
                .help("Manifest of '+'/'-' rules and '.' inherit directives.")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present_any(["help", "version"]),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .value_name("DIR")
                .help("Source tree to slice.")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("DIR")
                .help("Destination directory; created when missing.")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present_any(["help", "version"]),
        )
        .arg(
            Arg::new("remap-extensions")
                .long("remap-extensions")
                .value_name("MAP")
                .help("Rename copied files through comma-separated old:new pairs.")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .help("List the selection without copying anything.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("follow-symlinks")
                .long("follow-symlinks")
                .short('L')
                .help("Descend into symlinked directories.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output.")
                .action(ArgAction::Count)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only report errors.")
                .action(ArgAction::SetTrue),
        )
}
