mod command_builder;
mod parsed_args;
mod parser;


pub(crate) use command_builder::clap_command;
pub use parsed_args::ParsedArgs;
pub use parser::parse_args;
