//! One module per subcommand.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod recommend;
pub mod scan;
pub mod template;
