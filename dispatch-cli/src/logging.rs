//! Log backend for the CLI binary.

use std::io::{self, Write};

use env_logger::{Builder, Target, fmt::Formatter};
use log::{Level, LevelFilter};

/// Install an stderr logger whose level follows the `-v` count.
///
/// Without `-v` the level defaults to warnings and `RUST_LOG` may refine it.
pub(crate) fn init_logger(verbosity: u8) -> io::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_filter(verbosity))
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });
    if verbosity == 0 {
        builder.parse_env("RUST_LOG");
    }

    builder.try_init().map_err(io::Error::other)
}

pub(crate) const fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
