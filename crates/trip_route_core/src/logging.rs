use std::{fs::File, io::Write};

use env_logger::{Builder, Target, fmt::Formatter};
use log::Level;

use crate::options::{LogFormat, RouteOptions};
use crate::{Error, Result};

const APP_NAME: &str = "trip-route";

/// Installs the global `env_logger` backend described by `options`.
///
/// Fails if a logger is already installed or the log file cannot be created.
pub fn init_logger(options: &RouteOptions) -> Result<()> {
    let mut builder = build_logger(options);

    if let Some(log_path) = options.log_output_path() {
        let log_file = File::create(log_path).map_err(|e| {
            Error::other(format!(
                "failed to create log output file {}: {e}",
                log_path.display()
            ))
        })?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn build_logger(options: &RouteOptions) -> Builder {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }

            match log_format {
                LogFormat::Compact => {
                    writeln!(buf, "{} {}", level_tag(record.level()), record.args())
                }
                LogFormat::Pretty => {
                    writeln!(
                        buf,
                        "{} [{APP_NAME}/{}] {}",
                        level_tag(record.level()),
                        subsystem(record.target()),
                        record.args()
                    )
                }
            }
        });
    builder
}

/// Last path segment of a log target inside this project, e.g. `optimizer`
/// for `trip_route_core::optimizer` or `input` for `trip_route_core::io::input`.
/// The binary logs as `main`; foreign targets are kept whole.
fn subsystem(target: &str) -> &str {
    match target.split_once("::") {
        Some(("trip_route_core" | "trip_route", rest)) => {
            rest.rsplit("::").next().unwrap_or(rest)
        }
        None if target == "trip_route" => "main",
        None if target == "trip_route_core" => "core",
        _ => target,
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
