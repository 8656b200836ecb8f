use std::{env, fmt, path::Path};

use log::LevelFilter;

use crate::{
    Error, Result, guidance::DEFAULT_WALKING_SPEED_KMH, route::DEFAULT_SPIKE_FACTOR,
};

/// Implements `parse` and `as_str` for a unit-only enum from a table of
/// `Variant => "name" | "alias"` entries.
macro_rules! cli_value {
    ($target:ident, $option:literal, { $($variant:ident => $name:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $target {
            pub fn parse(value: &str) -> Result<Self> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($name $(| $alias)* => Ok(Self::$variant),)+
                    other => Err(Error::invalid_input(format!(
                        concat!("Invalid value for --", $option, ": {} (expected {})"),
                        other,
                        [$($name),+].join("|")
                    ))),
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $target {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Runtime options for the `trip-route` binary.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOptions {
    /// What to compute.
    pub mode: Mode,
    /// Optional input file path. Empty means stdin.
    pub input: String,
    /// Optional output file path. Empty means stdout.
    pub output: String,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    /// Destination id guidance starts from. Empty means the first destination.
    pub from: String,
    /// Destination id guidance ends at. Empty means the second destination.
    pub to: String,
    /// Leg of the optimized route to guide along, instead of `from`/`to`.
    pub segment: Option<usize>,
    /// Walking speed used for guidance and route durations (km/h).
    pub walking_speed: f64,
    /// Legs longer than `average * spike_factor` are logged as spikes.
    pub spike_factor: f64,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs and metrics. Empty means stderr.
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Optimize,
    Guidance,
    Trip,
}

cli_value!(Mode, "mode", {
    Optimize => "optimize",
    Guidance => "guidance",
    Trip => "trip",
});

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputFormat {
    Json,
    Points,
}

cli_value!(InputFormat, "input-format", {
    Json => "json",
    Points => "points" | "lat-lng",
});

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Json,
    Text,
}

cli_value!(OutputFormat, "output-format", {
    Json => "json",
    Text => "text",
});

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

cli_value!(LogLevel, "log-level", {
    Error => "error",
    Warn => "warn" | "warning",
    Info => "info",
    Debug => "debug",
    Trace => "trace",
    Off => "off",
});

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

cli_value!(LogFormat, "log-format", {
    Compact => "compact",
    Pretty => "pretty",
});

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Optimize,
            input: String::new(),
            output: String::new(),
            input_format: InputFormat::Json,
            output_format: OutputFormat::Json,
            from: String::new(),
            to: String::new(),
            segment: None,
            walking_speed: DEFAULT_WALKING_SPEED_KMH,
            spike_factor: DEFAULT_SPIKE_FACTOR,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl RouteOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    let value = value.ok_or_else(|| {
                        Error::invalid_input(format!("Missing value for --{name}"))
                    })?;
                    options.apply_option(&name, value)?;
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn apply_option(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "mode" => self.mode = Mode::parse(&value)?,
            "input" => self.input = value,
            "output" => self.output = value,
            "input-format" => self.input_format = InputFormat::parse(&value)?,
            "output-format" => self.output_format = OutputFormat::parse(&value)?,
            "from" => self.from = value,
            "to" => self.to = value,
            "segment" => self.segment = Some(parse_usize(name, &value)?),
            "walking-speed" => self.walking_speed = parse_f64(name, &value)?,
            "spike-factor" => self.spike_factor = parse_f64(name, &value)?,
            "log-level" => self.log_level = LogLevel::parse(&value)?,
            "log-format" => self.log_format = LogFormat::parse(&value)?,
            "log-output" => self.log_output = value,
            _ => {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(self.walking_speed.is_finite() && self.walking_speed > 0.0) {
            return Err(Error::invalid_input(format!(
                "--walking-speed must be a finite value > 0, got {}",
                self.walking_speed
            )));
        }
        if !(self.spike_factor.is_finite() && self.spike_factor > 0.0) {
            return Err(Error::invalid_input(format!(
                "--spike-factor must be a finite value > 0, got {}",
                self.spike_factor
            )));
        }
        if self.segment.is_some() {
            if self.mode != Mode::Guidance {
                return Err(Error::invalid_input("--segment needs --mode=guidance"));
            }
            if !self.from.trim().is_empty() || !self.to.trim().is_empty() {
                return Err(Error::invalid_input(
                    "--segment cannot be combined with --from/--to",
                ));
            }
        }
        if self.mode == Mode::Trip && self.input_format == InputFormat::Points {
            return Err(Error::invalid_input(
                "--mode=trip needs --input-format=json (a trip document)",
            ));
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  trip-route [options] [--input destinations.json]\n",
            "  trip-route [options] < destinations.json\n\n",
            "Options:\n",
            "  --mode <optimize|guidance|trip>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --input-format <json|points>\n",
            "  --output-format <json|text>\n",
            "  --from <destination id>\n",
            "  --to <destination id>\n",
            "  --segment <leg index of the optimized route>\n",
            "  --walking-speed <f64 km/h>\n",
            "  --spike-factor <f64>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  trip-route --input day.json --output route.json\n",
            "  trip-route --input-format=points --output-format=text < points.txt\n",
            "  trip-route --mode=guidance --from=louvre --to=orsay < day.json\n",
            "  trip-route --mode=guidance --segment=0 < day.json\n",
            "  trip-route --mode=trip --log-level=info --log-output run.log < trip.json\n",
        )
    }

    pub fn input_path(&self) -> Option<&Path> {
        stdio_or_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        stdio_or_path(&self.output)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        stdio_or_path(&self.log_output)
    }
}

impl fmt::Display for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mode={} input={} output={} input_format={} output_format={} from={} to={} segment={} walking_speed={} spike_factor={} log_level={} log_format={} log_timestamp={} log_output={}",
            self.mode,
            display_or_dash(&self.input),
            display_or_dash(&self.output),
            self.input_format,
            self.output_format,
            display_or_dash(&self.from),
            display_or_dash(&self.to),
            self.segment.map_or_else(|| "-".to_string(), |idx| idx.to_string()),
            self.walking_speed,
            self.spike_factor,
            self.log_level,
            self.log_format,
            self.log_timestamp,
            display_or_dash(&self.log_output),
        )
    }
}

/// Splits `name=value`, or takes the next argument as the value when it is
/// not itself an option.
fn split_arg<I>(raw_name: &str, args: &mut std::iter::Peekable<I>) -> (String, Option<String>)
where
    I: Iterator<Item = String>,
{
    if let Some((name, value)) = raw_name.split_once('=') {
        return (name.to_owned(), Some(value.to_owned()));
    }

    let value = args.next_if(|next| !next.starts_with("--"));
    (raw_name.to_owned(), value)
}

fn stdio_or_path(value: &str) -> Option<&Path> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(Path::new(value))
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn parse_f64(name: &str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| {
        Error::invalid_input(format!("Invalid number for --{name}: {value}"))
    })
}

fn parse_usize(name: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        Error::invalid_input(format!("Invalid index for --{name}: {value}"))
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{InputFormat, LogFormat, LogLevel, Mode, OutputFormat, RouteOptions, parse_bool};

    #[test]
    fn parse_bool_accepts_common_values() {
        assert!(parse_bool("x", "true").expect("parse"));
        assert!(parse_bool("x", "ON").expect("parse"));
        assert!(!parse_bool("x", "0").expect("parse"));
        assert!(!parse_bool("x", "no").expect("parse"));
    }

    #[test]
    fn parse_bool_rejects_unknown_values() {
        let err = parse_bool("log-timestamp", "maybe").expect_err("invalid bool should fail");
        assert!(
            err.to_string()
                .contains("Invalid boolean for --log-timestamp: maybe")
        );
    }

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn enum_values_accept_aliases_and_case() {
        assert_eq!(LogLevel::parse("WARNING").expect("parse"), LogLevel::Warn);
        assert_eq!(
            InputFormat::parse("lat-lng").expect("parse"),
            InputFormat::Points
        );
        assert_eq!(Mode::parse(" Trip ").expect("parse"), Mode::Trip);

        let err = OutputFormat::parse("yaml").expect_err("unknown format");
        assert!(
            err.to_string()
                .contains("Invalid value for --output-format: yaml (expected json|text)")
        );
    }

    #[test]
    fn parse_from_iter_applies_known_options() {
        let options = RouteOptions::parse_from_iter([
            "--mode=guidance",
            "--input",
            "day.json",
            "--output=route.json",
            "--input-format=json",
            "--output-format=text",
            "--from=louvre",
            "--to",
            "orsay",
            "--walking-speed=4.5",
            "--spike-factor=3",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
        ])
        .expect("parse options");

        assert_eq!(options.mode, Mode::Guidance);
        assert_eq!(options.input, "day.json");
        assert_eq!(options.output, "route.json");
        assert_eq!(options.input_format, InputFormat::Json);
        assert_eq!(options.output_format, OutputFormat::Text);
        assert_eq!(options.from, "louvre");
        assert_eq!(options.to, "orsay");
        assert_eq!(options.walking_speed, 4.5);
        assert_eq!(options.spike_factor, 3.0);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
    }

    #[test]
    fn bare_log_timestamp_flag_enables_timestamps() {
        let options = RouteOptions::parse_from_iter(["--no-log-timestamp", "--log-timestamp"])
            .expect("parse options");
        assert!(options.log_timestamp);
    }

    #[test]
    fn no_log_timestamp_rejects_value() {
        let err = RouteOptions::parse_from_iter(["--no-log-timestamp=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn rejects_unknown_option_and_positional_argument() {
        let err = RouteOptions::parse_from_iter(["--unknown-opt=1"]).expect_err("unknown option");
        assert!(err.to_string().contains("Unknown option: --unknown-opt"));

        let err = RouteOptions::parse_from_iter(["day.json"]).expect_err("positional");
        assert!(err.to_string().contains("Unexpected argument: day.json"));
    }

    #[test]
    fn option_without_value_is_rejected() {
        let err = RouteOptions::parse_from_iter(["--input", "--mode=trip"])
            .expect_err("missing value should fail");
        assert!(err.to_string().contains("Missing value for --input"));
    }

    #[test]
    fn walking_speed_must_be_positive_and_finite() {
        for bad in ["0", "-3", "NaN", "inf"] {
            let err = RouteOptions::parse_from_iter([format!("--walking-speed={bad}")])
                .expect_err("bad speed should fail");
            assert!(err.to_string().contains("--walking-speed must be"));
        }

        let err =
            RouteOptions::parse_from_iter(["--walking-speed=fast"]).expect_err("not a number");
        assert!(err.to_string().contains("Invalid number for --walking-speed"));
    }

    #[test]
    fn segment_is_parsed_for_guidance_mode() {
        let options = RouteOptions::parse_from_iter(["--mode=guidance", "--segment", "2"])
            .expect("parse options");
        assert_eq!(options.segment, Some(2));
        assert!(options.to_string().contains("segment=2"));

        let err = RouteOptions::parse_from_iter(["--mode=guidance", "--segment=-1"])
            .expect_err("negative index");
        assert!(err.to_string().contains("Invalid index for --segment: -1"));
    }

    #[test]
    fn segment_requires_guidance_mode_without_explicit_pair() {
        let err = RouteOptions::parse_from_iter(["--segment=0"]).expect_err("optimize mode");
        assert!(err.to_string().contains("--segment needs --mode=guidance"));

        let err = RouteOptions::parse_from_iter(["--mode=guidance", "--segment=0", "--from=a"])
            .expect_err("segment with from");
        assert!(err.to_string().contains("cannot be combined with --from/--to"));
    }

    #[test]
    fn trip_mode_requires_json_input() {
        let err = RouteOptions::parse_from_iter(["--mode=trip", "--input-format=points"])
            .expect_err("trip from points should fail");
        assert!(err.to_string().contains("--mode=trip needs"));
    }

    #[test]
    fn help_returns_usage_error() {
        let err = RouteOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn stdio_paths_treat_empty_and_dash_as_streams() {
        let options = RouteOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());

        let options = RouteOptions {
            input: "-".to_string(),
            output: "out/route.json".to_string(),
            ..RouteOptions::default()
        };
        assert!(options.input_path().is_none());
        assert_eq!(
            options.output_path().expect("path should exist"),
            std::path::Path::new("out/route.json")
        );
    }

    #[test]
    fn display_lists_key_value_pairs() {
        let text = RouteOptions::default().to_string();
        assert!(text.starts_with("mode=optimize input=- output=-"));
        assert!(text.contains("walking_speed=5"));
        assert!(text.contains("log_level=warn"));
    }
}
