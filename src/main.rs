mod config;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
    process::exit,
};

use anyhow::Context;
use clap::Parser;
use config::Config;
use log::{error, info, warn};
use windowed_average::{format_record, parse_record, Error, StreamSet};

/// Prints the moving average of every column of a numeric record stream
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of most recent values each average covers
    #[arg(short, long)]
    window_size: Option<usize>,

    /// File to read records from, standard input when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML file with default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field delimiter, a space splits on any whitespace
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Digits after the decimal point
    #[arg(short, long)]
    precision: Option<u16>,

    /// Ignore the first non-blank line
    #[arg(long)]
    skip_header: bool,

    /// Print the value added at this position once the input ends
    #[arg(long = "get", value_name = "INDEX")]
    get: Vec<usize>,
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    records: usize,
    skipped: usize,
}

fn settings(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(window_size) = args.window_size {
        config.window_size = window_size;
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    config.skip_header |= args.skip_header;

    if config.window_size < 1 {
        return Err(Error::InvalidArgument {
            name: "window size",
            value: config.window_size,
        }
        .into());
    }
    Ok(config)
}

fn run(
    config: &Config,
    gets: &[usize],
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();
    let mut streams: Option<StreamSet> = None;
    let mut header_pending = config.skip_header;

    for (number, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let number = number + 1;

        if header_pending && !line.trim().is_empty() {
            header_pending = false;
            continue;
        }

        let record = match parse_record(&line, config.delimiter) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping line {number}: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        if streams.is_none() {
            info!(
                "Tracking {} columns with a window of {}",
                record.len(),
                config.window_size
            );
            streams = Some(StreamSet::new(record.len(), config.window_size)?);
        }
        let Some(streams) = streams.as_mut() else {
            continue;
        };

        match streams.push(&record) {
            Ok(averages) => {
                writeln!(
                    output,
                    "{}",
                    format_record(&averages, config.delimiter, config.precision)
                )?;
                summary.records += 1;
            }
            Err(e) => {
                warn!("Skipping line {number}: {e}");
                summary.skipped += 1;
            }
        }
    }

    for &index in gets {
        let Some(streams) = &streams else {
            error!("Can't get index {index}: no values were read");
            continue;
        };
        let values = (0..streams.columns())
            .map(|column| streams.get(column, index))
            .collect::<Result<Vec<_>, _>>();
        match values {
            Ok(values) => writeln!(
                output,
                "{index}\t{}",
                format_record(&values, config.delimiter, config.precision)
            )?,
            Err(e) => error!("Can't get index {index}: {e}"),
        }
    }

    output.flush()?;
    Ok(summary)
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let config = settings(&args).unwrap_or_else(|e| {
        error!("Invalid settings: {e:#}");
        exit(1);
    });

    let stdout = io::stdout().lock();
    let result = match &args.input {
        Some(path) => File::open(path)
            .with_context(|| format!("failed to open input file '{}'", path.display()))
            .and_then(|file| run(&config, &args.get, BufReader::new(file), stdout)),
        None => run(&config, &args.get, io::stdin().lock(), stdout),
    };

    match result {
        Ok(summary) => info!(
            "Processed {} records, skipped {}",
            summary.records, summary.skipped
        ),
        Err(e) => {
            error!("{e:#}");
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_str(config: &Config, gets: &[usize], input: &str) -> (String, Summary) {
        let mut output = Vec::new();
        let summary = run(config, gets, Cursor::new(input), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn averages_every_column() {
        let config = Config {
            window_size: 2,
            precision: 1,
            ..Config::default()
        };
        let (output, summary) = run_str(&config, &[], "1,10\n3,30\n5,50\n");
        assert_eq!(output, "0.5,5.0\n2.0,20.0\n4.0,40.0\n");
        assert_eq!(
            summary,
            Summary {
                records: 3,
                skipped: 0
            }
        );
    }

    #[test]
    fn skips_header_comments_and_bad_lines() {
        let config = Config {
            precision: 2,
            skip_header: true,
            ..Config::default()
        };
        let (output, summary) = run_str(&config, &[], "a,b\n\n1,2\n# c\nx,2\n3\n3,4\n");
        assert_eq!(output, "0.20,0.40\n0.80,1.20\n");
        assert_eq!(
            summary,
            Summary {
                records: 2,
                skipped: 2
            }
        );
    }

    #[test]
    fn whitespace_delimiter() {
        let config = Config {
            window_size: 1,
            delimiter: ' ',
            precision: 0,
            ..Config::default()
        };
        let (output, _) = run_str(&config, &[], "1  2\n3\t4\n");
        assert_eq!(output, "1 2\n3 4\n");
    }

    #[test]
    fn prints_requested_history() {
        let config = Config {
            precision: 1,
            ..Config::default()
        };
        let (output, summary) = run_str(&config, &[0, 2, 7], "1\n2\n3\n");
        assert_eq!(output, "0.2\n0.6\n1.2\n0\t1.0\n2\t3.0\n");
        assert_eq!(summary.records, 3);
    }

    #[test]
    fn empty_input() {
        let (output, summary) = run_str(&Config::default(), &[0], "");
        assert_eq!(output, "");
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from(["windowed-average", "-w", "3", "-p", "2", "--skip-header"]);
        let config = settings(&args).unwrap();
        assert_eq!(
            config,
            Config {
                window_size: 3,
                delimiter: ',',
                precision: 2,
                skip_header: true,
            }
        );
    }

    #[test]
    fn zero_window_is_rejected() {
        let args = Args::parse_from(["windowed-average", "--window-size", "0"]);
        assert!(settings(&args).is_err());
    }

    #[test]
    fn repeated_get() {
        let args = Args::parse_from(["windowed-average", "--get", "1", "--get", "4"]);
        assert_eq!(args.get, vec![1, 4]);
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "windowed-average-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn command_line_overrides_config_file() {
        let path = write_config("overrides", "window_size = 10\nprecision = 1\n");
        let path_arg = path.to_str().unwrap();

        let args = Args::parse_from(["windowed-average", "-c", path_arg, "-w", "3"]);
        let config = settings(&args).unwrap();
        assert_eq!(
            config,
            Config {
                window_size: 3,
                delimiter: ',',
                precision: 1,
                skip_header: false,
            }
        );

        let args = Args::parse_from(["windowed-average", "-c", path_arg, "--skip-header"]);
        let config = settings(&args).unwrap();
        assert_eq!(config.window_size, 10);
        assert!(config.skip_header);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn config_file_skip_header_survives_missing_flag() {
        let path = write_config("skip-header", "skip_header = true\ndelimiter = \";\"\n");
        let args = Args::parse_from(["windowed-average", "-c", path.to_str().unwrap()]);
        let config = settings(&args).unwrap();
        assert!(config.skip_header);
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.window_size, 5);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn oversized_precision_is_rejected() {
        assert!(Args::try_parse_from(["windowed-average", "-p", "70000"]).is_err());
        let args = Args::parse_from(["windowed-average", "-p", "65535"]);
        assert_eq!(settings(&args).unwrap().precision, u16::MAX);
    }
}
