use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use pathquill::config::{Config, OutputFormat};
use pathquill::document::from_yaml;
use pathquill::file::{load_document, load_from_stdin};
use pathquill::{Evaluator, Value};

/// PathQuill - evaluate lookup paths against YAML and JSON documents
#[derive(Parser)]
#[command(name = "pathquill")]
#[command(version)]
#[command(allow_negative_numbers = true)]
#[command(about = "Evaluate lookup paths against YAML and JSON documents", long_about = None)]
struct Cli {
    /// Lookup path, e.g. 'users[0].name.substring({0},{1})'
    path: String,

    /// Arguments substituted for {0}, {1}, ... in method calls
    args: Vec<String>,

    /// Document to read (YAML, JSON, JSONL, optionally .gz); stdin if omitted
    #[arg(short, long)]
    file: Option<String>,

    /// Value printed when the path does not resolve
    #[arg(short, long)]
    default: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Pass arguments as strings instead of parsing them as YAML scalars
    #[arg(long)]
    raw_args: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Parses a command-line word as a YAML scalar so that `5` is an int and
/// `true` a boolean. Anything unparsable stays a string.
fn parse_argument(raw: &str, typed: bool) -> Value {
    if !typed {
        return Value::from(raw);
    }
    match serde_yaml::from_str::<serde_yaml::Value>(raw) {
        Ok(value) => from_yaml(value),
        Err(_) => Value::from(raw),
    }
}

fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
        OutputFormat::Json => {
            let mut text =
                serde_json::to_string_pretty(value).context("Failed to render JSON")?;
            text.push('\n');
            text
        }
    };
    Ok(text)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load();
    let format = cli.output.unwrap_or(config.output_format);
    let typed = config.typed_arguments && !cli.raw_args;

    let document = match &cli.file {
        Some(file_path) => load_document(file_path)?,
        None => {
            if io::stdin().is_terminal() {
                bail!("No input: pass --file or pipe a document on stdin");
            }
            load_from_stdin()?
        }
    };

    let args: Vec<Value> = cli
        .args
        .iter()
        .map(|raw| parse_argument(raw, typed))
        .collect();
    let path = pathquill::Parser::parse(&cli.path);
    log::debug!("evaluating '{}' with {} argument(s)", path, args.len());

    let result = Evaluator::new(&args)
        .with_ambiguity_threshold(config.ambiguity_threshold)
        .evaluate(&document, &path);

    match result {
        Some(value) => {
            print!("{}", render(&value, format)?);
            Ok(ExitCode::SUCCESS)
        }
        None => match &cli.default {
            Some(default) => {
                print!("{}", render(&parse_argument(default, typed), format)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("null");
                Ok(ExitCode::from(config.null_exit_code))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_arguments() {
        assert_eq!(parse_argument("5", true), Value::Int(5));
        assert_eq!(parse_argument("true", true), Value::Boolean(true));
        assert_eq!(parse_argument("abc", true), Value::from("abc"));
        assert_eq!(parse_argument("5", false), Value::from("5"));
    }

    #[test]
    fn test_render_formats() {
        let value = Value::List(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(render(&value, OutputFormat::Json).unwrap(), "[\n  1,\n  \"a\"\n]\n");
        assert_eq!(render(&value, OutputFormat::Yaml).unwrap(), "- 1\n- a\n");
    }
}
