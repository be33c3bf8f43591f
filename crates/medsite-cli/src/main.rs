use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use medsite_content::{ContentReport, ContentValidator, RuleOverride, ValidationConfig};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing_subscriber::EnvFilter;

mod render;

fn cli() -> Command {
    Command::new("medsite-validate")
        .version(medsite_content::VERSION)
        .about("Validate and score generated medical-practice website content")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Validation config (.toml, .yaml or .yml)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate one or more content trees")
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Content tree files (.json, .yaml or .yml)"),
                )
                .arg(specialty_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("field")
                .about("Validate a single field value")
                .arg(Arg::new("type").required(true).help("Rule key, e.g. title or email"))
                .arg(Arg::new("value").required(true).allow_hyphen_values(true))
                .arg(
                    Arg::new("required")
                        .long("required")
                        .action(ArgAction::SetTrue)
                        .help("Treat the field as required for this call"),
                )
                .arg(
                    Arg::new("min-length")
                        .long("min-length")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("max-length")
                        .long("max-length")
                        .value_parser(value_parser!(usize)),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("medical")
                .about("Check text for terminology and prohibited claims")
                .arg(input_arg())
                .arg(specialty_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("assess")
                .about("Score readability, SEO and medical relevance of text")
                .arg(input_arg())
                .arg(json_arg()),
        )
        .subcommand(Command::new("rules").about("Print the effective configuration as TOML"))
}

fn specialty_arg() -> Arg {
    Arg::new("specialty")
        .long("specialty")
        .short('s')
        .default_value("general")
        .help("Medical specialty, e.g. cardiology")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn input_arg() -> Arg {
    Arg::new("input")
        .value_parser(value_parser!(PathBuf))
        .help("Text file; reads stdin when omitted")
}

fn main() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    let sub = matches.subcommand().map(|(_, args)| args);
    init_tracing(sub.map_or(0, |a| a.get_count("verbose")).max(matches.get_count("verbose")));

    let config_path = sub
        .and_then(|a| a.get_one::<PathBuf>("config"))
        .or_else(|| matches.get_one::<PathBuf>("config"));
    let config = match config_path {
        Some(path) => ValidationConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ValidationConfig::default(),
    };
    let validator = ContentValidator::new(config);

    match matches.subcommand() {
        Some(("validate", args)) => run_validate(&validator, args),
        Some(("field", args)) => run_field(&validator, args),
        Some(("medical", args)) => {
            let text = read_input(args.get_one::<PathBuf>("input"))?;
            let result = validator.validate_medical_content(&text, specialty(args));
            emit(args, &result, || render::result(&result))?;
            Ok(exit_code(result.is_valid))
        }
        Some(("assess", args)) => {
            let text = read_input(args.get_one::<PathBuf>("input"))?;
            let quality = validator.assess_content_quality(&text);
            emit(args, &quality, || render::quality(&quality))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("rules", _)) => {
            print!("{}", validator.config().to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        _ => Err(anyhow!("unknown command")),
    }
}

fn run_validate(validator: &ContentValidator, args: &ArgMatches) -> anyhow::Result<ExitCode> {
    let specialty = specialty(args);
    let files: Vec<&PathBuf> = args.get_many::<PathBuf>("files").into_iter().flatten().collect();

    let reports = files
        .par_iter()
        .map(|path| -> anyhow::Result<(String, ContentReport)> {
            let value = load_tree(path)?;
            Ok((path.display().to_string(), validator.validate_all_value(&value, specialty)))
        })
        .collect::<anyhow::Result<Vec<(String, ContentReport)>>>()?;

    if args.get_flag("json") {
        let keyed: serde_json::Map<String, JsonValue> = reports
            .iter()
            .map(|(label, report)| -> anyhow::Result<(String, JsonValue)> {
                Ok((label.clone(), serde_json::to_value(report)?))
            })
            .collect::<anyhow::Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&keyed)?);
    } else {
        for (label, report) in &reports {
            println!("{}", render::report(label, specialty, report));
        }
    }

    Ok(exit_code(reports.iter().all(|(_, r)| r.is_valid)))
}

fn run_field(validator: &ContentValidator, args: &ArgMatches) -> anyhow::Result<ExitCode> {
    let field_type = args
        .get_one::<String>("type")
        .ok_or_else(|| anyhow!("missing field type"))?;
    let value = args
        .get_one::<String>("value")
        .ok_or_else(|| anyhow!("missing field value"))?;

    let mut overrides = RuleOverride::new();
    if args.get_flag("required") {
        overrides = overrides.required(true);
    }
    if let Some(min) = args.get_one::<usize>("min-length") {
        overrides = overrides.min_length(*min);
    }
    if let Some(max) = args.get_one::<usize>("max-length") {
        overrides = overrides.max_length(*max);
    }

    let result = validator.validate_field_named(field_type, value, Some(&overrides));
    emit(args, &result, || render::result(&result))?;
    Ok(exit_code(result.is_valid))
}

fn specialty(args: &ArgMatches) -> &str {
    args.get_one::<String>("specialty")
        .map_or("general", String::as_str)
}

fn emit<T: Serialize>(
    args: &ArgMatches,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn load_tree(path: &Path) -> anyhow::Result<JsonValue> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid yaml in {}", path.display()))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("invalid json in {}", path.display()))?,
    };

    tracing::debug!("Loaded content tree from {}", path.display());
    Ok(value)
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn exit_code(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn parses_validate_with_many_files() {
        let matches = cli()
            .try_get_matches_from(["medsite-validate", "validate", "a.json", "b.yaml", "-s", "cardiology"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "validate");
        assert_eq!(args.get_many::<PathBuf>("files").unwrap().count(), 2);
        assert_eq!(specialty(args), "cardiology");
    }

    #[test]
    fn field_values_may_start_with_a_dash() {
        let matches = cli()
            .try_get_matches_from(["medsite-validate", "field", "phone", "-555"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<String>("value").unwrap(), "-555");
    }
}
