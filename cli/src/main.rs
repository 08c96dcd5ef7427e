use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use optset_bootstrap::load_file;
use optset_core::{CheckPolicy, CheckReport, OptionRegistry};

/// Output format for check results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "optcheck")]
#[command(about = "Check command-line token vectors against declared option sets")]
#[command(
    long_about = "Check command-line token vectors against option sets declared in a YAML \
file.\n\nExit codes: 0 when the check succeeds, 1 when it fails, 2 on configuration or \
I/O errors."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a token vector against the declared sets.
    Check(CheckArgs),
    /// Print the command-line syntax for the declared sets.
    Usage(UsageArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Path to the YAML declaration file.
    #[arg(long)]
    decl: PathBuf,
    /// Check only the named set instead of searching for the first match.
    #[arg(long)]
    set: Option<String>,
    /// Accept unmatched option-like tokens.
    #[arg(long)]
    ignore_unmatched: bool,
    /// Allow data items anywhere instead of only at the end.
    #[arg(long)]
    data_anywhere: bool,
    /// Output format for the check results.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// The tokens to check (precede them with -- when they start with a dash).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Path to the YAML declaration file.
    #[arg(long)]
    decl: PathBuf,
    /// Text preceding each command line.
    #[arg(long, default_value = "usage:")]
    leading: String,
    /// Print each option on its own line.
    #[arg(long)]
    line_break: bool,
    /// Include the per-option help text blocks.
    #[arg(long)]
    texts: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Usage(args) => run_usage(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_registry(path: &PathBuf) -> Result<OptionRegistry, String> {
    load_file(path).map_err(|err| format!("failed to load '{}': {err}", path.display()))
}

fn run_check(args: CheckArgs) -> Result<bool, String> {
    let registry = load_registry(&args.decl)?;
    let policy = CheckPolicy {
        ignore_unmatched: args.ignore_unmatched,
        require_data_last: !args.data_anywhere,
    };

    if let Some(name) = &args.set {
        if registry.set(name).is_none() {
            return Err(format!(
                "no set named '{name}' declared in '{}'",
                args.decl.display()
            ));
        }
        let report = registry.check(name, &args.tokens, policy);
        print_report(&report, args.format);
        return Ok(report.success());
    }

    match registry.find_matching_set(&args.tokens, policy) {
        Some((_, report)) => {
            print_report(&report, args.format);
            Ok(true)
        }
        None => {
            let reports: Vec<CheckReport> = registry
                .sets()
                .map(|set| set.check(&args.tokens, policy))
                .collect();
            match args.format {
                OutputFormat::Text => {
                    eprintln!("no declared set matches the given tokens");
                    for report in &reports {
                        eprintln!("{}", report.log());
                    }
                }
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "success": false,
                        "reports": reports.iter().map(report_json).collect::<Vec<_>>(),
                    });
                    println!("{}", pretty(&value)?);
                }
            }
            Ok(false)
        }
    }
}

fn run_usage(args: UsageArgs) -> Result<bool, String> {
    let registry = load_registry(&args.decl)?;
    println!(
        "{}",
        optset_help::usage_summary(&registry, &args.leading, args.line_break, args.texts)
    );
    Ok(true)
}

fn print_report(report: &CheckReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text_report(report),
        OutputFormat::Json => match pretty(&report_json(report)) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("error: {err}"),
        },
    }
}

fn print_text_report(report: &CheckReport) {
    if report.success() {
        println!("ok: set '{}'", report.set_name());
    } else {
        println!("failed: set '{}'", report.set_name());
    }

    for result in report.options() {
        if !result.is_set() {
            continue;
        }
        if result.values().is_empty() {
            println!("  -{}: {} occurrence(s)", result.key(), result.count());
            continue;
        }
        for (index, value) in result.values().iter().enumerate() {
            match result.details().get(index) {
                Some(detail) => println!("  -{}[{index}]: {detail} = {value}", result.key()),
                None => println!("  -{}[{index}]: {value}", result.key()),
            }
        }
    }
    for item in report.data_items() {
        println!("  data: {item}");
    }
    for token in report.unmatched_tokens() {
        println!("  unmatched: {token}");
    }

    if !report.success() {
        for entry in report.log_entries() {
            eprintln!("{entry}");
        }
    }
}

fn report_json(report: &CheckReport) -> serde_json::Value {
    serde_json::json!({
        "set": report.set_name(),
        "success": report.success(),
        "log": report.log_entries(),
        "options": report
            .options()
            .iter()
            .filter(|result| result.is_set())
            .map(|result| {
                serde_json::json!({
                    "key": result.key(),
                    "count": result.count(),
                    "values": result.values(),
                    "details": result.details(),
                })
            })
            .collect::<Vec<_>>(),
        "data": report.data_items(),
        "unmatched": report.unmatched_tokens(),
    })
}

fn pretty(value: &serde_json::Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to render JSON: {err}"))
}
