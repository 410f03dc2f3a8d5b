use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::*;
use ignore::WalkBuilder;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use umdlint_lib::config::{Config, RuleSetting};
use umdlint_lib::exit_codes;
use umdlint_lib::output::{OutputFormat, OutputFormatter, TextFormatter, format_all_warnings_as_json};
use umdlint_lib::rule::{LintWarning, Rule};
use umdlint_lib::rules;

const STDIN_NAME: &str = "<stdin>";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Markdown files, directories, or stdin
    Check(CheckArgs),
    /// List the available rules, or explain one
    Rule {
        /// Rule name or alias, e.g. MD037 or no-space-in-emphasis
        name: Option<String>,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Print every rule with its default options instead
        #[arg(long)]
        defaults: bool,

        #[command(flatten)]
        source: ConfigSource,
    },
}

#[derive(Args)]
struct ConfigSource {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore configuration files and use built-in defaults
    #[arg(long, conflicts_with = "config")]
    no_config: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Files or directories to lint; none or `-` reads stdin
    paths: Vec<String>,

    #[command(flatten)]
    source: ConfigSource,

    /// Fix issues automatically where possible
    #[arg(short, long)]
    fix: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Enable only these rules or tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    enable: Vec<String>,

    /// Disable these rules or tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Only print findings, no summary
    #[arg(short, long)]
    quiet: bool,
}

/// Findings left in one input after linting (and fixing, with `--fix`)
struct FileReport {
    path: String,
    warnings: Vec<LintWarning>,
    fixed: usize,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            exit_codes::TOOL_ERROR
        }
    };
    process::exit(code);
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Rule { name } => {
            print_rules(name.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { defaults, source } => {
            let config = if defaults {
                Config::with_rule_defaults(&rules::all_rules(&Config::default()))
            } else {
                load_config(&source)?
            };
            println!("{}", serde_json::to_string_pretty(&config.to_json_value())?);
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    if source.no_config {
        return Ok(Config::default());
    }
    if let Some(path) = &source.config {
        return Config::load_from_file(path).with_context(|| format!("Failed to load config {}", path.display()));
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            log::debug!("Using config file {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Apply `--enable`/`--disable` on top of the loaded config. These keys go last so they win.
fn apply_cli_rule_selection(mut config: Config, enable: &[String], disable: &[String]) -> Config {
    if !enable.is_empty() {
        for rule in rules::all_rules(&config) {
            let selected = enable.iter().any(|key| rule.answers_to(key) || rule.has_tag(key));
            if !selected {
                config.rules.shift_remove(rule.name());
                config.rules.insert(rule.name().to_string(), RuleSetting::Enabled(false));
            } else if !config.is_rule_enabled(rule.as_ref()) {
                config.rules.shift_remove(rule.name());
                config.rules.insert(rule.name().to_string(), RuleSetting::Enabled(true));
            }
        }
    }
    for key in disable {
        config.rules.shift_remove(key.as_str());
        config.rules.insert(key.clone(), RuleSetting::Enabled(false));
    }
    config
}

fn run_check(args: CheckArgs) -> Result<i32> {
    let start = Instant::now();
    let config = apply_cli_rule_selection(load_config(&args.source)?, &args.enable, &args.disable);

    let all_rules = rules::all_rules(&config);
    for key in config.unknown_keys(&all_rules) {
        log::warn!("Unknown rule or tag in configuration: {key}");
    }
    let enabled = rules::configured_rules(&config);
    log::debug!(
        "Enabled rules: {}",
        enabled.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
    );

    let read_stdin = args.paths.is_empty() || args.paths.iter().all(|p| p == "-");
    let (reports, had_errors) = if read_stdin {
        (vec![process_stdin(&enabled, args.fix)?], false)
    } else {
        let files = find_markdown_files(&args.paths)?;
        process_files(&files, &enabled, args.fix)
    };

    let remaining: usize = reports.iter().map(|r| r.warnings.len()).sum();
    let fixed: usize = reports.iter().map(|r| r.fixed).sum();
    print_reports(&args, &reports, start.elapsed().as_millis() as u64, fixed);

    if had_errors {
        return Ok(exit_codes::TOOL_ERROR);
    }
    Ok(exit_codes::for_findings(remaining))
}

/// Walk the given paths for Markdown files. Files named explicitly are always linted.
fn find_markdown_files(paths: &[String]) -> Result<Vec<String>> {
    let mut file_paths = Vec::new();
    let mut directories = Vec::new();

    for path in paths {
        let candidate = Path::new(path);
        if candidate.is_file() {
            file_paths.push(path.clone());
        } else if candidate.is_dir() {
            directories.push(path.clone());
        } else {
            bail!("Path not found: {path}");
        }
    }

    if let Some((first, rest)) = directories.split_first() {
        let mut walk_builder = WalkBuilder::new(first);
        for path in rest {
            walk_builder.add(path);
        }

        let mut types_builder = ignore::types::TypesBuilder::new();
        types_builder.add("markdown", "*.md")?;
        types_builder.add("markdown", "*.markdown")?;
        types_builder.select("markdown");
        walk_builder.types(types_builder.build()?);
        walk_builder.hidden(true);
        walk_builder.require_git(false);

        for result in walk_builder.build() {
            match result {
                Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                    let file_path = entry.path().to_string_lossy().to_string();
                    let cleaned = file_path.strip_prefix("./").map(str::to_string).unwrap_or(file_path);
                    file_paths.push(cleaned);
                }
                Ok(_) => {}
                Err(err) => log::warn!("Error walking directory: {err}"),
            }
        }
    }

    file_paths.sort();
    file_paths.dedup();
    Ok(file_paths)
}

fn process_files(files: &[String], rules: &[Box<dyn Rule>], fix: bool) -> (Vec<FileReport>, bool) {
    #[cfg(feature = "parallel")]
    let results: Vec<Result<FileReport>> = files.par_iter().map(|path| process_file(path, rules, fix)).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<FileReport>> = files.iter().map(|path| process_file(path, rules, fix)).collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut had_errors = false;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("{} {e:#}", "Error:".red().bold());
                had_errors = true;
            }
        }
    }
    (reports, had_errors)
}

fn process_file(path: &str, rules: &[Box<dyn Rule>], fix: bool) -> Result<FileReport> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let (warnings, fixed, fixed_content) = lint_and_fix(&content, rules, fix)?;
    if let Some(fixed_content) = fixed_content {
        fs::write(path, fixed_content).with_context(|| format!("Failed to write {path}"))?;
        log::debug!("Fixed {fixed} issue(s) in {path}");
    }
    Ok(FileReport {
        path: path.to_string(),
        warnings,
        fixed,
    })
}

fn process_stdin(rules: &[Box<dyn Rule>], fix: bool) -> Result<FileReport> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content).context("Failed to read stdin")?;
    let (warnings, fixed, fixed_content) = lint_and_fix(&content, rules, fix)?;
    if fix {
        // With --fix the document goes to stdout; findings go to stderr
        print!("{}", fixed_content.as_deref().unwrap_or(&content));
    }
    Ok(FileReport {
        path: STDIN_NAME.to_string(),
        warnings,
        fixed,
    })
}

/// Lint `content`; with `fix`, also fix it and re-lint. Returns the remaining findings, how
/// many were fixed, and the new content when it changed.
fn lint_and_fix(
    content: &str,
    rules: &[Box<dyn Rule>],
    fix: bool,
) -> Result<(Vec<LintWarning>, usize, Option<String>)> {
    let warnings = umdlint_lib::lint_with_rules(content, rules)?;
    if !fix || warnings.iter().all(|w| w.fix.is_none()) {
        return Ok((warnings, 0, None));
    }

    let fixed_content = umdlint_lib::fix_with_rules(content, rules)?;
    let remaining = umdlint_lib::lint_with_rules(&fixed_content, rules)?;
    let fixed = warnings.len().saturating_sub(remaining.len());
    let changed = (fixed_content != content).then_some(fixed_content);
    Ok((remaining, fixed, changed))
}

fn print_reports(args: &CheckArgs, reports: &[FileReport], duration_ms: u64, fixed: usize) {
    // Keep stdout clean for the fixed document when fixing stdin
    let to_stderr = args.fix && reports.iter().any(|r| r.path == STDIN_NAME);
    let emit = |text: &str| {
        if to_stderr {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    };

    match args.output {
        OutputFormat::Json => {
            let all: Vec<(String, Vec<LintWarning>)> =
                reports.iter().map(|r| (r.path.clone(), r.warnings.clone())).collect();
            emit(&format_all_warnings_as_json(&all));
        }
        OutputFormat::Text => {
            let formatter = if io::stdout().is_terminal() && !to_stderr {
                TextFormatter::new()
            } else {
                TextFormatter::without_colors()
            };
            for report in reports.iter().filter(|r| !r.warnings.is_empty()) {
                emit(&formatter.format_warnings(&report.warnings, &report.path));
            }
            if args.quiet {
                return;
            }
            let remaining: usize = reports.iter().map(|r| r.warnings.len()).sum();
            if let Some(summary) = formatter.format_summary(reports.len(), remaining, duration_ms) {
                emit(&summary);
            }
            if fixed > 0 {
                emit(&format!("Fixed {fixed} issue(s)"));
            } else if remaining > 0 && !args.fix {
                let fixable: usize = reports
                    .iter()
                    .flat_map(|r| &r.warnings)
                    .filter(|w| w.fix.is_some())
                    .count();
                if fixable > 0 {
                    emit(&format!("Run with `--fix` to automatically fix {fixable} of the {remaining} issues"));
                }
            }
        }
    }
}

fn print_rules(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        for rule in rules::all_rules(&Config::default()) {
            println!("{} ({}) - {}", rule.name().bold(), rule.aliases().join(", "), rule.description());
        }
        return Ok(());
    };

    let Some(rule) = rules::find_rule(name) else {
        bail!("Unknown rule: {name}");
    };
    println!("{} - {}", rule.name().bold(), rule.description());
    println!("Aliases: {}", rule.aliases().join(", "));
    println!("Tags: {}", rule.tags().join(", "));
    if let Some((_, options)) = rule.default_config_section() {
        println!("Default options:\n{}", serde_json::to_string_pretty(&options)?);
    }
    Ok(())
}
