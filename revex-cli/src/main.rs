use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use revex::{ReverseRegex, TemplateMode, ValueBag, compile, compile_template, translate};
use tracing::Level;

#[derive(Parser)]
#[command(name = "revex")]
#[command(about = "Revex - match strings against a regex and build them back from values")]
#[command(version)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if pattern matches
    Match {
        #[command(flatten)]
        source: PatternSource,
        /// The input string
        input: String,
    },
    /// Print the value of each outermost group
    Extract {
        #[command(flatten)]
        source: PatternSource,
        /// The input string
        input: String,
    },
    /// Build a string from group values
    Revert {
        #[command(flatten)]
        source: PatternSource,
        /// A value as KEY=VALUE; use =VALUE for positional groups
        #[arg(short = 'v', long = "value", value_parser = parse_value)]
        values: Vec<(String, String)>,
        /// Check that the result matches the pattern
        #[arg(long)]
        validate: bool,
    },
    /// Show the reverse template and outermost groups
    Groups {
        #[command(flatten)]
        source: PatternSource,
    },
    /// Convert a brace template to a regex
    Translate {
        /// The brace template
        template: String,
        #[arg(long, value_enum, default_value_t = Mode::Path)]
        mode: Mode,
        /// Make a trailing slash optional (path mode only)
        #[arg(long)]
        strict_slash: bool,
    },
}

#[derive(Args)]
struct PatternSource {
    /// The regex pattern, or a brace template with --mode
    pattern: String,
    /// Treat the pattern as a brace template for this mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    /// Make a trailing slash optional (brace path templates only)
    #[arg(long)]
    strict_slash: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Host,
    Path,
    Prefix,
}

impl From<Mode> for TemplateMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Host => TemplateMode::Host,
            Mode::Path => TemplateMode::Path,
            Mode::Prefix => TemplateMode::PathPrefix,
        }
    }
}

fn parse_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.command {
        Commands::Match { source, input } => cmd_match(&source, &input),
        Commands::Extract { source, input } => cmd_extract(&source, &input),
        Commands::Revert {
            source,
            values,
            validate,
        } => cmd_revert(&source, values, validate),
        Commands::Groups { source } => cmd_groups(&source),
        Commands::Translate {
            template,
            mode,
            strict_slash,
        } => cmd_translate(&template, mode, strict_slash),
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    std::process::exit(1);
}

fn load(source: &PatternSource) -> ReverseRegex {
    let compiled = match source.mode {
        Some(mode) => compile_template(&source.pattern, mode.into(), source.strict_slash),
        None => compile(&source.pattern),
    };
    compiled.unwrap_or_else(|e| fail(e))
}

fn display_key(key: &str) -> String {
    if key.is_empty() {
        "(positional)".dimmed().to_string()
    } else {
        key.cyan().to_string()
    }
}

fn cmd_match(source: &PatternSource, input: &str) {
    let regex = load(source);

    if regex.is_match(input) {
        println!("{}", "true".green());
        std::process::exit(0);
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_extract(source: &PatternSource, input: &str) {
    let regex = load(source);

    let Some(mut values) = regex.values(input) else {
        println!("{}", "✗ No match".red());
        std::process::exit(1);
    };

    if regex.groups().is_empty() {
        println!("{}", "✓ Match found, no groups".green().bold());
        return;
    }

    // Print in group order, not key order.
    for group in regex.groups() {
        let value = values.pop_front(&group.name).unwrap_or_default();
        println!("{} = {}", display_key(&group.name), value.green());
    }
}

fn cmd_revert(source: &PatternSource, pairs: Vec<(String, String)>, validate: bool) {
    let regex = load(source);
    let mut values: ValueBag = pairs.into_iter().collect();

    let reverted = if validate {
        regex.revert_valid(&mut values)
    } else {
        regex.revert(&mut values)
    };

    match reverted {
        Ok(result) => println!("{}", result.green()),
        Err(e) => fail(e),
    }

    if !values.is_empty() {
        println!();
        println!("{}", "Unused values:".bold());
        for (key, queue) in values.iter() {
            for value in queue {
                println!("  {} = {}", display_key(key), value.yellow());
            }
        }
    }
}

fn cmd_groups(source: &PatternSource) {
    let regex = load(source);

    println!("{}", "Pattern:".bold());
    println!("  {}", regex.as_str().cyan());
    println!("{}", "Template:".bold());
    println!("  {}", regex.template().to_string().green());

    if regex.groups().is_empty() {
        println!("{}", "No groups".dimmed());
        return;
    }

    println!("{}", "Groups:".bold());
    for (i, group) in regex.groups().iter().enumerate() {
        println!(
            "  [{}] index {} {}",
            i + 1,
            group.index,
            display_key(&group.name)
        );
    }
}

fn cmd_translate(template: &str, mode: Mode, strict_slash: bool) {
    match translate(template, mode.into(), strict_slash) {
        Ok(source) => println!("{}", source.green()),
        Err(e) => fail(e),
    }
}
