//! CLI entry point for jsontree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use jsontree::{
    LoaderConfig, OutputConfig, TreeFormatter, TreeNode, build_tree, print_json,
    read_json_file_with,
};
use tracing_subscriber::EnvFilter;

/// Exit status for a missing argument or unusable option.
const EXIT_USAGE: i32 = 1;
/// Exit status when the descriptor parsed but is not a valid tree.
const EXIT_STRUCTURE: i32 = 2;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "jsontree")]
#[command(about = "Load a binary tree from a JSON file and print it")]
#[command(version)]
struct Args {
    /// JSON file describing the tree ({"value": .., "left": {..}, "right": {..}})
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Print the built tree as JSON instead of drawing it
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Do not print the node count and height after the tree
    #[arg(long = "no-summary")]
    no_summary: bool,

    /// Maximum size of the input file (default: 16M)
    /// Use suffixes: K, M, G (e.g., 512K)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        // --help and --version
        if !e.use_stderr() {
            e.exit();
        }
        let _ = e.print();
        process::exit(EXIT_USAGE);
    });
    setup_logging(args.verbose);

    let Some(path) = args.path.as_ref() else {
        eprintln!("jsontree: missing file path");
        eprintln!("{}", Args::command().render_usage());
        process::exit(EXIT_USAGE);
    };

    let mut loader_config = LoaderConfig::default();
    if let Some(ref size_str) = args.max_file_size {
        match parse_file_size(size_str) {
            Ok(size) => loader_config.max_file_size = size,
            Err(e) => {
                eprintln!("jsontree: invalid --max-file-size '{}': {}", size_str, e);
                process::exit(EXIT_USAGE);
            }
        }
    }

    // Load failures degrade into an absent tree and a successful exit.
    let data = match read_json_file_with(path, &loader_config) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = ?e, "load failed");
            println!("jsontree: {}: {}", e.kind(), e);
            None
        }
    };

    let (tree, status) = match build_tree(data.as_deref()) {
        Ok(tree) => (tree, 0),
        Err(e) => {
            println!("jsontree: {}: {}", e.kind_name(), e);
            (None, EXIT_STRUCTURE)
        }
    };

    if let Err(e) = render(&args, tree.as_ref()) {
        eprintln!("jsontree: error writing output: {}", e);
        process::exit(EXIT_USAGE);
    }
    process::exit(status);
}

fn render(args: &Args, tree: Option<&TreeNode>) -> std::io::Result<()> {
    if args.json {
        return print_json(tree);
    }

    let formatter = TreeFormatter::new(OutputConfig {
        use_color: should_use_color(args.color),
        show_summary: !args.no_summary,
    });
    formatter.print(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_size() {
        assert_eq!(parse_file_size("100"), Ok(100));
        assert_eq!(parse_file_size("4k"), Ok(4096));
        assert_eq!(parse_file_size("2MB"), Ok(2 * 1024 * 1024));
        assert_eq!(parse_file_size(" 1G "), Ok(1024 * 1024 * 1024));
        assert!(parse_file_size("lots").is_err());
        assert!(parse_file_size("99999999999999G").is_err());
    }

    #[test]
    fn test_args_accept_optional_path() {
        let args = Args::try_parse_from(["jsontree"]).unwrap();
        assert!(args.path.is_none());

        let args = Args::try_parse_from(["jsontree", "-vv", "--json", "tree.json"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("tree.json")));
        assert_eq!(args.verbose, 2);
        assert!(args.json);
    }
}
