use crate::exclude::{DEFAULT_EXCLUDE_PATTERNS, load_pattern_file};
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};

/// Name of the document written when no output path is given.
pub const DEFAULT_OUTPUT_FILENAME: &str = "code_documentation.md";

pub struct Config {
    pub output_path: PathBuf,
    pub project_root: PathBuf,
    /// Exclusion patterns in evaluation order
    pub exclude_patterns: Vec<String>,
    /// Abort on the first unreadable directory or file instead of skipping it
    pub fail_fast: bool,
    pub verbosity: u8,
}

impl Config {
    /// Defaults for walking `project_root`: the built-in patterns, fail-fast,
    /// and the output document at the top of the root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            output_path: project_root.join(DEFAULT_OUTPUT_FILENAME),
            project_root,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            fail_fast: true,
            verbosity: 0,
        }
    }
}

pub fn build_command() -> Command {
    Command::new("sitemap2md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Writes every file of a project tree into a single Markdown sitemap")
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Directory to walk (defaults to the current directory)")
                .num_args(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Sets the output .md file path")
                .num_args(1),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("PATTERN")
                .help("Adds an exclusion regex matched against file and directory names")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-from")
                .long("exclude-from")
                .value_name("FILE")
                .help("Reads extra exclusion patterns from a file, one per line")
                .num_args(1),
        )
        .arg(
            Arg::new("no-default-excludes")
                .long("no-default-excludes")
                .help("Starts from an empty exclusion list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .help("Skips unreadable directories and files with a warning instead of aborting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increases log output (repeatable)")
                .action(ArgAction::Count),
        )
}

pub fn parse_args() -> Result<Config> {
    let matches = build_command().get_matches();
    let cwd = std::env::current_dir()?;
    config_from_matches(&matches, &cwd)
}

/// Builds a `Config` from parsed arguments. Relative paths resolve against `cwd`.
pub fn config_from_matches(matches: &ArgMatches, cwd: &Path) -> Result<Config> {
    let project_root = matches
        .get_one::<String>("root")
        .map(|root| cwd.join(root))
        .unwrap_or_else(|| cwd.to_path_buf());

    let output_path = matches
        .get_one::<String>("output")
        .map(|out| cwd.join(out))
        .unwrap_or_else(|| cwd.join(DEFAULT_OUTPUT_FILENAME));

    let mut exclude_patterns: Vec<String> = if matches.get_flag("no-default-excludes") {
        Vec::new()
    } else {
        DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect()
    };

    if let Some(file) = matches.get_one::<String>("exclude-from") {
        exclude_patterns.extend(load_pattern_file(&cwd.join(file))?);
    }

    if let Some(extra) = matches.get_many::<String>("exclude") {
        exclude_patterns.extend(extra.cloned());
    }

    Ok(Config {
        output_path,
        project_root,
        exclude_patterns,
        fail_fast: !matches.get_flag("keep-going"),
        verbosity: matches.get_count("verbose"),
    })
}
