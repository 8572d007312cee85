//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `docrun`.
#[derive(Debug, Parser)]
#[command(
    name = "docrun",
    version,
    about = "Run the documentation project's lint, lock and build sessions"
)]
pub struct Cli {
    /// Sessions to run, by name or `name(value)`; defaults apply when empty.
    #[arg(value_name = "SESSIONS")]
    pub sessions: Vec<String>,

    /// Additional session to run; may be repeated.
    #[arg(short = 's', long = "session", value_name = "NAME")]
    pub session: Vec<String>,

    /// List sessions and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Re-use existing environments instead of recreating them.
    #[arg(short = 'r', long = "reuse-existing-virtualenvs")]
    pub reuse_existing_virtualenvs: bool,

    /// Only create environments and install dependencies.
    #[arg(long)]
    pub install_only: bool,

    /// Stop after the first failed session.
    #[arg(short = 'x', long)]
    pub stop_on_first_error: bool,

    /// Project root.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments passed to every selected session.
    #[arg(last = true, value_name = "POSARGS")]
    pub posargs: Vec<String>,
}

impl Cli {
    /// Sessions named positionally and through `--session`, in order.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        self.sessions.iter().chain(&self.session).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parses_sessions_and_posargs() {
        let cli = Cli::parse_from(["docrun", "pip-compile", "-s", "tag", "--", "--check", "-v"]);
        assert_eq!(cli.selected(), ["pip-compile", "tag"]);
        assert_eq!(cli.posargs, ["--check", "-v"]);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_runner_flags() {
        let cli = Cli::parse_from(["docrun", "-rx", "--install-only", "--root", "/src/docs", "-l"]);
        assert!(cli.reuse_existing_virtualenvs);
        assert!(cli.stop_on_first_error);
        assert!(cli.install_only);
        assert!(cli.list);
        assert_eq!(cli.root, std::path::PathBuf::from("/src/docs"));
        assert!(cli.selected().is_empty());
    }
}
