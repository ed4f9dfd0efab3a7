use std::path::PathBuf;

use clap::Parser;

use wiggum::agent::{self, LoopConfig};
use wiggum::build_info;

#[derive(Parser)]
#[command(
    name = "wiggum",
    version,
    about = "Automated task completion loop driving an external coding agent"
)]
struct Cli {
    /// Path to prd.json (default: $PRD_PATH or plans/prd.json); a bare
    /// integer here is read as the iteration cap instead
    prd: Option<String>,
    /// Maximum number of iterations
    iterations: Option<u32>,
    /// Agent command the prompt is appended to (falls back to
    /// $WIGGUM_AGENT_CMD, then the opencode default)
    #[arg(long)]
    agent_cmd: Option<String>,
}

fn default_prd_path() -> PathBuf {
    if let Ok(from_env) = std::env::var("PRD_PATH")
        && !from_env.trim().is_empty()
    {
        return PathBuf::from(from_env);
    }
    PathBuf::from("plans/prd.json")
}

/// `wiggum 20` means "default path, 20 iterations"; `wiggum prd.json 20`
/// means both. Mirrors the original loose positional parsing.
fn resolve_args(prd: Option<String>, iterations: Option<u32>) -> (PathBuf, u32) {
    match (prd, iterations) {
        (Some(first), None) => match first.parse::<u32>() {
            Ok(n) => (default_prd_path(), n),
            Err(_) => (PathBuf::from(first), agent::DEFAULT_MAX_ITERATIONS),
        },
        (Some(first), Some(n)) => (PathBuf::from(first), n),
        (None, _) => (default_prd_path(), agent::DEFAULT_MAX_ITERATIONS),
    }
}

fn resolve_agent_cmd(explicit: Option<String>) -> Vec<String> {
    let raw = explicit
        .or_else(|| std::env::var("WIGGUM_AGENT_CMD").ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| agent::DEFAULT_AGENT_CMD.to_string());
    agent::parse_agent_cmd(&raw)
}

fn main() {
    let cli = Cli::parse();
    let (prd_path, max_iterations) = resolve_args(cli.prd, cli.iterations);
    let agent_cmd = resolve_agent_cmd(cli.agent_cmd);

    println!(
        "wiggum {}{}",
        env!("CARGO_PKG_VERSION"),
        build_info::git_sha()
            .map(|sha| format!(" ({})", &sha[..sha.len().min(12)]))
            .unwrap_or_default()
    );

    let config = LoopConfig {
        prd_path,
        log_path: PathBuf::from("progress.txt"),
        max_iterations,
        agent_cmd,
    };

    if let Err(e) = agent::run_loop(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_integer_is_an_iteration_cap() {
        let (path, iterations) = resolve_args(Some("20".into()), None);
        assert_eq!(iterations, 20);
        assert!(path.ends_with("prd.json"));
    }

    #[test]
    fn path_and_iterations_both_accepted() {
        let (path, iterations) = resolve_args(Some("my/prd.json".into()), Some(3));
        assert_eq!(path, PathBuf::from("my/prd.json"));
        assert_eq!(iterations, 3);
    }

    #[test]
    fn no_args_uses_defaults() {
        let (_, iterations) = resolve_args(None, None);
        assert_eq!(iterations, agent::DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn explicit_agent_cmd_overrides_default() {
        let cmd = resolve_agent_cmd(Some("echo hello".into()));
        assert_eq!(cmd, vec!["echo", "hello"]);
    }
}
