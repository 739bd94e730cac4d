//! # Codeline Main Entry Point
//!
//! Terminal code editor with live reasoning and on-demand debug output.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use codeline::{
    cmd_args::CommandLineArgs,
    config::{self, Profile},
    AppController, EditorSession, HttpAnalysisClient, TerminalEventStream,
};
use tracing_subscriber::{
    fmt::{time::ChronoLocal, writer::BoxMakeWriter},
    EnvFilter,
};

/// Log destination; logs are discarded when unset, the terminal belongs to
/// the editor
const LOG_FILE_ENV_VAR: &str = "CODELINE_LOG_FILE";

/// Dependencies that would drown our own logs
const QUIET_TARGETS: &[&str] = &[
    "reqwest", "hyper", "hyper_util", "tokio", "tokio_util", "tokio_rustls", "rustls", "tower",
    "h2",
];

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber()?;

    let cmd_args = CommandLineArgs::parse();
    let profile = load_profile(&cmd_args, &config::get_profile_path())?;
    tracing::info!(server = %profile.server, debounce = ?profile.debounce, "starting editor");

    let client = HttpAnalysisClient::new(&profile.server, profile.timeout)?;
    let session = EditorSession::new(client, profile.debounce);
    let size = crossterm::terminal::size()?;

    let mut app = AppController::new(
        session,
        TerminalEventStream::new(),
        std::io::stdout(),
        size,
    );
    app.run().await
}

fn load_profile(cmd_args: &CommandLineArgs, profile_path: &str) -> Result<Profile> {
    let profile = config::load_profile(cmd_args.profile(), profile_path)?;
    Ok(profile.with_overrides(cmd_args.server(), cmd_args.debounce_ms()))
}

fn init_tracing_subscriber() -> Result<()> {
    let mut filter = EnvFilter::from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ));
    for target in QUIET_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }

    let writer = match log_file(std::env::var_os(LOG_FILE_ENV_VAR)) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .init();
    Ok(())
}

/// Log file named by the environment, if any
fn log_file(value: Option<OsString>) -> Option<OsString> {
    value.filter(|path| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_targets_should_parse_as_directives() {
        for target in QUIET_TARGETS {
            let directive =
                format!("{target}=warn").parse::<tracing_subscriber::filter::Directive>();
            assert!(directive.is_ok(), "{target}");
        }
    }

    #[test]
    fn log_file_should_be_unset_without_a_path() {
        assert_eq!(log_file(None), None);
        assert_eq!(log_file(Some(OsString::new())), None);
        assert_eq!(
            log_file(Some(OsString::from("/tmp/codeline.log"))),
            Some(OsString::from("/tmp/codeline.log"))
        );
    }

    #[test]
    fn cli_overrides_should_apply_over_profile_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[dev]\nserver = http://profile:5000\ndebounce_ms = 300\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let args = CommandLineArgs::parse_from(["codeline", "-p", "dev", "-s", "http://cli:1"]);
        let profile = load_profile(&args, path).unwrap();

        assert_eq!(profile.server, "http://cli:1");
        assert_eq!(profile.debounce, std::time::Duration::from_millis(300));
    }

    #[test]
    fn missing_profile_should_fall_back_to_defaults_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile");

        let args = CommandLineArgs::parse_from(["codeline", "--debounce-ms", "50"]);
        let profile = load_profile(&args, path.to_str().unwrap()).unwrap();

        assert_eq!(profile.server, config::DEFAULT_SERVER);
        assert_eq!(profile.debounce, std::time::Duration::from_millis(50));
    }
}
