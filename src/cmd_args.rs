use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name to read from the profile file. Default is 'default'.
    /// A missing profile falls back to built-in defaults.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 's', long, help = "analysis service URL, overrides the profile")]
    server: Option<String>,

    #[clap(long, help = "milliseconds of idle typing before reasoning is requested")]
    debounce_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
    debounce_ms: Option<u64>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
            debounce_ms: args.debounce_ms,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn debounce_ms(&self) -> Option<u64> {
        self.debounce_ms
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_long_flags() {
        let args = CommandLineArgs::parse_from([
            "program",
            "--profile",
            "test",
            "--server",
            "http://localhost:8000",
            "--debounce-ms",
            "300",
        ]);
        assert_eq!(args.profile(), "test");
        assert_eq!(args.server(), Some("http://localhost:8000"));
        assert_eq!(args.debounce_ms(), Some(300));
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-s", "http://x"]);
        assert_eq!(args.profile(), "dev");
        assert_eq!(args.server(), Some("http://x"));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.profile(), "default");
        assert_eq!(args.server(), None);
        assert_eq!(args.debounce_ms(), None);
    }
}
