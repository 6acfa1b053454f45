use afterglow_engine::config::Config;
use clap::Parser;

/// Launch parameters.
///
/// The positional fragment mirrors the web build's URL hash; the flags set
/// the same switches. Both are OR-ed together.
#[derive(Debug, Parser)]
#[command(name = "afterglow", version, about = "Follow camera over a post-processed scene")]
pub struct LaunchArgs {
    /// `#debug` or `#cybertruck`.
    pub fragment: Option<String>,

    /// Enable the keyboard debug panel (F1 lists bindings).
    #[arg(long)]
    pub debug: bool,

    /// Use the alternate vehicle.
    #[arg(long)]
    pub cybertruck: bool,

    /// Touch mode: blur starts disabled.
    #[arg(long)]
    pub touch: bool,

    /// Log filter, env_logger syntax. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,
}

impl LaunchArgs {
    /// An unrecognized fragment falls back to the default config.
    pub fn config(&self) -> Config {
        let from_fragment = Config::from_fragment(self.fragment.as_deref().unwrap_or(""));
        let from_flags = Config {
            debug: self.debug,
            content_variant: self.cybertruck,
            touch: self.touch,
        };
        from_fragment.merged(from_flags)
    }
}
