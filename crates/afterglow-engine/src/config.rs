//! Immutable launch configuration.
//!
//! Built once at startup from launch parameters and passed by value to every
//! component that needs it. Nothing in the engine reads process state (env,
//! args, window location) on its own.

/// Error produced while turning launch parameters into a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("launch fragment {0:?} must start with '#'")]
    MissingHash(String),
    #[error("unknown launch fragment {0:?} (expected #debug or #cybertruck)")]
    UnknownFragment(String),
}

/// Launch configuration snapshot.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Config {
    /// Constructs the live debug panel and registers its bindings.
    pub debug: bool,

    /// Selects the alternate content variant (the "cybertruck" vehicle).
    pub content_variant: bool,

    /// Touch input mode. Zeroes the default blur strength.
    pub touch: bool,
}

impl Config {
    /// Parses a URL-style fragment (`""`, `"#debug"`, `"#cybertruck"`).
    pub fn parse_fragment(fragment: &str) -> Result<Self, ConfigError> {
        if fragment.is_empty() {
            return Ok(Self::default());
        }

        let name = fragment
            .strip_prefix('#')
            .ok_or_else(|| ConfigError::MissingHash(fragment.to_string()))?;

        match name {
            "" => Ok(Self::default()),
            "debug" => Ok(Self { debug: true, ..Self::default() }),
            "cybertruck" => Ok(Self { content_variant: true, ..Self::default() }),
            _ => Err(ConfigError::UnknownFragment(fragment.to_string())),
        }
    }

    /// Like [`Config::parse_fragment`], but an unrecognized fragment only
    /// logs a warning and yields the default configuration.
    pub fn from_fragment(fragment: &str) -> Self {
        Self::parse_fragment(fragment).unwrap_or_else(|err| {
            log::warn!("{err}; using default config");
            Self::default()
        })
    }

    /// Combines two snapshots; a flag set in either is set in the result.
    pub fn merged(self, other: Config) -> Self {
        Self {
            debug: self.debug || other.debug,
            content_variant: self.content_variant || other.content_variant,
            touch: self.touch || other.touch,
        }
    }

    /// Default per-axis blur strength for this launch.
    pub fn default_blur_strength(&self) -> f32 {
        if self.touch { 0.0 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_is_default() {
        assert_eq!(Config::from_fragment(""), Config::default());
        assert_eq!(Config::from_fragment("#"), Config::default());
    }

    #[test]
    fn known_fragments() {
        assert!(Config::from_fragment("#debug").debug);
        assert!(Config::from_fragment("#cybertruck").content_variant);
    }

    #[test]
    fn malformed_fragments_are_reported() {
        assert_eq!(
            Config::parse_fragment("debug"),
            Err(ConfigError::MissingHash("debug".into()))
        );
        assert_eq!(
            Config::parse_fragment("#about"),
            Err(ConfigError::UnknownFragment("#about".into()))
        );
    }

    #[test]
    fn malformed_fragments_fall_back_to_default() {
        assert_eq!(Config::from_fragment("#about"), Config::default());
        assert_eq!(Config::from_fragment("debug"), Config::default());
    }

    #[test]
    fn merge_ors_flags() {
        let a = Config { debug: true, ..Config::default() };
        let b = Config { touch: true, ..Config::default() };
        let m = a.merged(b);
        assert!(m.debug && m.touch && !m.content_variant);
    }

    #[test]
    fn touch_mode_zeroes_blur() {
        assert_eq!(Config::default().default_blur_strength(), 1.0);
        assert_eq!(Config { touch: true, ..Config::default() }.default_blur_strength(), 0.0);
    }
}
