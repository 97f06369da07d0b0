//! Per-rewriter configuration and sidecar port resolution.

/// Environment variable holding the sidecar's HTTP port.
pub const DEFAULT_PORT_ENV_VAR: &str = "DAPR_HTTP_PORT";

/// Port used when the environment does not name a usable one.
pub const DEFAULT_SIDECAR_PORT: u16 = 3500;

/// Host every rewritten request is sent to.
pub const SIDECAR_HOST: &str = "localhost";

/// Configuration owned by a single [`InvocationRewriter`](crate::InvocationRewriter).
///
/// Nothing here is global: two rewriters built from different configs
/// resolve their ports independently.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RewriterConfig {
    /// Name of the environment variable read for the sidecar port.
    pub port_env_var: String,

    /// Port used when the variable is unset or does not hold a valid port.
    pub default_port: u16,
}

impl RewriterConfig {
    /// Create a config reading `DAPR_HTTP_PORT` with a fallback of `3500`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            port_env_var: DEFAULT_PORT_ENV_VAR.to_owned(),
            default_port: DEFAULT_SIDECAR_PORT,
        }
    }

    /// Read the port from a different environment variable.
    #[must_use]
    pub fn with_port_env_var(mut self, name: impl Into<String>) -> Self {
        self.port_env_var = name.into();
        self
    }

    /// Use a different fallback port.
    #[must_use]
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Read the port from the environment right now, falling back to
    /// [`default_port`](Self::default_port).
    ///
    /// Callers cache the result; see [`InvocationRewriter::sidecar_port`](crate::InvocationRewriter::sidecar_port).
    #[must_use]
    pub fn resolve_port(&self) -> u16 {
        let raw = std::env::var(&self.port_env_var).ok();
        match parse_port(raw.as_deref()) {
            Some(port) => port,
            None => {
                tracing::debug!(
                    env_var = %self.port_env_var,
                    default_port = self.default_port,
                    "sidecar port not configured, using default"
                );
                self.default_port
            }
        }
    }
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a base-10 port number, ignoring surrounding whitespace.
///
/// Returns `None` for missing, empty, out-of-range or zero values.
#[must_use]
pub fn parse_port(raw: Option<&str>) -> Option<u16> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u16>().ok())
        .filter(|&port| port != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_port_accepts_decimal_with_whitespace() {
        assert_eq!(parse_port(Some("7000")), Some(7000));
        assert_eq!(parse_port(Some(" 3501\n")), Some(3501));
    }

    #[test]
    fn parse_port_rejects_garbage() {
        assert_eq!(parse_port(None), None);
        assert_eq!(parse_port(Some("")), None);
        assert_eq!(parse_port(Some("abc")), None);
        assert_eq!(parse_port(Some("-1")), None);
        assert_eq!(parse_port(Some("65536")), None);
        assert_eq!(parse_port(Some("0")), None);
    }

    #[test]
    fn resolve_port_unset_variable_uses_default() {
        let config = RewriterConfig::new()
            .with_port_env_var("INVOKE_REWRITER_TEST_UNSET_PORT")
            .with_default_port(4100);
        assert_eq!(config.resolve_port(), 4100);
    }

    #[test]
    fn default_config_matches_sidecar_conventions() {
        let config = RewriterConfig::default();
        assert_eq!(config.port_env_var, "DAPR_HTTP_PORT");
        assert_eq!(config.default_port, 3500);
    }
}
