//! Runtime settings.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`FrameSettings::scheme`].
pub const SCHEME_ENV: &str = "TOOLFRAME_SCHEME";

/// Environment variable overriding [`FrameSettings::inbound_concurrency`].
pub const INBOUND_CONCURRENCY_ENV: &str = "TOOLFRAME_INBOUND_CONCURRENCY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Custom scheme of production frame origins.
    pub scheme: String,
    /// How many inbound requests are served at once.
    pub inbound_concurrency: usize,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            scheme: "applet".to_string(),
            inbound_concurrency: 16,
        }
    }
}

impl FrameSettings {
    /// Defaults, overridden from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`. Unparseable or empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(scheme) = lookup(SCHEME_ENV).filter(|s| !s.is_empty()) {
            self.scheme = scheme;
        }
        match lookup(INBOUND_CONCURRENCY_ENV).map(|v| v.trim().parse::<usize>()) {
            Some(Ok(n)) if n > 0 => self.inbound_concurrency = n,
            Some(_) => tracing::warn!(
                var = INBOUND_CONCURRENCY_ENV,
                "ignoring invalid inbound concurrency"
            ),
            None => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use std::collections::BTreeMap;

    fn lookup(vars: BTreeMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn defaults() {
        let settings = FrameSettings::default();
        assert_eq!(settings.scheme, "applet");
        assert_eq!(settings.inbound_concurrency, 16);
    }

    #[test]
    fn overrides() {
        let settings = FrameSettings::default().with_overrides(lookup(btree! {
            SCHEME_ENV => "tool",
            INBOUND_CONCURRENCY_ENV => "4",
        }));
        assert_eq!(settings.scheme, "tool");
        assert_eq!(settings.inbound_concurrency, 4);
    }

    #[test]
    fn bad_overrides_ignored() {
        let settings = FrameSettings::default().with_overrides(lookup(btree! {
            SCHEME_ENV => "",
            INBOUND_CONCURRENCY_ENV => "0",
        }));
        assert_eq!(settings, FrameSettings::default());
    }

    #[test]
    fn partial_deserialize() {
        let settings: FrameSettings = serde_json::from_str(r#"{"scheme": "dev"}"#).unwrap();
        assert_eq!(settings.scheme, "dev");
        assert_eq!(settings.inbound_concurrency, 16);
    }
}
