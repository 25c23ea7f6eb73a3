use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// OptionsFile — deserialized from TOML (all fields optional)
// ---------------------------------------------------------------------------

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct OptionsFile {
    pub animation_duration_ms: Option<u64>,
    pub easing: Option<String>,
    pub class_prefix: Option<String>,
}

// ---------------------------------------------------------------------------
// Options — resolved (all fields concrete)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Options {
    /// Duration of the track slide.
    pub animation_duration: Duration,
    /// Named CSS timing curve for the track slide.
    pub easing: String,
    /// Namespace for every generated class name.
    pub class_prefix: String,
}

impl Default for Options {
    fn default() -> Self {
        OptionsFile::default().resolve()
    }
}

impl OptionsFile {
    /// Parse options from TOML text. Unknown keys are ignored.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let file: OptionsFile =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("failed to parse options: {e}"))?;
        debug!("options: parsed from TOML");
        Ok(file)
    }

    /// Resolve to Options by applying defaults to missing fields.
    pub fn resolve(self) -> Options {
        let options = Options {
            animation_duration: Duration::from_millis(self.animation_duration_ms.unwrap_or(333)),
            easing: self.easing.unwrap_or_else(|| "ease".into()),
            class_prefix: self.class_prefix.unwrap_or_else(|| "pswp-animated".into()),
        };
        info!(
            "options: resolved animation_duration={}ms, easing={}, class_prefix={}",
            options.animation_duration.as_millis(),
            options.easing,
            options.class_prefix,
        );
        options
    }
}
