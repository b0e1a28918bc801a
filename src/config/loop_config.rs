use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::core::Fps;
use crate::foundation::error::{TreevisError, TreevisResult};

/// Frame-loop settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    /// Logical frame rate the scheduler throttles to.
    pub target_fps: Fps,
    /// Rate of the simulated display refresh that drives paint callbacks.
    pub refresh_hz: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: Fps { num: 45, den: 1 },
            refresh_hz: 60,
        }
    }
}

impl LoopConfig {
    /// Reject a zero or malformed frame rate and a zero refresh rate.
    pub fn validate(&self) -> TreevisResult<()> {
        Fps::new(self.target_fps.num, self.target_fps.den)?;
        if self.refresh_hz == 0 {
            return Err(TreevisError::validation("refresh_hz must be > 0"));
        }
        Ok(())
    }

    /// Minimum spacing between logical frames.
    pub fn frame_interval(&self) -> Duration {
        self.target_fps.frame_interval()
    }

    /// Spacing between simulated paint callbacks.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.refresh_hz.max(1)))
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(src: &str) -> TreevisResult<Self> {
        let cfg: Self =
            serde_json::from_str(src).map_err(|e| TreevisError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config from disk.
    pub fn load(path: &Path) -> TreevisResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read loop config {}", path.display()))?;
        Self::from_json_str(&src)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/loop_config.rs"]
mod tests;
