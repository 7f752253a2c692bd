use crate::{AlgoLabError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Workspace-wide settings, loadable from a TOML file.
///
/// Every field has a default so a partial file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory chart files are written into.
    pub output_dir: PathBuf,
    pub chart: ChartSettings,
    pub fractal: FractalSettings,
    pub dice: DiceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            chart: ChartSettings::default(),
            fractal: FractalSettings::default(),
            dice: DiceSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalSettings {
    /// Recursion depth of the Pythagoras tree.
    pub level: u32,
    /// Side of the root square; sized from the canvas when absent.
    pub side: Option<f64>,
}

impl Default for FractalSettings {
    fn default() -> Self {
        Self {
            level: 8,
            side: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceSettings {
    pub trials: u64,
    pub seed: Option<u64>,
}

impl Default for DiceSettings {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&raw)
            .map_err(|e| AlgoLabError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Loads `path` when given, otherwise falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_when_no_file() {
        let settings = Settings::load_or_default(None).unwrap();
        assert_eq!(settings.dice.trials, 1_000_000);
        assert_eq!(settings.fractal.level, 8);
        assert_eq!(settings.chart.width, 1024);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "output_dir = \"charts\"\n\n[dice]\ntrials = 5000\nseed = 42\n"
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("charts"));
        assert_eq!(settings.dice.trials, 5000);
        assert_eq!(settings.dice.seed, Some(42));
        // untouched section keeps its defaults
        assert_eq!(settings.chart, ChartSettings::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "dice = \"not a table\"").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, AlgoLabError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load(Path::new("/nonexistent/algolab.toml")).unwrap_err();
        assert!(matches!(err, AlgoLabError::Io(_)));
    }
}
