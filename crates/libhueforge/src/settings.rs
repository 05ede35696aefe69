use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::export::{SWATCH_HEIGHT, SWATCH_WIDTH};
use crate::{Deficiency, Error, HarmonyScheme, Result, SETTINGS_FILE_NAME};

/// Content of the `hueforge.yaml` file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Where saved palettes and the theme preference are stored.
    pub data_dir: Option<PathBuf>,
    /// Scheme used when generating without naming one.
    pub harmony: HarmonyScheme,
    /// Preview shown next to the palette.
    pub deficiency: Deficiency,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    pub swatch_width: u32,
    pub swatch_height: u32,
    pub out_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            swatch_width: SWATCH_WIDTH,
            swatch_height: SWATCH_HEIGHT,
            out_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_in(input, Path::new(SETTINGS_FILE_NAME))
    }

    /// Reads settings from `path`. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_in(&contents, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The configured data directory, or the platform data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("hueforge"))
                .unwrap_or_else(|| PathBuf::from(".hueforge"))
        })
    }

    fn parse_in(input: &str, file: &Path) -> Result<Self> {
        let invalid = |e: serde_yaml::Error| Error::InvalidSettings {
            file: file.to_path_buf(),
            description: e.to_string(),
        };

        if input.trim().is_empty() {
            return Ok(Settings::default());
        }

        // A file holding only `---` is a null document
        let value: Value = serde_yaml::from_str(input).map_err(invalid)?;
        if value.is_null() {
            return Ok(Settings::default());
        }

        serde_yaml::from_value(value).map_err(invalid)
    }
}
