//! Saved palettes and the theme preference.
//!
//! Both live in named slots of a [Storage]. When storage cannot be read or
//! written the library keeps working from memory and logs a warning, so a
//! broken data directory never takes the palette editor down with it.

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{Color, Error, Result};

pub const PALETTES_SLOT: &str = "colorPalettes";
pub const THEME_SLOT: &str = "darkMode";

/// String slots keyed by name.
pub trait Storage {
    fn read(&self, slot: &str) -> Result<Option<String>>;
    fn write(&mut self, slot: &str, value: &str) -> Result<()>;
}

/// One file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::PersistenceUnavailable(format!(
                "could not read {}: {}",
                self.slot_path(slot).display(),
                e
            ))),
        }
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(self.slot_path(slot), value))
            .map_err(|e| {
                Error::PersistenceUnavailable(format!(
                    "could not write {}: {}",
                    self.slot_path(slot).display(),
                    e
                ))
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPalette {
    /// Creation time in milliseconds since the epoch.
    pub id: i64,
    pub colors: Vec<Color>,
    pub name: String,
    /// ISO-8601 creation timestamp.
    pub created: String,
}

/// Saved palettes, most recent first.
pub struct PaletteLibrary<S: Storage> {
    storage: S,
    palettes: Vec<SavedPalette>,
    in_memory_only: bool,
}

impl<S: Storage> PaletteLibrary<S> {
    pub fn open(storage: S) -> Self {
        let mut library = PaletteLibrary {
            storage,
            palettes: vec![],
            in_memory_only: false,
        };

        match library.storage.read(PALETTES_SLOT) {
            Ok(None) => {}
            Ok(Some(json)) => match serde_json::from_str::<Vec<serde_json::Value>>(&json) {
                Ok(records) => library.palettes = parse_records(records),
                Err(e) => {
                    // Leave the unreadable data alone instead of overwriting it
                    log::warn!("Ignoring unreadable saved palettes: {}", e);
                    library.in_memory_only = true;
                }
            },
            Err(e) => {
                log::warn!("{}. Saved palettes will only be kept in memory", e);
                library.in_memory_only = true;
            }
        }

        library
    }

    pub fn palettes(&self) -> &[SavedPalette] {
        &self.palettes
    }

    pub fn find(&self, id: i64) -> Option<&SavedPalette> {
        self.palettes.iter().find(|p| p.id == id)
    }

    /// Whether saved palettes survive the process.
    pub fn is_persistent(&self) -> bool {
        !self.in_memory_only
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Saves `colors` as a new palette in front of the others.
    pub fn save(&mut self, colors: &[Color], now: DateTime<Utc>) -> &SavedPalette {
        let mut id = now.timestamp_millis();
        if let Some(newest) = self.palettes.iter().map(|p| p.id).max() {
            id = id.max(newest + 1);
        }

        let palette = SavedPalette {
            id,
            colors: colors.to_vec(),
            name: format!("Palette {}", self.palettes.len() + 1),
            created: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.palettes.insert(0, palette);
        self.persist();

        &self.palettes[0]
    }

    fn persist(&mut self) {
        if self.in_memory_only {
            return;
        }

        let result = serde_json::to_string(&self.palettes)
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))
            .and_then(|json| self.storage.write(PALETTES_SLOT, &json));

        if let Err(e) = result {
            log::warn!("{}. Saved palettes will only be kept in memory", e);
            self.in_memory_only = true;
        }
    }
}

/// Keeps the records that parse. One bad record should not hide the rest.
fn parse_records(records: Vec<serde_json::Value>) -> Vec<SavedPalette> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(palette) => Some(palette),
            Err(e) => {
                log::warn!("Skipping saved palette {}: {}", i + 1, e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The stored preference, if any. Unreadable storage counts as no preference.
    pub fn load(storage: &impl Storage) -> Option<Theme> {
        match storage.read(THEME_SLOT) {
            Ok(value) => value.and_then(|v| match v.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            }),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    pub fn store(self, storage: &mut impl Storage) -> Result<()> {
        storage.write(THEME_SLOT, &self.to_string())
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }
}
