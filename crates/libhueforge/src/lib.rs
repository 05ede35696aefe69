#[macro_use]
extern crate serde;

pub use serde_json;

pub mod accessibility;
pub mod color;
pub mod export;
pub mod extractor;
pub mod gradient;
pub mod harmony;
pub mod history;
pub mod keymap;
pub mod library;
pub mod settings;
pub mod store;
pub mod swatches;

pub use accessibility::{contrast_ratio, relative_luminance, ContrastReport, Deficiency};
pub use color::{Color, HslColor};
pub use extractor::{extract_dominant_colors, PixelBuffer};
pub use gradient::{Gradient, GradientKind, GradientStop};
pub use harmony::HarmonyScheme;
pub use history::{History, Snapshot};
pub use keymap::{Action, KeyChord};
pub use library::{FileStorage, MemoryStorage, PaletteLibrary, SavedPalette, Storage, Theme};
pub use settings::Settings;
pub use store::{ExtractionOutcome, ExtractionTicket, NoticeLevel, PaletteStore, StoreEvent};
pub use swatches::Palette;

use std::path::PathBuf;

pub const SETTINGS_FILE_NAME: &str = "hueforge.yaml";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Maximum {max} colors allowed")]
    Capacity { max: usize },
    #[error("Minimum {min} colors required")]
    MinimumSize { min: usize },
    #[error("A gradient needs at least {min} color stops")]
    GradientStops { min: usize },
    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid color `{0}`. Use #RRGGBB or #RGB")]
    InvalidColor(String),
    #[error("Unknown harmony scheme `{0}`")]
    UnknownScheme(String),
    #[error("Unknown color vision deficiency `{0}`")]
    UnknownDeficiency(String),
    #[error("Unknown theme `{0}`. Expected `light` or `dark`")]
    UnknownTheme(String),
    #[error("Invalid key chord `{0}`")]
    InvalidKeyChord(String),
    #[error("Pixel buffer of {len} bytes does not match a {width}x{height} RGBA image")]
    InvalidPixelBuffer { width: u32, height: u32, len: usize },
    #[error("Could not decode image: {0}")]
    Decode(image::ImageError),
    #[error("Could not encode image: {0}")]
    Encode(image::ImageError),
    #[error(
        "Exporting {colors} swatches of {swatch_width}x{swatch_height} pixels makes an image too large to write"
    )]
    ExportTooLarge {
        swatch_width: u32,
        swatch_height: u32,
        colors: usize,
    },
    #[error("No opaque pixels found in image")]
    NoColorsFound,
    #[error("Palette storage unavailable: {0}")]
    PersistenceUnavailable(String),
    #[error("Invalid settings file {}: {description}", file.display())]
    InvalidSettings { file: PathBuf, description: String },
    #[error("An IO error occurred: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Rejections the user can recover from by adjusting the palette.
    ///
    /// Front ends surface these as warnings rather than failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Capacity { .. }
                | Error::MinimumSize { .. }
                | Error::GradientStops { .. }
                | Error::NoColorsFound
        )
    }
}
