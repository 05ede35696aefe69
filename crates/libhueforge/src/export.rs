use chrono::{DateTime, Utc};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::{Color, Error, Result};

pub const SWATCH_WIDTH: u32 = 100;
pub const SWATCH_HEIGHT: u32 = 100;

/// Largest strip we are willing to allocate.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Lays the colors out left to right as equally sized swatches.
pub fn render_swatches(
    colors: &[Color],
    swatch_width: u32,
    swatch_height: u32,
) -> Result<RgbaImage> {
    let swatch_width = swatch_width.max(1);
    let height = swatch_height.max(1);
    let too_large = || Error::ExportTooLarge {
        swatch_width,
        swatch_height: height,
        colors: colors.len(),
    };

    let width = u32::try_from(colors.len())
        .ok()
        .and_then(|count| swatch_width.checked_mul(count))
        .ok_or_else(too_large)?;
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(too_large());
    }

    Ok(RgbaImage::from_fn(width, height, |x, _| {
        let color = colors[(x / swatch_width) as usize];
        Rgba([color.red, color.green, color.blue, 255])
    }))
}

pub fn file_name(now: DateTime<Utc>) -> String {
    format!("color-palette-{}.png", now.timestamp_millis())
}

/// Writes the swatch strip as a PNG into `out_dir` and returns its path.
pub fn export_png(
    colors: &[Color],
    out_dir: &Path,
    swatch_width: u32,
    swatch_height: u32,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let image = render_swatches(colors, swatch_width, swatch_height)?;
    std::fs::create_dir_all(out_dir)?;

    let path = out_dir.join(file_name(now));
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(Error::Encode)?;

    log::debug!("Exported {} swatches to {}", colors.len(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use temp_dir::TempDir;

    #[test]
    fn one_swatch_per_color() {
        let colors = [Color::new(255, 0, 0), Color::new(0, 0, 255)];
        let image = render_swatches(&colors, SWATCH_WIDTH, SWATCH_HEIGHT).unwrap();

        assert_eq!(image.dimensions(), (200, 100));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(99, 99), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(100, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(image.get_pixel(199, 50), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn refuses_oversized_strips() {
        let settings = Settings::parse("export:\n  swatch_width: 500000000\n").unwrap();
        let colors = [Color::WHITE; 10];

        let error = render_swatches(&colors, settings.export.swatch_width, 1).unwrap_err();
        assert!(
            matches!(
                error,
                Error::ExportTooLarge {
                    swatch_width: 500_000_000,
                    colors: 10,
                    ..
                }
            ),
            "unexpected error: {}",
            error
        );

        // Fits in a u32 but not in memory
        assert!(render_swatches(&colors, 100_000, 1_000).is_err());
    }

    #[test]
    fn oversized_strips_write_nothing() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("exports");
        let now = Utc.timestamp_millis_opt(7).unwrap();

        assert!(export_png(&[Color::BLACK; 2], &out_dir, u32::MAX, u32::MAX, now).is_err());
        assert!(!out_dir.exists());
    }

    #[test]
    fn names_files_by_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(file_name(now), "color-palette-1700000000123.png");
    }

    #[test]
    fn writes_a_readable_png() {
        let dir = TempDir::new().unwrap();
        let now = Utc.timestamp_millis_opt(7).unwrap();
        let colors = [Color::WHITE, Color::BLACK, Color::new(0x66, 0x7e, 0xea)];

        let path = export_png(&colors, dir.path(), 10, 20, now).unwrap();
        assert_eq!(path, dir.path().join("color-palette-7.png"));

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (30, 20));
        assert_eq!(decoded.get_pixel(25, 5), &Rgba([0x66, 0x7e, 0xea, 255]));
    }
}
