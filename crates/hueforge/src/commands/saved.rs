use crate::output::swatch;
use crate::Result;
use libhueforge::{FileStorage, PaletteLibrary, SavedPalette};
use owo_colors::{OwoColorize as _, Stream};

use std::path::Path;

pub struct SavedArgs<'a, W: std::io::Write> {
    pub data_dir: &'a Path,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: SavedArgs<W>) -> Result<()> {
    let library = PaletteLibrary::open(FileStorage::new(args.data_dir));
    write_saved(args.stdout, library.palettes())?;

    Ok(())
}

/// Most recent first, one line per palette.
pub(crate) fn write_saved<W: std::io::Write>(
    stdout: &mut W,
    palettes: &[SavedPalette],
) -> std::io::Result<()> {
    if palettes.is_empty() {
        return writeln!(stdout, "No saved palettes yet");
    }

    for palette in palettes {
        let swatches: String = palette.colors.iter().map(|c| swatch(*c)).collect();

        writeln!(
            stdout,
            "{:<12} {}  {}  {}",
            palette.name.if_supports_color(Stream::Stdout, |s| s.bold()),
            palette.id,
            palette.created,
            swatches
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use libhueforge::Color;
    use temp_dir::TempDir;

    fn list(data_dir: &Path) -> String {
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        run(SavedArgs {
            data_dir,
            stdout: &mut fake_stdout,
        })
        .unwrap();

        String::from_utf8(fake_stdout.into_inner()).unwrap()
    }

    #[test]
    fn says_when_nothing_is_saved() {
        let data_dir = TempDir::new().unwrap();
        assert_eq!(list(data_dir.path()), "No saved palettes yet\n");
    }

    #[test]
    fn lists_the_newest_first() {
        let data_dir = TempDir::new().unwrap();
        let mut library = PaletteLibrary::open(FileStorage::new(data_dir.path()));
        library.save(
            &[Color::WHITE, Color::BLACK],
            chrono::Utc.timestamp_millis_opt(1_000).unwrap(),
        );
        library.save(
            &[Color::BLACK, Color::WHITE],
            chrono::Utc.timestamp_millis_opt(2_000).unwrap(),
        );

        let output = list(data_dir.path());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Palette 2"));
        assert!(lines[0].contains("2000  1970-01-01T00:00:02.000Z"));
        assert!(lines[1].contains("Palette 1"));
    }
}
