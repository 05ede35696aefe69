use crate::Result;
use libhueforge::{FileStorage, Theme};

use std::path::Path;

pub struct ThemeArgs<'a, W: std::io::Write> {
    pub data_dir: &'a Path,
    pub toggle: bool,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: ThemeArgs<W>) -> Result<()> {
    let mut storage = FileStorage::new(args.data_dir);

    match (Theme::load(&storage), args.toggle) {
        (None, false) => writeln!(args.stdout, "No theme preference set")?,
        (Some(theme), false) => writeln!(args.stdout, "{}", theme)?,
        (current, true) => {
            let theme = current.unwrap_or(Theme::Light).toggled();
            theme.store(&mut storage)?;
            writeln!(args.stdout, "Switched to {} mode", theme)?;
        }
    }

    Ok(())
}
