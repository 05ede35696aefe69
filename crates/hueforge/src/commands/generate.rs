use crate::output::write_palette;
use crate::Result;
use libhueforge::{Deficiency, FileStorage, HarmonyScheme, PaletteLibrary, PaletteStore};
use owo_colors::{OwoColorize as _, Stream};

use std::path::Path;

pub struct GenerateArgs<'a, W: std::io::Write> {
    pub scheme: HarmonyScheme,
    /// Fixes the random draws, so the same seed gives the same palette.
    pub seed: Option<u64>,
    pub deficiency: Deficiency,
    /// Data directory to save the palette into, if it should be saved.
    pub save_to: Option<&'a Path>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: GenerateArgs<W>) -> Result<()> {
    let mut store = match args.seed {
        Some(seed) => PaletteStore::seeded(seed),
        None => PaletteStore::new(),
    };
    store.generate(args.scheme)?;

    writeln!(
        args.stdout,
        "{} palette",
        args.scheme.if_supports_color(Stream::Stdout, |s| s.bold())
    )?;
    write_palette(args.stdout, store.palette())?;

    if args.deficiency != Deficiency::Normal {
        writeln!(args.stdout, "As seen with {}", args.deficiency)?;
        write_palette(args.stdout, &store.simulated(args.deficiency))?;
    }

    if let Some(data_dir) = args.save_to {
        let mut library = PaletteLibrary::open(FileStorage::new(data_dir));
        let saved = library.save(store.palette(), chrono::Utc::now());

        writeln!(
            args.stdout,
            "{} Saved as {} ({})",
            "✓".if_supports_color(Stream::Stdout, |s| s.green()),
            saved.name,
            saved.id
        )?;

        if !library.is_persistent() {
            writeln!(
                args.stdout,
                "Could not write to {}, the palette was not kept",
                data_dir.display()
            )?;
        }
    }

    Ok(())
}
