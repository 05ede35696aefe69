use crate::Result;
use libhueforge::export::export_png;
use libhueforge::settings::ExportSettings;
use libhueforge::{Color, Palette};
use owo_colors::{OwoColorize as _, Stream};

pub struct ExportArgs<'a, W: std::io::Write> {
    pub colors: &'a [Color],
    pub settings: &'a ExportSettings,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: ExportArgs<W>) -> Result<()> {
    let palette = Palette::new(args.colors.to_vec())?;

    let path = export_png(
        &palette,
        &args.settings.out_dir,
        args.settings.swatch_width,
        args.settings.swatch_height,
        chrono::Utc::now(),
    )?;

    writeln!(
        args.stdout,
        "{} {}",
        "Exported to".if_supports_color(Stream::Stdout, |s| s.green()),
        path.display()
    )?;

    Ok(())
}
