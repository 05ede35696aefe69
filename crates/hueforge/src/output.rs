use libhueforge::{Color, NoticeLevel};
use owo_colors::{OwoColorize as _, Stream};
use std::io::Write;

/// A block of the color itself, when the terminal can show 24-bit color.
pub(crate) fn swatch(color: Color) -> String {
    let Color { red, green, blue } = color;

    "██"
        .if_supports_color(Stream::Stdout, |s| s.truecolor(red, green, blue))
        .to_string()
}

/// One numbered line per color. Numbers start at 1.
pub(crate) fn write_palette<W: Write>(stdout: &mut W, colors: &[Color]) -> std::io::Result<()> {
    for (i, color) in colors.iter().enumerate() {
        writeln!(
            stdout,
            "{:>3} {} {}  {:<18} {}",
            i + 1,
            swatch(*color),
            color.to_hex(),
            color.rgb_string(),
            color.to_hsl()
        )?;
    }

    Ok(())
}

pub(crate) fn write_notice<W: Write>(
    stdout: &mut W,
    level: NoticeLevel,
    message: &str,
) -> std::io::Result<()> {
    match level {
        NoticeLevel::Success => writeln!(
            stdout,
            "{} {}",
            "✓".if_supports_color(Stream::Stdout, |s| s.green()),
            message
        ),
        NoticeLevel::Warning => writeln!(
            stdout,
            "{} {}",
            "!".if_supports_color(Stream::Stdout, |s| s.yellow()),
            message.if_supports_color(Stream::Stdout, |s| s.yellow())
        ),
    }
}

pub(crate) fn write_error<W: Write>(stdout: &mut W, error: &crate::Error) -> std::io::Result<()> {
    writeln!(
        stdout,
        "{} {}",
        "✗".if_supports_color(Stream::Stdout, |s| s.red()),
        error
    )
}
