use crate::Result;
use libhueforge::{Color, Gradient, GradientKind, GradientStop};

pub struct GradientArgs<'a, W: std::io::Write> {
    pub colors: &'a [Color],
    pub kind: GradientKind,
    pub direction: &'a str,
    pub stdout: &'a mut W,
}

/// Spreads the colors evenly from 0% to 100% and prints the CSS.
pub fn run<W: std::io::Write>(args: GradientArgs<W>) -> Result<()> {
    let gradient = Gradient::new(even_stops(args.colors), args.kind, args.direction)?;
    writeln!(args.stdout, "{}", gradient.css())?;

    Ok(())
}

fn even_stops(colors: &[Color]) -> Vec<GradientStop> {
    let last = colors.len().saturating_sub(1).max(1) as i32;

    colors
        .iter()
        .enumerate()
        .map(|(i, color)| GradientStop::new(*color, i as i32 * 100 / last))
        .collect()
}
