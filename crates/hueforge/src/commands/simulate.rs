use crate::output::write_palette;
use crate::Result;
use libhueforge::accessibility::simulate_palette;
use libhueforge::{Color, Deficiency};
use owo_colors::{OwoColorize as _, Stream};

pub struct SimulateArgs<'a, W: std::io::Write> {
    pub colors: &'a [Color],
    /// Every deficiency when `None`.
    pub deficiency: Option<Deficiency>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: SimulateArgs<W>) -> Result<()> {
    let deficiencies = match args.deficiency {
        Some(deficiency) => vec![deficiency],
        None => Deficiency::ALL.to_vec(),
    };

    for deficiency in deficiencies {
        writeln!(
            args.stdout,
            "{}",
            deficiency.if_supports_color(Stream::Stdout, |s| s.bold())
        )?;
        write_palette(args.stdout, &simulate_palette(args.colors, deficiency))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previews_a_single_deficiency() {
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        run(SimulateArgs {
            colors: &[Color::new(255, 0, 0)],
            deficiency: Some(Deficiency::Protanopia),
            stdout: &mut fake_stdout,
        })
        .unwrap();

        let output = String::from_utf8(fake_stdout.into_inner()).unwrap();
        assert!(output.lines().next().unwrap().contains("protanopia"));
        assert!(output.contains("#910000"), "{}", output);
        assert!(!output.contains("tritanopia"));
    }

    #[test]
    fn previews_every_deficiency_by_default() {
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        run(SimulateArgs {
            colors: &[Color::WHITE, Color::BLACK],
            deficiency: None,
            stdout: &mut fake_stdout,
        })
        .unwrap();

        let output = String::from_utf8(fake_stdout.into_inner()).unwrap();
        for deficiency in Deficiency::ALL {
            assert!(output.contains(&deficiency.to_string()));
        }
        assert_eq!(output.lines().count(), 4 * 3);
    }
}
