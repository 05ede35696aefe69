use crate::output::swatch;
use crate::Result;
use libhueforge::{Color, ContrastReport};
use owo_colors::{OwoColorize as _, Stream};

pub struct ContrastArgs<'a, W: std::io::Write> {
    pub foreground: Color,
    pub background: Color,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: ContrastArgs<W>) -> Result<()> {
    let report = ContrastReport::new(args.foreground, args.background);
    write_report(args.stdout, &report)?;

    Ok(())
}

/// The ratio followed by a pass/fail line per WCAG grade.
pub(crate) fn write_report<W: std::io::Write>(
    stdout: &mut W,
    report: &ContrastReport,
) -> std::io::Result<()> {
    writeln!(
        stdout,
        "{} {} on {} {}",
        swatch(report.foreground),
        report.foreground,
        swatch(report.background),
        report.background
    )?;
    writeln!(
        stdout,
        "Contrast ratio {}",
        report
            .ratio_label()
            .if_supports_color(Stream::Stdout, |s| s.bold())
    )?;

    for (grade, passed) in report.grades() {
        if passed {
            writeln!(
                stdout,
                "  {:<11} {}",
                grade,
                "✓ pass".if_supports_color(Stream::Stdout, |s| s.green())
            )?;
        } else {
            writeln!(
                stdout,
                "  {:<11} {}",
                grade,
                "✗ fail".if_supports_color(Stream::Stdout, |s| s.red())
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contrast(foreground: &str, background: &str) -> String {
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        run(ContrastArgs {
            foreground: foreground.parse().unwrap(),
            background: background.parse().unwrap(),
            stdout: &mut fake_stdout,
        })
        .unwrap();

        String::from_utf8(fake_stdout.into_inner()).unwrap()
    }

    fn grade<'a>(output: &'a str, name: &str) -> &'a str {
        output
            .lines()
            .find(|line| line.trim_start().starts_with(&format!("{} ", name)))
            .unwrap_or_else(|| panic!("no {} line in {}", name, output))
    }

    #[test]
    fn grades_a_borderline_gray() {
        let output = contrast("#777777", "#ffffff");

        assert!(output.contains("#777777 on"), "{}", output);
        assert!(output.contains("4.48:1"), "{}", output);
        assert!(grade(&output, "AA Normal").contains("fail"));
        assert!(grade(&output, "AAA Normal").contains("fail"));
        assert!(grade(&output, "AA Large").contains("pass"));
    }

    #[test]
    fn black_on_white_passes_everything() {
        let output = contrast("#000", "#fff");

        assert!(output.contains("21.00:1"), "{}", output);
        assert_eq!(output.matches("pass").count(), 3);
    }
}
