use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use owo_colors::{OwoColorize as _, Stream};
use std::path::PathBuf;

use hueforge::commands::contrast::{run as contrast, ContrastArgs};
use hueforge::commands::export::{run as export, ExportArgs};
use hueforge::commands::extract::{run as extract, ExtractArgs};
use hueforge::commands::generate::{run as generate, GenerateArgs};
use hueforge::commands::gradient::{run as gradient, GradientArgs};
use hueforge::commands::saved::{run as saved, SavedArgs};
use hueforge::commands::shell::{run as shell, ShellArgs};
use hueforge::commands::simulate::{run as simulate, SimulateArgs};
use hueforge::commands::theme::{run as theme, ThemeArgs};
use libhueforge::gradient::DEFAULT_DIRECTION;
use libhueforge::{Color, Deficiency, GradientKind, HarmonyScheme, Settings, SETTINGS_FILE_NAME};

#[derive(Parser, Debug, Clone)]
#[command(about = "Hueforge, a color palette workbench", long_about = None)]
#[command(version)]
struct Args {
    #[clap(long, global = true, default_value = "auto")]
    color: ColorMode,

    /// Settings file to read
    #[clap(long, global = true, default_value = SETTINGS_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum ColorMode {
    Always,
    Auto,
    Never,
}

impl ColorMode {
    fn init(self) {
        // Set a supports-color override based on the variable passed in.
        match self {
            ColorMode::Always => owo_colors::set_override(true),
            ColorMode::Auto => {}
            ColorMode::Never => owo_colors::set_override(false),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Generate a palette from a color harmony. Defaults to the configured scheme.
    Generate {
        scheme: Option<HarmonyScheme>,
        /// Seed the random draws to get a repeatable palette
        #[arg(long)]
        seed: Option<u64>,
        /// Also show the palette as seen with a color vision deficiency
        #[arg(long, short)]
        deficiency: Option<Deficiency>,
        /// Save the palette to the library
        #[arg(long)]
        save: bool,
    },
    /// Score the contrast between two colors against WCAG
    Contrast { foreground: Color, background: Color },
    /// Preview colors with a color vision deficiency. Defaults to all of them.
    Simulate {
        #[arg(required = true)]
        colors: Vec<Color>,
        #[arg(long, short)]
        deficiency: Option<Deficiency>,
    },
    /// Extract the dominant colors of an image
    Extract {
        image: PathBuf,
        /// Save the palette to the library
        #[arg(long)]
        save: bool,
    },
    /// Print a CSS gradient through the given colors
    Gradient {
        #[arg(required = true)]
        colors: Vec<Color>,
        /// linear, radial or conic
        #[arg(long, default_value = "linear")]
        kind: String,
        #[arg(long, default_value = DEFAULT_DIRECTION)]
        direction: String,
    },
    /// Export colors as a PNG swatch strip
    Export {
        #[arg(required = true)]
        colors: Vec<Color>,
        /// Defaults to the configured export directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List saved palettes
    Saved,
    /// Show the theme preference
    Theme {
        /// Switch between light and dark
        #[arg(long)]
        toggle: bool,
    },
    /// Edit a palette interactively
    Shell {
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    args.color.init();

    if let Err(e) = run(args) {
        eprintln!(
            "{} {}",
            "Error:".if_supports_color(Stream::Stderr, |s| s.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(args: Args) -> hueforge::Result<()> {
    let settings = Settings::load(&args.config)?;
    let data_dir = settings.data_dir();
    log::debug!("Using data directory {}", data_dir.display());

    let mut stdout = std::io::stdout();

    match args.command {
        Some(Commands::Generate {
            scheme,
            seed,
            deficiency,
            save,
        }) => generate(GenerateArgs {
            scheme: scheme.unwrap_or(settings.harmony),
            seed,
            deficiency: deficiency.unwrap_or(settings.deficiency),
            save_to: save.then_some(data_dir.as_path()),
            stdout: &mut stdout,
        }),
        Some(Commands::Contrast {
            foreground,
            background,
        }) => contrast(ContrastArgs {
            foreground,
            background,
            stdout: &mut stdout,
        }),
        Some(Commands::Simulate { colors, deficiency }) => simulate(SimulateArgs {
            colors: &colors,
            deficiency,
            stdout: &mut stdout,
        }),
        Some(Commands::Extract { image, save }) => extract(ExtractArgs {
            image: &image,
            save_to: save.then_some(data_dir.as_path()),
            stdout: &mut stdout,
        }),
        Some(Commands::Gradient {
            colors,
            kind,
            direction,
        }) => gradient(GradientArgs {
            colors: &colors,
            kind: GradientKind::from_name(&kind),
            direction: &direction,
            stdout: &mut stdout,
        }),
        Some(Commands::Export { colors, out_dir }) => {
            let mut export_settings = settings.export.clone();
            if let Some(out_dir) = out_dir {
                export_settings.out_dir = out_dir;
            }

            export(ExportArgs {
                colors: &colors,
                settings: &export_settings,
                stdout: &mut stdout,
            })
        }
        Some(Commands::Saved) => saved(SavedArgs {
            data_dir: &data_dir,
            stdout: &mut stdout,
        }),
        Some(Commands::Theme { toggle }) => theme(ThemeArgs {
            data_dir: &data_dir,
            toggle,
            stdout: &mut stdout,
        }),
        Some(Commands::Shell { seed }) => shell(ShellArgs {
            settings: &settings,
            seed,
            stdin: std::io::stdin().lock(),
            stdout: &mut stdout,
        }),
        None => {
            Args::command().print_help()?;
            std::process::exit(1);
        }
    }
}
