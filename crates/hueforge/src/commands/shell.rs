//! An interactive palette editor.
//!
//! The shell owns the palette store, the saved palette library and the theme
//! preference. Each input line runs one command. Changes are reported back
//! through the store's events, so a command only has to mutate the store and
//! the shell prints whatever changed afterwards.

use crate::commands::contrast::write_report;
use crate::commands::saved::write_saved;
use crate::output::{write_error, write_notice, write_palette};
use crate::{Error, Result};
use libhueforge::export::export_png;
use libhueforge::{
    Action, Color, ContrastReport, Deficiency, FileStorage, GradientKind, HarmonyScheme,
    KeyChord, NoticeLevel, PaletteLibrary, PaletteStore, PixelBuffer, Settings, StoreEvent, Theme,
};
use owo_colors::{OwoColorize as _, Stream};

use indoc::indoc;

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::Path;
use std::rc::Rc;

const PROMPT: &str = "hueforge> ";

const HELP: &str = indoc! {"
    Positions start at 1.

      show                          Show the palette and gradient
      generate [scheme]             New palette (random, monochromatic, complementary,
                                    triadic, analogous, split-complementary)
      add [#hex]                    Add a color, random when none is given
      remove <pos>                  Remove a color
      move <from> <to>              Move a color to another position
      undo, redo                    Step through the edit history
      extract <image>               Replace the palette with an image's dominant colors
      save                          Save the palette
      saved                         List saved palettes
      load <id>                     Load a saved palette
      gradient type <kind>          linear, radial or conic
      gradient direction <dir>      e.g. `to bottom` or `45deg`
      gradient add [#hex] [pos%]    Add a stop
      gradient remove <pos>         Remove a stop
      gradient color <pos> <#hex>   Recolor a stop
      gradient position <pos> <%>   Move a stop
      contrast <#fg> <#bg>          WCAG contrast between two colors
      simulate [deficiency]         Preview the palette with a color vision deficiency
      export                        Export the palette as a PNG
      theme                         Toggle dark mode
      key <chord>                   Run a keyboard shortcut, e.g. `ctrl+shift+z`
      help                          Show this message
      quit                          Leave the shell
"};

pub struct ShellArgs<'a, R: BufRead, W: Write> {
    pub settings: &'a Settings,
    /// Fixes the random draws, so a scripted session is repeatable.
    pub seed: Option<u64>,
    pub stdin: R,
    pub stdout: &'a mut W,
}

pub fn run<R: BufRead, W: Write>(args: ShellArgs<R, W>) -> Result<()> {
    let store = match args.seed {
        Some(seed) => PaletteStore::seeded(seed),
        None => PaletteStore::new(),
    };
    let mut shell = Shell::new(store, args.settings, args.stdout);

    if !shell.library.is_persistent() {
        writeln!(
            shell.stdout,
            "Saved palettes are unavailable and will only be kept for this session"
        )?;
    }
    shell.show()?;
    shell.prompt()?;

    for line in args.stdin.lines() {
        let line = line?;
        let result = shell.execute(line.trim());
        let warned = shell.flush_events()?;

        match result {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(Error::IoError(e)) => return Err(e.into()),
            // Already reported as a warning notice
            Err(e) if warned => log::debug!("{}", e),
            Err(e) => write_error(shell.stdout, &e)?,
        }

        shell.prompt()?;
    }

    writeln!(shell.stdout)?;
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

struct Shell<'a, W: Write> {
    store: PaletteStore,
    library: PaletteLibrary<FileStorage>,
    theme: Theme,
    settings: &'a Settings,
    events: Rc<RefCell<Vec<StoreEvent>>>,
    stdout: &'a mut W,
}

impl<'a, W: Write> Shell<'a, W> {
    fn new(mut store: PaletteStore, settings: &'a Settings, stdout: &'a mut W) -> Self {
        let events = Rc::new(RefCell::new(vec![]));
        let sink = events.clone();
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let library = PaletteLibrary::open(FileStorage::new(settings.data_dir()));
        let theme = Theme::load(library.storage()).unwrap_or(Theme::Light);

        Shell {
            store,
            library,
            theme,
            settings,
            events,
            stdout,
        }
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let rest: Vec<&str> = words.collect();

        match command {
            "show" => self.show()?,
            "generate" => {
                let scheme: HarmonyScheme = match rest.first() {
                    Some(name) => name.parse()?,
                    None => self.settings.harmony,
                };
                self.store.generate(scheme)?;
            }
            "add" => {
                let color = rest.first().map(|hex| Color::from_hex(hex)).transpose()?;
                self.store.add_color(color)?;
            }
            "remove" => {
                let index = position(rest.first())?;
                self.store.remove_color(index)?;
            }
            "move" => {
                let from = position(rest.first())?;
                let to = position(rest.get(1))?;
                self.store.reorder(from, to)?;
            }
            "undo" => self.run_action(Action::Undo)?,
            "redo" => self.run_action(Action::Redo)?,
            "extract" => {
                if rest.is_empty() {
                    return Err(usage("extract <image>"));
                }
                let path = rest.join(" ");

                let ticket = self.store.begin_extraction();
                let decoded = PixelBuffer::open(Path::new(&path));
                self.store.complete_extraction(ticket, decoded)?;
            }
            "save" => {
                let saved = self
                    .library
                    .save(self.store.palette(), chrono::Utc::now());
                let message = format!("Palette saved as {} ({})", saved.name, saved.id);
                write_notice(self.stdout, NoticeLevel::Success, &message)?;
            }
            "saved" => write_saved(self.stdout, self.library.palettes())?,
            "load" => {
                let id: i64 = rest
                    .first()
                    .and_then(|id| id.parse().ok())
                    .ok_or_else(|| usage("load <id>"))?;
                let saved = self
                    .library
                    .find(id)
                    .cloned()
                    .ok_or_else(|| Error::General(format!("No saved palette with id {}", id)))?;

                self.store.load(&saved)?;
            }
            "gradient" => self.gradient(&rest)?,
            "contrast" => {
                let [foreground, background] = rest[..] else {
                    return Err(usage("contrast <#fg> <#bg>"));
                };
                let report =
                    ContrastReport::new(Color::from_hex(foreground)?, Color::from_hex(background)?);
                write_report(self.stdout, &report)?;
            }
            "simulate" => {
                let deficiency: Deficiency = match rest.first() {
                    Some(name) => name.parse()?,
                    None => self.settings.deficiency,
                };
                writeln!(self.stdout, "As seen with {}", deficiency)?;
                write_palette(self.stdout, &self.store.simulated(deficiency))?;
            }
            "export" => {
                let export = &self.settings.export;
                let path = export_png(
                    self.store.palette(),
                    &export.out_dir,
                    export.swatch_width,
                    export.swatch_height,
                    chrono::Utc::now(),
                )?;
                let message = format!("Exported to {}", path.display());
                write_notice(self.stdout, NoticeLevel::Success, &message)?;
            }
            "theme" => self.run_action(Action::ToggleTheme)?,
            "key" => {
                let chord = KeyChord::parse(&rest.join(""))?;
                match chord.action() {
                    Some(action) => {
                        log::debug!("{} runs {}", chord, action);
                        self.run_action(action)?;
                    }
                    None => writeln!(self.stdout, "Nothing is bound to {}", chord)?,
                }
            }
            "help" => write!(self.stdout, "{}", HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                return Err(Error::General(format!(
                    "Unknown command `{}`. Type `help` to see what is available",
                    other
                )))
            }
        }

        Ok(Flow::Continue)
    }

    fn run_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Undo => {
                if !self.store.undo() {
                    writeln!(self.stdout, "Nothing to undo")?;
                }
            }
            Action::Redo => {
                if !self.store.redo() {
                    writeln!(self.stdout, "Nothing to redo")?;
                }
            }
            Action::Generate => self.store.generate(self.settings.harmony)?,
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(e) = self.theme.store(self.library.storage_mut()) {
                    log::warn!("Could not remember the theme: {}", e);
                }

                let message = match self.theme {
                    Theme::Dark => "Dark mode on",
                    Theme::Light => "Light mode on",
                };
                write_notice(self.stdout, NoticeLevel::Success, message)?;
            }
        }

        Ok(())
    }

    fn gradient(&mut self, args: &[&str]) -> Result<()> {
        match args {
            [] | ["show"] => writeln!(self.stdout, "{}", self.store.gradient().css())?,
            ["type", kind] => self.store.set_gradient_kind(GradientKind::from_name(kind)),
            ["direction", direction @ ..] if !direction.is_empty() => {
                self.store.set_gradient_direction(&direction.join(" "))
            }
            ["add"] => self.store.add_random_gradient_stop(),
            ["add", hex] => self.store.add_gradient_stop(Color::from_hex(hex)?, 50),
            ["add", hex, percent] => self
                .store
                .add_gradient_stop(Color::from_hex(hex)?, percentage(percent)?),
            ["remove", stop] => self.store.remove_gradient_stop(position(Some(stop))?)?,
            ["color", stop, hex] => self
                .store
                .set_gradient_stop_color(position(Some(stop))?, Color::from_hex(hex)?)?,
            ["position", stop, percent] => self
                .store
                .set_gradient_stop_position(position(Some(stop))?, percentage(percent)?)?,
            _ => return Err(usage("gradient <type|direction|add|remove|color|position> ...")),
        }

        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        write_palette(self.stdout, self.store.palette())?;

        if self.settings.deficiency != Deficiency::Normal {
            writeln!(self.stdout, "As seen with {}", self.settings.deficiency)?;
            write_palette(self.stdout, &self.store.simulated(self.settings.deficiency))?;
        }

        writeln!(self.stdout, "{}", self.store.gradient().css())?;
        Ok(())
    }

    /// Prints what the last command changed. Returns whether a warning was
    /// among the notices.
    fn flush_events(&mut self) -> Result<bool> {
        let events: Vec<StoreEvent> = self.events.borrow_mut().drain(..).collect();

        let mut warned = false;
        let mut palette_changed = false;
        let mut gradient_changed = false;

        for event in events {
            match event {
                StoreEvent::PaletteChanged => palette_changed = true,
                StoreEvent::GradientChanged => gradient_changed = true,
                StoreEvent::HistoryChanged { .. } => {}
                StoreEvent::Notice { level, message } => {
                    warned |= level == NoticeLevel::Warning;
                    write_notice(self.stdout, level, &message)?;
                }
            }
        }

        if palette_changed {
            write_palette(self.stdout, self.store.palette())?;
        }
        if gradient_changed {
            writeln!(self.stdout, "{}", self.store.gradient().css())?;
        }

        Ok(warned)
    }

    fn prompt(&mut self) -> Result<()> {
        let marker = match (self.store.can_undo(), self.store.can_redo()) {
            (true, true) => "↶↷ ",
            (true, false) => "↶ ",
            (false, true) => "↷ ",
            (false, false) => "",
        };

        write!(
            self.stdout,
            "{}{}",
            marker,
            PROMPT.if_supports_color(Stream::Stdout, |s| s.bold())
        )?;
        self.stdout.flush()?;

        Ok(())
    }
}

/// A 1-based position from the command line, as a 0-based index.
fn position(word: Option<&&str>) -> Result<usize> {
    word.and_then(|w| w.parse::<usize>().ok())
        .and_then(|p| p.checked_sub(1))
        .ok_or_else(|| Error::General("Positions are numbers starting at 1".to_string()))
}

fn percentage(word: &str) -> Result<i32> {
    word.trim_end_matches('%')
        .parse()
        .map_err(|_| Error::General(format!("`{}` is not a percentage", word)))
}

fn usage(text: &str) -> Error {
    Error::General(format!("Usage: {}", text))
}
