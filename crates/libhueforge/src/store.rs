use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::accessibility::simulate_palette;
use crate::harmony::random_color;
use crate::history::{History, Snapshot};
use crate::library::SavedPalette;
use crate::{
    extract_dominant_colors, Color, Deficiency, Error, Gradient, GradientKind, HarmonyScheme,
    Palette, PixelBuffer, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// Change notifications for whatever view renders the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    PaletteChanged,
    GradientChanged,
    HistoryChanged { can_undo: bool, can_redo: bool },
    Notice { level: NoticeLevel, message: String },
}

/// Identifies one image extraction request. Only the most recently issued
/// ticket can change the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Applied { colors: usize },
    /// A newer extraction was started before this one finished.
    Superseded,
}

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// The palette, the gradient, and their undo history.
///
/// All mutation goes through `&mut self`, so there is exactly one writer at
/// a time. The history is seeded with the initial state and every recorded
/// operation snapshots the state it produces, which keeps the current
/// history entry equal to the live state.
///
/// Gradient stop edits (adding, removing, recoloring, moving a stop) are
/// applied immediately and are not recorded. An undo after such an edit
/// rolls the stops back together with the palette.
pub struct PaletteStore<R = StdRng> {
    palette: Palette,
    gradient: Gradient,
    history: History,
    rng: R,
    subscribers: Vec<Subscriber>,
    latest_extraction: u64,
}

impl PaletteStore<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PaletteStore<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PaletteStore<R> {
    pub fn with_rng(rng: R) -> Self {
        let mut store = PaletteStore {
            palette: Palette::default(),
            gradient: Gradient::default(),
            history: History::new(),
            rng,
            subscribers: vec![],
            latest_extraction: 0,
        };
        store.snapshot();

        store
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The palette as seen with the given color vision deficiency.
    pub fn simulated(&self, deficiency: Deficiency) -> Vec<Color> {
        simulate_palette(&self.palette, deficiency)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&StoreEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Replaces the palette with a freshly generated one.
    pub fn generate(&mut self, scheme: HarmonyScheme) -> Result<()> {
        let colors = scheme.generate(&mut self.rng);
        self.replace_palette(colors)
    }

    /// Appends `color`, or a random color when none is given.
    pub fn add_color(&mut self, color: Option<Color>) -> Result<Color> {
        if self.palette.is_full() {
            return Err(self.reject(Error::Capacity {
                max: Palette::MAX_COLORS,
            }));
        }

        let color = color.unwrap_or_else(|| random_color(&mut self.rng));
        self.palette.push(color).map_err(|e| self.reject(e))?;
        self.commit_palette();

        Ok(color)
    }

    pub fn remove_color(&mut self, index: usize) -> Result<Color> {
        let removed = self.palette.remove(index).map_err(|e| self.reject(e))?;
        self.commit_palette();

        Ok(removed)
    }

    /// Moves a color from one slot to another, shifting the ones in between.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        if from == to {
            return self.palette.check_index(from).map_err(|e| self.reject(e));
        }

        self.palette
            .move_color(from, to)
            .map_err(|e| self.reject(e))?;
        self.commit_palette();

        Ok(())
    }

    pub fn load(&mut self, saved: &SavedPalette) -> Result<()> {
        self.replace_palette(saved.colors.clone())?;
        self.notify(NoticeLevel::Success, "Palette loaded!".to_string());

        Ok(())
    }

    pub fn load_colors(&mut self, colors: Vec<Color>) -> Result<()> {
        self.replace_palette(colors)
    }

    /// Starts an image extraction. Decoding happens elsewhere, and its
    /// result is handed back through [PaletteStore::complete_extraction].
    pub fn begin_extraction(&mut self) -> ExtractionTicket {
        self.latest_extraction += 1;
        ExtractionTicket(self.latest_extraction)
    }

    /// Applies a finished decode, unless a newer extraction has been started.
    ///
    /// A failed decode is returned as is and leaves the palette untouched.
    pub fn complete_extraction(
        &mut self,
        ticket: ExtractionTicket,
        decoded: Result<PixelBuffer>,
    ) -> Result<ExtractionOutcome> {
        if ticket.0 != self.latest_extraction {
            log::debug!(
                "Discarding extraction {}, {} is newer",
                ticket.0,
                self.latest_extraction
            );
            return Ok(ExtractionOutcome::Superseded);
        }

        let pixels = decoded.map_err(|e| self.reject(e))?;
        let colors = self.extract_from_pixels(&pixels)?;

        Ok(ExtractionOutcome::Applied { colors })
    }

    /// Replaces the palette with the dominant colors of an image.
    ///
    /// An image with a single color bucket is padded with a random color to
    /// reach the palette minimum. One without any opaque pixels is rejected.
    pub fn extract_from_pixels(&mut self, pixels: &PixelBuffer) -> Result<usize> {
        let mut colors = extract_dominant_colors(pixels);
        if colors.is_empty() {
            return Err(self.reject(Error::NoColorsFound));
        }

        let extracted = colors.len();
        while colors.len() < Palette::MIN_COLORS {
            colors.push(random_color(&mut self.rng));
        }

        self.replace_palette(colors)?;
        self.notify(
            NoticeLevel::Success,
            format!("Extracted {} colors from image!", extracted),
        );

        Ok(extracted)
    }

    pub fn set_gradient_kind(&mut self, kind: GradientKind) {
        self.gradient.set_kind(kind);
        self.commit_gradient();
    }

    pub fn set_gradient_direction(&mut self, direction: &str) {
        self.gradient.set_direction(direction);
        self.commit_gradient();
    }

    pub fn add_gradient_stop(&mut self, color: Color, position: i32) {
        self.gradient.add_stop(color, position);
        self.emit(StoreEvent::GradientChanged);
    }

    pub fn add_random_gradient_stop(&mut self) {
        self.gradient.add_random_stop(&mut self.rng);
        self.emit(StoreEvent::GradientChanged);
    }

    pub fn remove_gradient_stop(&mut self, index: usize) -> Result<()> {
        self.gradient
            .remove_stop(index)
            .map_err(|e| self.reject(e))?;
        self.emit(StoreEvent::GradientChanged);

        Ok(())
    }

    pub fn set_gradient_stop_color(&mut self, index: usize, color: Color) -> Result<()> {
        self.gradient
            .set_stop_color(index, color)
            .map_err(|e| self.reject(e))?;
        self.emit(StoreEvent::GradientChanged);

        Ok(())
    }

    pub fn set_gradient_stop_position(&mut self, index: usize, position: i32) -> Result<()> {
        self.gradient
            .set_stop_position(index, position)
            .map_err(|e| self.reject(e))?;
        self.emit(StoreEvent::GradientChanged);

        Ok(())
    }

    fn replace_palette(&mut self, colors: Vec<Color>) -> Result<()> {
        let palette = Palette::new(colors).map_err(|e| self.reject(e))?;
        self.palette = palette;
        self.commit_palette();

        Ok(())
    }

    fn commit_palette(&mut self) {
        self.emit(StoreEvent::PaletteChanged);
        self.snapshot();
    }

    fn commit_gradient(&mut self) {
        self.emit(StoreEvent::GradientChanged);
        self.snapshot();
    }

    fn snapshot(&mut self) {
        self.history.record(Snapshot {
            palette: self.palette.clone(),
            gradient: self.gradient.clone(),
        });
        log::debug!(
            "Recorded history entry {:?} of {}",
            self.history.index(),
            self.history.len()
        );

        self.emit_history();
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.palette = snapshot.palette;
        self.gradient = snapshot.gradient;

        self.emit(StoreEvent::PaletteChanged);
        self.emit(StoreEvent::GradientChanged);
        self.emit_history();
    }

    fn emit_history(&mut self) {
        let event = StoreEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        };
        self.emit(event);
    }

    fn reject(&mut self, error: Error) -> Error {
        log::warn!("{}", error);
        self.notify(NoticeLevel::Warning, error.to_string());
        error
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.emit(StoreEvent::Notice { level, message });
    }

    fn emit(&mut self, event: StoreEvent) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }
}
