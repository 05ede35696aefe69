use crate::output::{write_notice, write_palette};
use crate::Result;
use libhueforge::{FileStorage, PaletteLibrary, PaletteStore, PixelBuffer, StoreEvent};

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

pub struct ExtractArgs<'a, W: std::io::Write> {
    pub image: &'a Path,
    pub save_to: Option<&'a Path>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: ExtractArgs<W>) -> Result<()> {
    let mut store = PaletteStore::new();

    let notices = Rc::new(RefCell::new(vec![]));
    let sink = notices.clone();
    store.subscribe(move |event| {
        if let StoreEvent::Notice { level, message } = event {
            sink.borrow_mut().push((*level, message.clone()));
        }
    });

    let ticket = store.begin_extraction();
    let outcome = store.complete_extraction(ticket, PixelBuffer::open(args.image))?;
    log::debug!("Extraction of {}: {:?}", args.image.display(), outcome);

    for (level, message) in notices.borrow().iter() {
        write_notice(args.stdout, *level, message)?;
    }
    write_palette(args.stdout, store.palette())?;

    if let Some(data_dir) = args.save_to {
        let mut library = PaletteLibrary::open(FileStorage::new(data_dir));
        let saved = library.save(store.palette(), chrono::Utc::now());
        writeln!(args.stdout, "Saved as {} ({})", saved.name, saved.id)?;
    }

    Ok(())
}
