use thiserror::Error;

pub mod commands {
    pub mod contrast;
    pub mod export;
    pub mod extract;
    pub mod generate;
    pub mod gradient;
    pub mod saved;
    pub mod shell;
    pub mod simulate;
    pub mod theme;
}

mod output;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Palette(#[from] libhueforge::Error),
    #[error("{0}")]
    General(String),
}
