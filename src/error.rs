use thiserror::Error;

/// Errors from the outer surfaces of the crate.
///
/// Widget logic itself never fails; these come from the event loop host and
/// from writing snapshots.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Event loop error: {0}")]
    Loop(#[from] calloop::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
