use thiserror::Error;

use crate::Coords;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not start the logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("terminal is {actual:?} but the board needs {needed:?} (columns, rows)")]
    TerminalTooSmall { needed: Coords, actual: Coords },
}
