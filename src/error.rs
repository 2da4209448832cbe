use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free cell left on a board of {cells} cells")]
    BoardFull { cells: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
