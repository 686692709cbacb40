use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("failed to create event loop")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to open window")]
    Window(#[from] winit::error::OsError),
    #[error("failed to acquire a drawing surface")]
    Surface(#[from] pixels::Error),
    #[error("failed to read font {path}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a usable font")]
    FontParse { path: PathBuf },
}

pub type Result<T, E = GaugeError> = std::result::Result<T, E>;
