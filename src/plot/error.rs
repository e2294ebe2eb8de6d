use plotters::drawing::DrawingAreaErrorKind;
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create figure directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to draw figure: {0}")]
    Drawing(String),
}

impl<E: Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(value.to_string())
    }
}
