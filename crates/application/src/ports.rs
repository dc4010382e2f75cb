use std::path::{Path, PathBuf};

use lite_booth_domain::{FacingMode, Frame, PixelRect};

use crate::ApplicationError;

/// A live camera feed. `start` acquires the device, `stop` releases it.
pub trait FrameSource {
    fn start(&mut self, facing: FacingMode) -> Result<(), ApplicationError>;

    fn stop(&mut self);

    fn is_streaming(&self) -> bool;

    fn grab_frame(&mut self) -> Result<Frame, ApplicationError>;
}

/// Rasterizes a filter-function list onto a frame.
pub trait FilterRenderer {
    fn render(&self, frame: &Frame, style: &str) -> Result<Frame, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub crop: PixelRect,
}

pub trait ImageExporter {
    /// Encodes `frame` losslessly to `path` and returns the written size.
    fn export(&self, frame: &Frame, path: &Path) -> Result<(u32, u32), ApplicationError>;
}

pub trait Clock {
    fn now_millis(&self) -> u64;
}
