mod error;
mod ports;
mod service;
mod session;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{Clock, ExportArtifact, FilterRenderer, FrameSource, ImageExporter};
pub use service::{ApplicationService, CaptureSummary, CountdownStatus};
pub use session::{EditorSession, SessionSettings, SessionSnapshot, ViewMode};
pub use use_cases::{
    ApplyFiltersCommand, ApplyPresetCommand, CaptureCommand, CropPreviewQuery,
    CycleAspectRatioCommand, DiscardCaptureCommand, ExportCommand, RedoCommand,
    RenderPreviewCommand, ResetFiltersCommand, SessionSnapshotQuery, SetAspectRatioCommand,
    SetChannelCommand, ShowOriginalCommand, StartCameraCommand, StartCountdownCommand,
    StopCameraCommand, SwitchCameraCommand, TickCountdownCommand, ToggleMirrorCommand,
    UndoCommand,
};
