use std::path::PathBuf;

use lite_booth_domain::{AspectRatio, FilterChannel, FilterVector};

#[derive(Debug, Clone, Default)]
pub struct StartCameraCommand;

#[derive(Debug, Clone, Default)]
pub struct StopCameraCommand;

#[derive(Debug, Clone, Default)]
pub struct SwitchCameraCommand;

#[derive(Debug, Clone, Default)]
pub struct ToggleMirrorCommand;

#[derive(Debug, Clone, Default)]
pub struct StartCountdownCommand;

#[derive(Debug, Clone, Default)]
pub struct TickCountdownCommand;

#[derive(Debug, Clone, Default)]
pub struct CaptureCommand;

#[derive(Debug, Clone, Copy)]
pub struct SetChannelCommand {
    pub channel: FilterChannel,
    pub value: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ApplyFiltersCommand {
    pub filters: FilterVector,
}

#[derive(Debug, Clone)]
pub struct ApplyPresetCommand {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UndoCommand;

#[derive(Debug, Clone, Default)]
pub struct RedoCommand;

#[derive(Debug, Clone, Default)]
pub struct ResetFiltersCommand;

#[derive(Debug, Clone, Copy)]
pub struct SetAspectRatioCommand {
    pub ratio: AspectRatio,
}

#[derive(Debug, Clone, Default)]
pub struct CycleAspectRatioCommand;

#[derive(Debug, Clone, Copy)]
pub struct ShowOriginalCommand {
    pub enabled: bool,
}

/// `draft` previews filters without recording them, as during a slider drag.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderPreviewCommand {
    pub draft: Option<FilterVector>,
}

#[derive(Debug, Clone, Default)]
pub struct CropPreviewQuery;

#[derive(Debug, Clone, Default)]
pub struct DiscardCaptureCommand;

#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct SessionSnapshotQuery;
