use lite_booth_domain::{
    crop_rect, find_preset, AspectRatio, Countdown, CountdownTick, CropRect, FacingMode,
    FilterVector, Frame,
};
use log::{debug, info, warn};

use crate::{
    ApplicationError, ApplyFiltersCommand, ApplyPresetCommand, CaptureCommand, Clock,
    CropPreviewQuery, CycleAspectRatioCommand, DiscardCaptureCommand, EditorSession,
    ExportArtifact, ExportCommand, FilterRenderer, FrameSource, ImageExporter, RedoCommand,
    RenderPreviewCommand, ResetFiltersCommand, SessionSettings, SessionSnapshot,
    SessionSnapshotQuery, SetAspectRatioCommand, SetChannelCommand, ShowOriginalCommand,
    StartCameraCommand, StartCountdownCommand, StopCameraCommand, SwitchCameraCommand,
    TickCountdownCommand, ToggleMirrorCommand, UndoCommand, ViewMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSummary {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Idle,
    Remaining(u32),
    Captured(CaptureSummary),
}

pub struct ApplicationService {
    camera: Box<dyn FrameSource>,
    renderer: Box<dyn FilterRenderer>,
    exporter: Box<dyn ImageExporter>,
    clock: Box<dyn Clock>,
    session: EditorSession,
}

impl ApplicationService {
    pub fn new(
        camera: Box<dyn FrameSource>,
        renderer: Box<dyn FilterRenderer>,
        exporter: Box<dyn ImageExporter>,
        clock: Box<dyn Clock>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            camera,
            renderer,
            exporter,
            clock,
            session: EditorSession::new(settings),
        }
    }

    pub fn filters(&self) -> FilterVector {
        self.session.filters()
    }

    pub fn start_camera(&mut self, _command: StartCameraCommand) -> Result<(), ApplicationError> {
        if self.session.view == ViewMode::Editing {
            return Err(ApplicationError::InvalidState(
                "discard the capture before restarting the camera".to_string(),
            ));
        }
        if self.camera.is_streaming() {
            return Ok(());
        }
        self.camera.start(self.session.facing).map_err(|error| {
            warn!("camera start failed: {error}");
            error
        })?;
        debug!("camera streaming, facing={}", self.session.facing.as_str());
        Ok(())
    }

    pub fn stop_camera(&mut self, _command: StopCameraCommand) {
        self.session.countdown = None;
        self.camera.stop();
        debug!("camera stopped");
    }

    pub fn switch_camera(
        &mut self,
        _command: SwitchCameraCommand,
    ) -> Result<FacingMode, ApplicationError> {
        if self.session.view == ViewMode::Editing {
            return Err(ApplicationError::InvalidState(
                "discard the capture before switching cameras".to_string(),
            ));
        }
        self.session.facing = self.session.facing.flipped();
        if self.camera.is_streaming() {
            self.camera.stop();
            self.camera.start(self.session.facing)?;
        }
        debug!("switched camera to {}", self.session.facing.as_str());
        Ok(self.session.facing)
    }

    pub fn toggle_mirror(&mut self, _command: ToggleMirrorCommand) -> bool {
        self.session.mirrored = !self.session.mirrored;
        self.session.mirrored
    }

    pub fn start_countdown(
        &mut self,
        _command: StartCountdownCommand,
    ) -> Result<u32, ApplicationError> {
        if self.session.view != ViewMode::Camera || !self.camera.is_streaming() {
            return Err(ApplicationError::InvalidState(
                "camera is not streaming".to_string(),
            ));
        }
        if self.session.countdown.is_some() {
            return Err(ApplicationError::InvalidState(
                "countdown already running".to_string(),
            ));
        }
        let seconds = self.session.settings.countdown_seconds;
        self.session.countdown = Some(Countdown::start(seconds, self.clock.now_millis()));
        debug!("countdown started: {seconds}s");
        Ok(seconds)
    }

    pub fn tick_countdown(
        &mut self,
        _command: TickCountdownCommand,
    ) -> Result<CountdownStatus, ApplicationError> {
        let now = self.clock.now_millis();
        let tick = match self.session.countdown.as_mut() {
            Some(countdown) => countdown.tick(now),
            None => return Ok(CountdownStatus::Idle),
        };

        match tick {
            CountdownTick::Remaining(remaining) => Ok(CountdownStatus::Remaining(remaining)),
            CountdownTick::Fire => {
                self.session.countdown = None;
                self.capture(CaptureCommand).map(CountdownStatus::Captured)
            }
            CountdownTick::Finished => {
                self.session.countdown = None;
                Ok(CountdownStatus::Idle)
            }
        }
    }

    /// Freezes the current camera frame with the live filters baked in and
    /// opens it for editing with a fresh history.
    pub fn capture(&mut self, _command: CaptureCommand) -> Result<CaptureSummary, ApplicationError> {
        if self.session.view != ViewMode::Camera {
            return Err(ApplicationError::InvalidState(
                "a capture is already being edited".to_string(),
            ));
        }
        if !self.camera.is_streaming() {
            return Err(ApplicationError::InvalidState(
                "camera is not streaming".to_string(),
            ));
        }

        let mut frame = self.camera.grab_frame()?;
        if self.session.mirrored {
            frame = frame.mirrored();
        }
        let live = self.session.filters();
        if !live.is_identity() {
            frame = self.renderer.render(&frame, &live.style_string())?;
        }

        self.camera.stop();
        let summary = CaptureSummary {
            width: frame.width(),
            height: frame.height(),
        };
        self.session.countdown = None;
        self.session.history.reset();
        self.session.show_original = false;
        self.session.captured = Some(frame);
        self.session.view = ViewMode::Editing;
        info!("captured {}x{} frame", summary.width, summary.height);
        Ok(summary)
    }

    pub fn set_channel(
        &mut self,
        command: SetChannelCommand,
    ) -> Result<FilterVector, ApplicationError> {
        let filters = self
            .session
            .filters()
            .with_channel(command.channel, command.value);
        self.apply(filters)
    }

    pub fn apply_filters(
        &mut self,
        command: ApplyFiltersCommand,
    ) -> Result<FilterVector, ApplicationError> {
        self.apply(command.filters)
    }

    pub fn apply_preset(
        &mut self,
        command: ApplyPresetCommand,
    ) -> Result<FilterVector, ApplicationError> {
        let preset = find_preset(&command.name)?;
        self.apply(preset.filters)
    }

    fn apply(&mut self, filters: FilterVector) -> Result<FilterVector, ApplicationError> {
        filters.validate()?;
        let cursor = self.session.history.apply(filters);
        debug!("applied {} (history {})", filters.style_string(), cursor);
        Ok(filters)
    }

    pub fn undo(&mut self, _command: UndoCommand) -> bool {
        self.session.history.undo()
    }

    pub fn redo(&mut self, _command: RedoCommand) -> bool {
        self.session.history.redo()
    }

    pub fn reset_filters(&mut self, _command: ResetFiltersCommand) {
        self.session.history.reset();
    }

    pub fn set_aspect_ratio(&mut self, command: SetAspectRatioCommand) {
        self.session.aspect_ratio = command.ratio;
    }

    pub fn cycle_aspect_ratio(&mut self, _command: CycleAspectRatioCommand) -> AspectRatio {
        self.session.aspect_ratio = self.session.aspect_ratio.next();
        self.session.aspect_ratio
    }

    pub fn set_show_original(&mut self, command: ShowOriginalCommand) {
        self.session.show_original = command.enabled;
    }

    /// The frame the preview surface should show right now.
    pub fn render_preview(
        &mut self,
        command: RenderPreviewCommand,
    ) -> Result<Frame, ApplicationError> {
        let filters = command.draft.unwrap_or_else(|| self.session.filters());
        match self.session.view {
            ViewMode::Camera => {
                if !self.camera.is_streaming() {
                    return Err(ApplicationError::InvalidState(
                        "camera is not streaming".to_string(),
                    ));
                }
                let mut frame = self.camera.grab_frame()?;
                if self.session.mirrored {
                    frame = frame.mirrored();
                }
                self.render_filtered(frame, filters)
            }
            ViewMode::Editing => {
                let frame = self.captured()?.clone();
                if self.session.show_original {
                    return Ok(frame);
                }
                self.render_filtered(frame, filters)
            }
        }
    }

    fn render_filtered(
        &self,
        frame: Frame,
        filters: FilterVector,
    ) -> Result<Frame, ApplicationError> {
        if filters.is_identity() {
            return Ok(frame);
        }
        self.renderer.render(&frame, &filters.style_string())
    }

    pub fn crop_preview(
        &self,
        _query: CropPreviewQuery,
    ) -> Result<Option<CropRect>, ApplicationError> {
        match &self.session.captured {
            Some(frame) => Ok(Some(crop_rect(
                frame.width(),
                frame.height(),
                self.session.aspect_ratio,
            )?)),
            None => Ok(None),
        }
    }

    /// Returns to the live camera. The session is reset even when the camera
    /// fails to restart.
    pub fn discard_capture(
        &mut self,
        _command: DiscardCaptureCommand,
    ) -> Result<(), ApplicationError> {
        self.session.discard_capture();
        debug!("capture discarded");
        self.start_camera(StartCameraCommand)
    }

    pub fn export(&self, command: ExportCommand) -> Result<ExportArtifact, ApplicationError> {
        if command.file_path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "export path must not be empty".to_string(),
            ));
        }

        let frame = self.captured()?;
        let crop = crop_rect(frame.width(), frame.height(), self.session.aspect_ratio)?;
        let bounds = crop.pixel_bounds(frame.width(), frame.height());
        let cropped = frame.crop(bounds);
        let style = self.session.filters().style_string();
        let rendered = self.renderer.render(&cropped, &style)?;
        let (width, height) = self.exporter.export(&rendered, &command.file_path)?;

        info!(
            "exported {}x{} ({}) to {}",
            width,
            height,
            self.session.aspect_ratio,
            command.file_path.display()
        );
        Ok(ExportArtifact {
            file_path: command.file_path,
            width,
            height,
            crop: bounds,
        })
    }

    pub fn snapshot(&self, _query: SessionSnapshotQuery) -> SessionSnapshot {
        let session = &self.session;
        let filters = session.filters();
        let now = self.clock.now_millis();
        SessionSnapshot {
            view: session.view,
            filters,
            history_cursor: session.history.cursor(),
            history_len: session.history.len(),
            can_undo: session.history.can_undo(),
            can_redo: session.history.can_redo(),
            aspect_ratio: session.aspect_ratio,
            mirrored: session.mirrored,
            facing: session.facing,
            streaming: self.camera.is_streaming(),
            countdown_remaining: session
                .countdown
                .as_ref()
                .map(|countdown| countdown.remaining(now)),
            capture_size: session
                .captured
                .as_ref()
                .map(|frame| (frame.width(), frame.height())),
            show_original: session.show_original,
        }
    }

    fn captured(&self) -> Result<&Frame, ApplicationError> {
        self.session
            .captured
            .as_ref()
            .ok_or_else(|| ApplicationError::InvalidState("nothing captured yet".to_string()))
    }
}
