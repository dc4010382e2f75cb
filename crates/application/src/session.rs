use lite_booth_domain::{
    AspectRatio, Countdown, FacingMode, FilterHistory, FilterVector, Frame,
    DEFAULT_COUNTDOWN_SECONDS,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Camera,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub countdown_seconds: u32,
    pub mirror: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            mirror: true,
        }
    }
}

/// All state of one editor lifetime. Owned by the service; nothing here is shared.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub(crate) settings: SessionSettings,
    pub(crate) view: ViewMode,
    pub(crate) history: FilterHistory,
    pub(crate) aspect_ratio: AspectRatio,
    pub(crate) mirrored: bool,
    pub(crate) facing: FacingMode,
    pub(crate) countdown: Option<Countdown>,
    pub(crate) captured: Option<Frame>,
    pub(crate) show_original: bool,
}

impl EditorSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            view: ViewMode::Camera,
            history: FilterHistory::new(),
            aspect_ratio: AspectRatio::Original,
            mirrored: settings.mirror,
            facing: FacingMode::User,
            countdown: None,
            captured: None,
            show_original: false,
        }
    }

    pub fn filters(&self) -> FilterVector {
        self.history.current()
    }

    /// Drops the capture and every edit made to it.
    pub(crate) fn discard_capture(&mut self) {
        self.captured = None;
        self.view = ViewMode::Camera;
        self.show_original = false;
        self.countdown = None;
        self.history.reset();
        self.aspect_ratio = AspectRatio::Original;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub view: ViewMode,
    pub filters: FilterVector,
    pub history_cursor: usize,
    pub history_len: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub aspect_ratio: AspectRatio,
    pub mirrored: bool,
    pub facing: FacingMode,
    pub streaming: bool,
    pub countdown_remaining: Option<u32>,
    pub capture_size: Option<(u32, u32)>,
    pub show_original: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_in_camera_view_with_identity() {
        let session = EditorSession::new(SessionSettings::default());
        assert_eq!(session.view, ViewMode::Camera);
        assert!(session.filters().is_identity());
        assert!(session.mirrored);
        assert_eq!(session.settings.countdown_seconds, 3);
    }

    #[test]
    fn discard_resets_edit_state() {
        let mut session = EditorSession::new(SessionSettings::default());
        session.view = ViewMode::Editing;
        session.captured = Some(Frame::filled(2, 2, 0).expect("frame"));
        session.aspect_ratio = AspectRatio::Square;
        session.history.apply(FilterVector {
            sepia: 50.0,
            ..FilterVector::IDENTITY
        });

        session.discard_capture();
        assert_eq!(session.view, ViewMode::Camera);
        assert!(session.captured.is_none());
        assert_eq!(session.aspect_ratio, AspectRatio::Original);
        assert_eq!(session.history.len(), 1);
    }
}
