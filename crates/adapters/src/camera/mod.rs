use std::path::{Path, PathBuf};

use image::io::Reader as ImageReader;
use lite_booth_application::{ApplicationError, FrameSource};
use lite_booth_domain::{detect_image_kind, pack_rgb, FacingMode, Frame, ImageKind};
use log::debug;

pub const TEST_PATTERN_WIDTH: u32 = 1280;
pub const TEST_PATTERN_HEIGHT: u32 = 720;

/// Serves one decoded image as a live feed. The file is read on the first `start`.
pub struct StillImageSource {
    path: PathBuf,
    frame: Option<Frame>,
    streaming: bool,
}

impl StillImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
            streaming: false,
        }
    }
}

impl FrameSource for StillImageSource {
    fn start(&mut self, facing: FacingMode) -> Result<(), ApplicationError> {
        if self.frame.is_none() {
            let frame = decode_frame(&self.path)?;
            debug!(
                "decoded {} ({}x{})",
                self.path.display(),
                frame.width(),
                frame.height()
            );
            self.frame = Some(frame);
        }
        debug!("still source started facing {}", facing.as_str());
        self.streaming = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.streaming = false;
    }

    fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn grab_frame(&mut self) -> Result<Frame, ApplicationError> {
        if !self.streaming {
            return Err(ApplicationError::Camera("source is not streaming".to_string()));
        }
        self.frame
            .clone()
            .ok_or_else(|| ApplicationError::Camera("no frame decoded".to_string()))
    }
}

/// Synthetic feed so the editor runs without a device. Each facing mode has
/// its own palette and the pattern drifts a little on every grab.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    facing: FacingMode,
    streaming: bool,
    frame_index: u32,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            facing: FacingMode::User,
            streaming: false,
            frame_index: 0,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }
}

impl Default for TestPatternSource {
    fn default() -> Self {
        Self::new(TEST_PATTERN_WIDTH, TEST_PATTERN_HEIGHT)
    }
}

impl FrameSource for TestPatternSource {
    fn start(&mut self, facing: FacingMode) -> Result<(), ApplicationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ApplicationError::Camera(format!(
                "unusable test pattern size {}x{}",
                self.width, self.height
            )));
        }
        self.facing = facing;
        self.streaming = true;
        debug!("test pattern started facing {}", facing.as_str());
        Ok(())
    }

    fn stop(&mut self) {
        self.streaming = false;
    }

    fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn grab_frame(&mut self) -> Result<Frame, ApplicationError> {
        if !self.streaming {
            return Err(ApplicationError::Camera("source is not streaming".to_string()));
        }
        let frame = render_pattern(self.width, self.height, self.facing, self.frame_index)?;
        self.frame_index = self.frame_index.wrapping_add(1);
        Ok(frame)
    }
}

fn render_pattern(
    width: u32,
    height: u32,
    facing: FacingMode,
    frame_index: u32,
) -> Result<Frame, ApplicationError> {
    let (top, bottom) = match facing {
        FacingMode::User => ([236, 120, 84], [64, 40, 120]),
        FacingMode::Environment => ([90, 180, 220], [30, 90, 50]),
    };
    let shift = frame_index % width;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let t = y as f32 / height.max(2).saturating_sub(1) as f32;
        for x in 0..width {
            let u = ((x + shift) % width) as f32 / width as f32;
            let stripe = if ((x + shift) / 80) % 2 == 0 { 1.0 } else { 0.85 };
            let channel = |i: usize| {
                let base = top[i] as f32 + (bottom[i] as f32 - top[i] as f32) * t;
                (base * stripe * (0.75 + 0.25 * u)).round().clamp(0.0, 255.0) as u8
            };
            pixels.push(pack_rgb(channel(0), channel(1), channel(2)));
        }
    }
    Ok(Frame::new(width, height, pixels)?)
}

/// Decodes a JPEG or PNG file into a packed RGB frame.
pub fn decode_frame(path: &Path) -> Result<Frame, ApplicationError> {
    if detect_image_kind(path) == ImageKind::Unsupported {
        return Err(ApplicationError::InvalidInput(format!(
            "unsupported image type: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(ApplicationError::NotFound(format!(
            "image not found: {}",
            path.display()
        )));
    }

    let image = ImageReader::open(path)
        .map_err(|error| ApplicationError::Io(error.to_string()))?
        .with_guessed_format()
        .map_err(|error| ApplicationError::Decode(error.to_string()))?
        .decode()
        .map_err(|error| ApplicationError::Decode(error.to_string()))?;
    let source = image.to_rgb8();
    if source.width() == 0 || source.height() == 0 {
        return Err(ApplicationError::Decode(format!(
            "empty image dimensions for {}",
            path.display()
        )));
    }

    let pixels = source
        .pixels()
        .map(|pixel| {
            let [red, green, blue] = pixel.0;
            pack_rgb(red, green, blue)
        })
        .collect();
    Ok(Frame::new(source.width(), source.height(), pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use lite_booth_domain::unpack_rgb;
    use tempfile::tempdir;

    #[test]
    fn still_source_serves_decoded_pixels() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("still.png");
        let image = ImageBuffer::from_fn(3, 2, |x, y| Rgb([x as u8 * 50, y as u8 * 100, 7]));
        image.save(&path).expect("write image");

        let mut source = StillImageSource::new(&path);
        assert!(!source.is_streaming());
        source.start(FacingMode::User).expect("start");
        let frame = source.grab_frame().expect("frame");
        assert_eq!((frame.width(), frame.height()), (3, 2));
        assert_eq!(frame.pixel(2, 1).map(unpack_rgb), Some([100, 100, 7]));
    }

    #[test]
    fn stopped_source_refuses_to_grab() {
        let mut source = TestPatternSource::new(8, 4);
        assert!(matches!(
            source.grab_frame(),
            Err(ApplicationError::Camera(_))
        ));
        source.start(FacingMode::User).expect("start");
        assert!(source.grab_frame().is_ok());
        source.stop();
        assert!(matches!(
            source.grab_frame(),
            Err(ApplicationError::Camera(_))
        ));
    }

    #[test]
    fn test_pattern_palette_follows_facing_mode() {
        let mut source = TestPatternSource::new(16, 8);
        source.start(FacingMode::User).expect("start");
        let front = source.grab_frame().expect("frame");
        source.stop();
        source.start(FacingMode::Environment).expect("restart");
        assert_eq!(source.facing(), FacingMode::Environment);
        let back = source.grab_frame().expect("frame");
        assert_eq!((back.width(), back.height()), (16, 8));
        assert_ne!(front.pixel(0, 0), back.pixel(0, 0));
    }

    #[test]
    fn default_pattern_is_720p() {
        let mut source = TestPatternSource::default();
        source.start(FacingMode::User).expect("start");
        let frame = source.grab_frame().expect("frame");
        assert_eq!((frame.width(), frame.height()), (1280, 720));
    }

    #[test]
    fn missing_file_fails_on_start() {
        let temp = tempdir().expect("tempdir");
        let mut source = StillImageSource::new(temp.path().join("absent.jpg"));
        assert!(matches!(
            source.start(FacingMode::User),
            Err(ApplicationError::NotFound(_))
        ));
        assert!(!source.is_streaming());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(matches!(
            decode_frame(Path::new("notes.txt")),
            Err(ApplicationError::InvalidInput(_))
        ));
    }
}
