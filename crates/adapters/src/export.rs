use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use lite_booth_application::{ApplicationError, ImageExporter};
use lite_booth_domain::{detect_image_kind, unpack_rgb, Frame};
use log::info;

/// Writes lossless PNG files; the only export format the booth produces.
#[derive(Debug, Default)]
pub struct PngExporter;

impl ImageExporter for PngExporter {
    fn export(&self, frame: &Frame, path: &Path) -> Result<(u32, u32), ApplicationError> {
        if !detect_image_kind(path).is_lossless() {
            return Err(ApplicationError::InvalidInput(format!(
                "export path must end in .png: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| ApplicationError::Io(error.to_string()))?;
        }

        let bytes = frame
            .pixels()
            .iter()
            .flat_map(|pixel| unpack_rgb(*pixel))
            .collect::<Vec<u8>>();
        let image = RgbImage::from_raw(frame.width(), frame.height(), bytes).ok_or_else(|| {
            ApplicationError::Encode("frame buffer does not match its dimensions".to_string())
        })?;
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|error| ApplicationError::Encode(error.to_string()))?;

        info!(
            "wrote {}x{} png to {}",
            frame.width(),
            frame.height(),
            path.display()
        );
        Ok((frame.width(), frame.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CpuFilterRenderer, SystemClock, TestPatternSource};
    use lite_booth_application::{
        ApplicationService, ApplyPresetCommand, CaptureCommand, ExportCommand, SessionSettings,
        SetAspectRatioCommand, StartCameraCommand,
    };
    use lite_booth_domain::{pack_rgb, AspectRatio, PixelRect};
    use tempfile::tempdir;

    #[test]
    fn writes_png_with_frame_dimensions() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("captured-photo.png");
        let frame = Frame::filled(5, 3, pack_rgb(10, 20, 30)).expect("frame");

        let size = PngExporter.export(&frame, &path).expect("export");
        assert_eq!(size, (5, 3));

        let decoded = image::open(&path).expect("open").to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.get_pixel(4, 2).0, [10, 20, 30]);
    }

    #[test]
    fn rejects_lossy_extension() {
        let temp = tempdir().expect("tempdir");
        let frame = Frame::filled(1, 1, 0).expect("frame");
        let result = PngExporter.export(&frame, &temp.path().join("photo.jpg"));
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }

    #[test]
    fn service_exports_cropped_filtered_png() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("booth").join("portrait.png");
        let mut service = ApplicationService::new(
            Box::new(TestPatternSource::new(20, 10)),
            Box::new(CpuFilterRenderer),
            Box::new(PngExporter),
            Box::new(SystemClock),
            SessionSettings::default(),
        );
        service.start_camera(StartCameraCommand).expect("start");
        service.capture(CaptureCommand).expect("capture");
        service
            .apply_preset(ApplyPresetCommand {
                name: "Noir".to_string(),
            })
            .expect("preset");
        service.set_aspect_ratio(SetAspectRatioCommand {
            ratio: AspectRatio::Portrait,
        });

        let artifact = service
            .export(ExportCommand {
                file_path: path.clone(),
            })
            .expect("export");
        assert_eq!(
            artifact.crop,
            PixelRect {
                x: 7,
                y: 0,
                width: 5,
                height: 10
            }
        );
        assert_eq!((artifact.width, artifact.height), (5, 10));

        let decoded = image::open(&path).expect("open").to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 10));
        assert!(decoded.pixels().all(|pixel| {
            let [red, green, blue] = pixel.0;
            red == green && green == blue
        }));
    }
}
