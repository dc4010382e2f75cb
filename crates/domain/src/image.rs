use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Unsupported,
}

impl ImageKind {
    /// Exports must not lose detail to compression.
    pub fn is_lossless(self) -> bool {
        matches!(self, Self::Png)
    }
}

pub fn detect_image_kind(path: &Path) -> ImageKind {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return ImageKind::Unsupported;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => ImageKind::Jpeg,
        "png" => ImageKind::Png,
        _ => ImageKind::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_kind_detection_works() {
        assert_eq!(detect_image_kind(Path::new("a.JPG")), ImageKind::Jpeg);
        assert_eq!(detect_image_kind(Path::new("shot.png")), ImageKind::Png);
        assert_eq!(detect_image_kind(Path::new("a.nef")), ImageKind::Unsupported);
        assert_eq!(detect_image_kind(Path::new("noext")), ImageKind::Unsupported);
    }

    #[test]
    fn only_png_is_lossless() {
        assert!(ImageKind::Png.is_lossless());
        assert!(!ImageKind::Jpeg.is_lossless());
    }
}
