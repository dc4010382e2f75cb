use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Original,
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Square => "1:1",
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
        }
    }

    /// Width over height, or `None` when the source shape is kept.
    pub fn target_ratio(self) -> Option<f64> {
        match self {
            Self::Original => None,
            Self::Square => Some(1.0),
            Self::Portrait => Some(9.0 / 16.0),
            Self::Landscape => Some(16.0 / 9.0),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Original => Self::Square,
            Self::Square => Self::Portrait,
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Original,
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidAspectRatio(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Offsets round to the nearest pixel; sizes truncate, the way a canvas
    /// truncates fractional dimensions. The result is clamped inside a
    /// `source_width` x `source_height` image and never smaller than 1x1.
    pub fn pixel_bounds(&self, source_width: u32, source_height: u32) -> PixelRect {
        let max_x = source_width.saturating_sub(1);
        let max_y = source_height.saturating_sub(1);
        let x = (self.x.round().max(0.0) as u32).min(max_x);
        let y = (self.y.round().max(0.0) as u32).min(max_y);
        let width = whole_pixels(self.width).clamp(1, source_width.saturating_sub(x).max(1));
        let height = whole_pixels(self.height).clamp(1, source_height.saturating_sub(y).max(1));
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

// Tolerates float noise such as 1079.9999999 so exact sizes do not lose a pixel.
fn whole_pixels(length: f64) -> u32 {
    (length + 1e-6).floor().max(0.0) as u32
}

/// Largest centred rectangle of `ratio` that fits in a `width` x `height` source.
pub fn crop_rect(width: u32, height: u32, ratio: AspectRatio) -> Result<CropRect, DomainError> {
    if width == 0 || height == 0 {
        return Err(DomainError::EmptySource { width, height });
    }

    let source_width = f64::from(width);
    let source_height = f64::from(height);
    let full = CropRect {
        x: 0.0,
        y: 0.0,
        width: source_width,
        height: source_height,
    };

    let Some(target_ratio) = ratio.target_ratio() else {
        return Ok(full);
    };

    if ratio == AspectRatio::Square {
        let side = source_width.min(source_height);
        return Ok(CropRect {
            x: (source_width - side) / 2.0,
            y: (source_height - side) / 2.0,
            width: side,
            height: side,
        });
    }

    let current_ratio = source_width / source_height;
    if current_ratio > target_ratio {
        let crop_width = source_height * target_ratio;
        Ok(CropRect {
            x: (source_width - crop_width) / 2.0,
            width: crop_width,
            ..full
        })
    } else {
        let crop_height = source_width / target_ratio;
        Ok(CropRect {
            y: (source_height - crop_height) / 2.0,
            height: crop_height,
            ..full
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_inside(rect: CropRect, width: u32, height: u32) {
        assert!(rect.x >= 0.0 && rect.y >= 0.0);
        assert!(rect.x + rect.width <= f64::from(width) + 1e-9);
        assert!(rect.y + rect.height <= f64::from(height) + 1e-9);
    }

    #[test]
    fn original_keeps_full_frame() {
        let rect = crop_rect(640, 480, AspectRatio::Original).expect("rect");
        assert_eq!(
            rect,
            CropRect {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 480.0
            }
        );
    }

    #[test]
    fn square_centres_on_landscape_source() {
        let rect = crop_rect(1920, 1080, AspectRatio::Square).expect("rect");
        assert_eq!(rect.width, 1080.0);
        assert_eq!(rect.height, 1080.0);
        assert_eq!(rect.x, 420.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn portrait_on_narrow_source_keeps_width() {
        let rect = crop_rect(1000, 2000, AspectRatio::Portrait).expect("rect");
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 1000.0);
        assert_close(rect.height, 1777.78);
        assert_close(rect.y, 111.11);
        assert_inside(rect, 1000, 2000);
    }

    #[test]
    fn portrait_on_landscape_source_keeps_height() {
        let rect = crop_rect(1920, 1080, AspectRatio::Portrait).expect("rect");
        assert_eq!(rect.height, 1080.0);
        assert_close(rect.width, 607.5);
        assert_close(rect.x, 656.25);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn landscape_on_square_source_keeps_width() {
        let rect = crop_rect(1200, 1200, AspectRatio::Landscape).expect("rect");
        assert_eq!(rect.width, 1200.0);
        assert_close(rect.height, 675.0);
        assert_close(rect.y, 262.5);
    }

    #[test]
    fn every_ratio_fits_inside_odd_sources() {
        for (width, height) in [(1, 1), (3, 7), (1921, 1079), (4000, 3)] {
            for ratio in AspectRatio::ALL {
                let rect = crop_rect(width, height, ratio).expect("rect");
                assert_inside(rect, width, height);
                let pixels = rect.pixel_bounds(width, height);
                assert!(pixels.width >= 1 && pixels.height >= 1);
                assert!(pixels.x + pixels.width <= width);
                assert!(pixels.y + pixels.height <= height);
            }
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            crop_rect(0, 10, AspectRatio::Square),
            Err(DomainError::EmptySource {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn pixel_bounds_truncate_portrait_crop() {
        let rect = crop_rect(1000, 2000, AspectRatio::Portrait).expect("rect");
        assert_eq!(
            rect.pixel_bounds(1000, 2000),
            PixelRect {
                x: 0,
                y: 111,
                width: 1000,
                height: 1777
            }
        );
    }

    #[test]
    fn pixel_bounds_truncate_half_pixel_width() {
        let rect = crop_rect(1920, 1080, AspectRatio::Portrait).expect("rect");
        assert_eq!(
            rect.pixel_bounds(1920, 1080),
            PixelRect {
                x: 656,
                y: 0,
                width: 607,
                height: 1080
            }
        );
    }

    #[test]
    fn pixel_bounds_keep_exact_sizes() {
        let rect = crop_rect(1080, 1920, AspectRatio::Portrait).expect("rect");
        let pixels = rect.pixel_bounds(1080, 1920);
        assert_eq!((pixels.width, pixels.height), (1080, 1920));
        let rect = crop_rect(1280, 720, AspectRatio::Landscape).expect("rect");
        let pixels = rect.pixel_bounds(1280, 720);
        assert_eq!((pixels.width, pixels.height), (1280, 720));
    }

    #[test]
    fn ratios_parse_and_cycle() {
        assert_eq!("16:9".parse::<AspectRatio>().expect("ratio"), AspectRatio::Landscape);
        assert_eq!("Original".parse::<AspectRatio>().expect("ratio"), AspectRatio::Original);
        assert!("4:3".parse::<AspectRatio>().is_err());
        let mut ratio = AspectRatio::Original;
        for _ in 0..4 {
            ratio = ratio.next();
        }
        assert_eq!(ratio, AspectRatio::Original);
    }
}
