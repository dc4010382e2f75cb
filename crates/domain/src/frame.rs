use crate::{DomainError, PixelRect};

/// Which physical camera feeds the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

impl FacingMode {
    pub fn flipped(self) -> Self {
        match self {
            Self::User => Self::Environment,
            Self::Environment => Self::User,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Environment => "environment",
        }
    }
}

/// Row-major RGB pixels packed as `0x00RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::EmptySource { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DomainError::FrameSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, color: u32) -> Result<Self, DomainError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Horizontal flip, as a front camera preview is shown.
    pub fn mirrored(&self) -> Self {
        let width = self.width as usize;
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks_exact(width) {
            pixels.extend(row.iter().rev());
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Copies out `rect`, which is clamped to the frame first.
    pub fn crop(&self, rect: PixelRect) -> Self {
        let x = rect.x.min(self.width - 1);
        let y = rect.y.min(self.height - 1);
        let width = rect.width.clamp(1, self.width - x);
        let height = rect.height.clamp(1, self.height - y);

        let stride = self.width as usize;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let start = row as usize * stride + x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + width as usize]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

pub fn pack_rgb(red: u8, green: u8, blue: u8) -> u32 {
    ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32)
}

pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}
