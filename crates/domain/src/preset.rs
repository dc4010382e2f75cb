use crate::{DomainError, FilterVector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub filters: FilterVector,
}

const fn preset(
    name: &'static str,
    brightness: f32,
    contrast: f32,
    saturation: f32,
    sepia: f32,
    hue_rotate: f32,
    invert: f32,
    grayscale: f32,
) -> Preset {
    Preset {
        name,
        filters: FilterVector {
            brightness,
            contrast,
            saturation,
            sepia,
            hue_rotate,
            invert,
            grayscale,
        },
    }
}

pub const PRESETS: [Preset; 8] = [
    preset("Original", 100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0),
    preset("Vintage", 110.0, 90.0, 85.0, 30.0, 5.0, 0.0, 0.0),
    preset("Noir", 90.0, 120.0, 0.0, 0.0, 0.0, 0.0, 100.0),
    preset("Vivid", 105.0, 110.0, 150.0, 0.0, 0.0, 0.0, 0.0),
    preset("Cyberpunk", 95.0, 130.0, 140.0, 0.0, 180.0, 0.0, 0.0),
    preset("Warm", 105.0, 100.0, 110.0, 15.0, -10.0, 0.0, 0.0),
    preset("Cool", 100.0, 105.0, 95.0, 0.0, 10.0, 0.0, 0.0),
    preset("Dramatic", 85.0, 140.0, 120.0, 0.0, 0.0, 0.0, 0.0),
];

impl Preset {
    pub fn identity() -> &'static Preset {
        &PRESETS[0]
    }
}

pub fn find_preset(name: &str) -> Result<&'static Preset, DomainError> {
    let wanted = name.trim();
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| DomainError::UnknownPreset(wanted.to_string()))
}
