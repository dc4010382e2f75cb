use serde::{Deserialize, Serialize};

use crate::DomainError;

/// The seven adjustment channels, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterChannel {
    Brightness,
    Contrast,
    Saturation,
    Sepia,
    HueRotate,
    Invert,
    Grayscale,
}

impl FilterChannel {
    pub const ALL: [FilterChannel; 7] = [
        FilterChannel::Brightness,
        FilterChannel::Contrast,
        FilterChannel::Saturation,
        FilterChannel::Sepia,
        FilterChannel::HueRotate,
        FilterChannel::Invert,
        FilterChannel::Grayscale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Sepia => "sepia",
            Self::HueRotate => "hueRotate",
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Brightness => "BRIGHTNESS",
            Self::Contrast => "CONTRAST",
            Self::Saturation => "SATURATION",
            Self::Sepia => "SEPIA",
            Self::HueRotate => "HUE",
            Self::Invert => "INVERT",
            Self::Grayscale => "GRAYSCALE",
        }
    }

    pub fn css_function(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturate",
            Self::Sepia => "sepia",
            Self::HueRotate => "hue-rotate",
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
        }
    }

    /// Inclusive `(min, max)` range accepted for the channel.
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation | Self::Sepia => (0.0, 200.0),
            Self::HueRotate => (-180.0, 180.0),
            Self::Invert | Self::Grayscale => (0.0, 100.0),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::HueRotate => "deg",
            _ => "%",
        }
    }

    /// Position of `value` inside the channel range as `0.0..=1.0`, used for slider fill.
    pub fn fill_fraction(self, value: f32) -> f32 {
        let (min, max) = self.range();
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FilterVector {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub sepia: f32,
    pub hue_rotate: f32,
    pub invert: f32,
    pub grayscale: f32,
}

impl FilterVector {
    pub const IDENTITY: FilterVector = FilterVector {
        brightness: 100.0,
        contrast: 100.0,
        saturation: 100.0,
        sepia: 0.0,
        hue_rotate: 0.0,
        invert: 0.0,
        grayscale: 0.0,
    };

    pub fn get(&self, channel: FilterChannel) -> f32 {
        match channel {
            FilterChannel::Brightness => self.brightness,
            FilterChannel::Contrast => self.contrast,
            FilterChannel::Saturation => self.saturation,
            FilterChannel::Sepia => self.sepia,
            FilterChannel::HueRotate => self.hue_rotate,
            FilterChannel::Invert => self.invert,
            FilterChannel::Grayscale => self.grayscale,
        }
    }

    pub fn with_channel(mut self, channel: FilterChannel, value: f32) -> Self {
        let slot = match channel {
            FilterChannel::Brightness => &mut self.brightness,
            FilterChannel::Contrast => &mut self.contrast,
            FilterChannel::Saturation => &mut self.saturation,
            FilterChannel::Sepia => &mut self.sepia,
            FilterChannel::HueRotate => &mut self.hue_rotate,
            FilterChannel::Invert => &mut self.invert,
            FilterChannel::Grayscale => &mut self.grayscale,
        };
        *slot = value;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for channel in FilterChannel::ALL {
            let value = self.get(channel);
            if !value.is_finite() {
                return Err(DomainError::NonFiniteFilterValue(channel.name()));
            }
            let (min, max) = channel.range();
            if value < min || value > max {
                return Err(DomainError::FilterValueOutOfRange {
                    channel: channel.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Renders the vector as a filter-function list.
    ///
    /// The live preview and the exporter both rasterize from this string, so
    /// the channel order and unit suffixes must not change.
    pub fn style_string(&self) -> String {
        FilterChannel::ALL
            .iter()
            .map(|channel| {
                format!(
                    "{}({}{})",
                    channel.css_function(),
                    format_number(self.get(*channel)),
                    channel.unit()
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builds a vector from a filter-function list. Functions that are absent
    /// keep their identity value; a function listed twice is rejected.
    pub fn from_style_string(input: &str) -> Result<Self, DomainError> {
        let mut vector = Self::IDENTITY;
        let mut seen = Vec::new();
        for op in parse_filter_string(input)? {
            let channel = op.channel();
            if seen.contains(&channel) {
                return Err(DomainError::InvalidFilterString(format!(
                    "{} listed more than once",
                    channel.css_function()
                )));
            }
            seen.push(channel);
            vector = vector.with_channel(channel, op.channel_value());
        }
        vector.validate()?;
        Ok(vector)
    }
}

impl Default for FilterVector {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One parsed filter function. Amounts are percentages (`1.5` parses as
/// `150.0`), hue rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    Sepia(f32),
    HueRotate(f32),
    Invert(f32),
    Grayscale(f32),
}

impl FilterOp {
    pub fn channel(self) -> FilterChannel {
        match self {
            Self::Brightness(_) => FilterChannel::Brightness,
            Self::Contrast(_) => FilterChannel::Contrast,
            Self::Saturate(_) => FilterChannel::Saturation,
            Self::Sepia(_) => FilterChannel::Sepia,
            Self::HueRotate(_) => FilterChannel::HueRotate,
            Self::Invert(_) => FilterChannel::Invert,
            Self::Grayscale(_) => FilterChannel::Grayscale,
        }
    }

    pub fn channel_value(self) -> f32 {
        match self {
            Self::Brightness(value)
            | Self::Contrast(value)
            | Self::Saturate(value)
            | Self::Sepia(value)
            | Self::HueRotate(value)
            | Self::Invert(value)
            | Self::Grayscale(value) => value,
        }
    }
}

pub fn parse_filter_string(input: &str) -> Result<Vec<FilterOp>, DomainError> {
    let mut ops = Vec::new();
    let mut rest = input.trim();
    if rest.is_empty() || rest == "none" {
        return Ok(ops);
    }

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| invalid(format!("expected '(' in {rest:?}")))?;
        let close = rest[open..]
            .find(')')
            .map(|offset| open + offset)
            .ok_or_else(|| invalid(format!("unterminated function in {rest:?}")))?;

        let name = rest[..open].trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(invalid(format!("bad function name {name:?}")));
        }
        ops.push(parse_function(name, rest[open + 1..close].trim())?);
        rest = rest[close + 1..].trim_start();
    }

    Ok(ops)
}

fn parse_function(name: &str, argument: &str) -> Result<FilterOp, DomainError> {
    match name {
        "brightness" => parse_amount(name, argument).map(FilterOp::Brightness),
        "contrast" => parse_amount(name, argument).map(FilterOp::Contrast),
        "saturate" => parse_amount(name, argument).map(FilterOp::Saturate),
        "sepia" => parse_amount(name, argument).map(FilterOp::Sepia),
        "hue-rotate" => parse_angle(argument).map(FilterOp::HueRotate),
        "invert" => parse_amount(name, argument).map(FilterOp::Invert),
        "grayscale" => parse_amount(name, argument).map(FilterOp::Grayscale),
        other => Err(invalid(format!("unsupported function {other}"))),
    }
}

fn parse_amount(name: &str, argument: &str) -> Result<f32, DomainError> {
    let amount = match argument.strip_suffix('%') {
        Some(percent) => parse_number(percent)?,
        None => parse_number(argument)? * 100.0,
    };
    if amount < 0.0 {
        return Err(invalid(format!("{name} amount must not be negative")));
    }
    Ok(amount)
}

fn parse_angle(argument: &str) -> Result<f32, DomainError> {
    if let Some(value) = argument.strip_suffix("grad") {
        return Ok(parse_number(value)? * 0.9);
    }
    if let Some(value) = argument.strip_suffix("rad") {
        return Ok(parse_number(value)?.to_degrees());
    }
    if let Some(value) = argument.strip_suffix("turn") {
        return Ok(parse_number(value)? * 360.0);
    }
    if let Some(value) = argument.strip_suffix("deg") {
        return parse_number(value);
    }
    // unitless angles are only valid as zero
    match parse_number(argument)? {
        value if value == 0.0 => Ok(0.0),
        _ => Err(invalid(format!("angle {argument:?} needs a unit"))),
    }
}

fn parse_number(text: &str) -> Result<f32, DomainError> {
    let value = text
        .trim()
        .parse::<f32>()
        .map_err(|_| invalid(format!("bad number {text:?}")))?;
    if !value.is_finite() {
        return Err(invalid(format!("bad number {text:?}")));
    }
    Ok(value)
}

fn format_number(value: f32) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    format!("{value}")
}

fn invalid(msg: String) -> DomainError {
    DomainError::InvalidFilterString(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_renders_canonical_string() {
        assert_eq!(
            FilterVector::IDENTITY.style_string(),
            "brightness(100%) contrast(100%) saturate(100%) sepia(0%) hue-rotate(0deg) invert(0%) grayscale(0%)"
        );
    }

    #[test]
    fn style_string_keeps_fractions_and_signs() {
        let vector = FilterVector {
            brightness: 112.5,
            hue_rotate: -10.0,
            sepia: -0.0,
            ..FilterVector::IDENTITY
        };
        assert_eq!(
            vector.style_string(),
            "brightness(112.5%) contrast(100%) saturate(100%) sepia(0%) hue-rotate(-10deg) invert(0%) grayscale(0%)"
        );
    }

    #[test]
    fn validate_rejects_out_of_range_and_non_finite() {
        let too_bright = FilterVector::IDENTITY.with_channel(FilterChannel::Brightness, 201.0);
        assert!(matches!(
            too_bright.validate(),
            Err(DomainError::FilterValueOutOfRange {
                channel: "brightness",
                ..
            })
        ));

        let nan_hue = FilterVector::IDENTITY.with_channel(FilterChannel::HueRotate, f32::NAN);
        assert!(matches!(
            nan_hue.validate(),
            Err(DomainError::NonFiniteFilterValue("hueRotate"))
        ));

        let edge = FilterVector::IDENTITY
            .with_channel(FilterChannel::HueRotate, -180.0)
            .with_channel(FilterChannel::Invert, 100.0);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn style_string_parses_back_to_same_vector() {
        let vector = FilterVector {
            brightness: 110.0,
            contrast: 90.0,
            saturation: 85.0,
            sepia: 30.0,
            hue_rotate: 5.0,
            invert: 0.0,
            grayscale: 0.0,
        };
        let parsed = FilterVector::from_style_string(&vector.style_string()).expect("parse");
        assert_eq!(parsed, vector);
    }

    #[test]
    fn parser_accepts_alternate_units() {
        let ops = parse_filter_string("brightness(1.5)  hue-rotate(0.5turn) invert(0)").expect("parse");
        assert_eq!(
            ops,
            vec![
                FilterOp::Brightness(150.0),
                FilterOp::HueRotate(180.0),
                FilterOp::Invert(0.0),
            ]
        );
        assert!(parse_filter_string("none").expect("none").is_empty());
    }

    #[test]
    fn parser_rejects_malformed_input() {
        assert!(parse_filter_string("blur(3px)").is_err());
        assert!(parse_filter_string("brightness(100%").is_err());
        assert!(parse_filter_string("contrast(-10%)").is_err());
        assert!(parse_filter_string("hue-rotate(45)").is_err());
        assert!(FilterVector::from_style_string("sepia(10%) sepia(20%)").is_err());
    }

    #[test]
    fn fill_fraction_scales_into_range() {
        assert_eq!(FilterChannel::Brightness.fill_fraction(100.0), 0.5);
        assert_eq!(FilterChannel::HueRotate.fill_fraction(-180.0), 0.0);
        assert_eq!(FilterChannel::Invert.fill_fraction(150.0), 1.0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&FilterVector::IDENTITY).expect("json");
        assert!(json.contains("\"hueRotate\":0.0"));
    }
}
