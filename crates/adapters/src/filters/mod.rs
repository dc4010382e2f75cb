use lite_booth_application::{ApplicationError, FilterRenderer};
use lite_booth_domain::{pack_rgb, parse_filter_string, unpack_rgb, FilterOp, Frame};
use rayon::prelude::*;

type Matrix = [[f32; 3]; 3];

/// One compiled filter function, applied to normalized RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// `value * slope + intercept` on every channel.
    Linear { slope: f32, intercept: f32 },
    Matrix(Matrix),
}

/// CPU rasterizer shared by the live preview and the exporter.
///
/// Follows the Filter Effects definitions of the shorthand functions, in
/// sRGB, clamping to `0..=1` after every stage.
#[derive(Debug, Default)]
pub struct CpuFilterRenderer;

impl FilterRenderer for CpuFilterRenderer {
    fn render(&self, frame: &Frame, style: &str) -> Result<Frame, ApplicationError> {
        let ops = parse_filter_string(style)?;
        let stages = compile(&ops);
        let width = frame.width() as usize;
        let mut pixels = frame.pixels().to_vec();
        if !stages.is_empty() {
            pixels.par_chunks_mut(width).for_each(|row| {
                for pixel in row.iter_mut() {
                    *pixel = apply_stages(&stages, *pixel);
                }
            });
        }
        Ok(Frame::new(frame.width(), frame.height(), pixels)?)
    }
}

fn compile(ops: &[FilterOp]) -> Vec<Stage> {
    ops.iter().filter_map(|op| compile_op(*op)).collect()
}

/// `None` for ops that leave every pixel unchanged.
fn compile_op(op: FilterOp) -> Option<Stage> {
    match op {
        FilterOp::Brightness(percent) => {
            let amount = percent / 100.0;
            (amount != 1.0).then_some(Stage::Linear {
                slope: amount,
                intercept: 0.0,
            })
        }
        FilterOp::Contrast(percent) => {
            let amount = percent / 100.0;
            (amount != 1.0).then_some(Stage::Linear {
                slope: amount,
                intercept: 0.5 - 0.5 * amount,
            })
        }
        FilterOp::Saturate(percent) => {
            let s = percent / 100.0;
            (s != 1.0).then_some(Stage::Matrix(saturate_matrix(s)))
        }
        FilterOp::Sepia(percent) => {
            let amount = (percent / 100.0).min(1.0);
            (amount != 0.0).then_some(Stage::Matrix(sepia_matrix(amount)))
        }
        FilterOp::HueRotate(degrees) => {
            (degrees % 360.0 != 0.0).then_some(Stage::Matrix(hue_rotate_matrix(degrees)))
        }
        FilterOp::Invert(percent) => {
            let amount = (percent / 100.0).min(1.0);
            (amount != 0.0).then_some(Stage::Linear {
                slope: 1.0 - 2.0 * amount,
                intercept: amount,
            })
        }
        FilterOp::Grayscale(percent) => {
            let amount = (percent / 100.0).min(1.0);
            (amount != 0.0).then_some(Stage::Matrix(grayscale_matrix(amount)))
        }
    }
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix {
    let s = 1.0 - amount;
    [
        [0.393 + 0.607 * s, 0.769 - 0.769 * s, 0.189 - 0.189 * s],
        [0.349 - 0.349 * s, 0.686 + 0.314 * s, 0.168 - 0.168 * s],
        [0.272 - 0.272 * s, 0.534 - 0.534 * s, 0.131 + 0.869 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let s = 1.0 - amount;
    [
        [0.2126 + 0.7874 * s, 0.7152 - 0.7152 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 + 0.2848 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 - 0.7152 * s, 0.0722 + 0.9278 * s],
    ]
}

fn apply_stages(stages: &[Stage], pixel: u32) -> u32 {
    let [r, g, b] = unpack_rgb(pixel);
    let mut rgb = [
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ];

    for stage in stages {
        rgb = match stage {
            Stage::Linear { slope, intercept } => rgb.map(|c| c * slope + intercept),
            Stage::Matrix(m) => [
                m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
                m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
                m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
            ],
        }
        .map(|c| c.clamp(0.0, 1.0));
    }

    pack_rgb(to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]))
}

fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
