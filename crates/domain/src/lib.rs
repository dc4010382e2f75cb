mod countdown;
mod error;
mod filter;
mod frame;
mod geometry;
mod history;
mod image;
mod preset;

pub use countdown::{Countdown, CountdownTick, DEFAULT_COUNTDOWN_SECONDS};
pub use error::DomainError;
pub use filter::{parse_filter_string, FilterChannel, FilterOp, FilterVector};
pub use frame::{pack_rgb, unpack_rgb, FacingMode, Frame};
pub use geometry::{crop_rect, AspectRatio, CropRect, PixelRect};
pub use history::FilterHistory;
pub use image::{detect_image_kind, ImageKind};
pub use preset::{find_preset, Preset, PRESETS};
