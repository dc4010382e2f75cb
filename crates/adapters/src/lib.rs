pub mod camera;
pub mod export;
pub mod filters;
pub mod fs;
pub mod presenters;

pub use camera::{
    decode_frame, StillImageSource, TestPatternSource, TEST_PATTERN_HEIGHT, TEST_PATTERN_WIDTH,
};
pub use export::PngExporter;
pub use filters::CpuFilterRenderer;
pub use fs::{load_recipe, parse_recipe, SystemClock};
pub use presenters::{
    present_channel_value, present_crop, present_export, present_preset_row,
    present_presets_json, present_title,
};
