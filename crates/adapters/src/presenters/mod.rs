use lite_booth_application::{ApplicationError, ExportArtifact, SessionSnapshot, ViewMode};
use lite_booth_domain::{AspectRatio, CropRect, FilterChannel, FilterVector, Preset};
use serde_json::json;

pub fn present_preset_row(preset: &Preset) -> String {
    format!("{}\t{}", preset.name, preset.filters.style_string())
}

pub fn present_presets_json(presets: &[Preset]) -> Result<String, ApplicationError> {
    let rows = presets
        .iter()
        .map(|preset| {
            json!({
                "name": preset.name,
                "filters": preset.filters,
                "style": preset.filters.style_string(),
            })
        })
        .collect::<Vec<_>>();
    serde_json::to_string_pretty(&rows).map_err(|error| ApplicationError::Encode(error.to_string()))
}

pub fn present_channel_value(channel: FilterChannel, value: f32) -> String {
    format!("{}{}", value.round() as i32, channel.unit())
}

pub fn present_crop(width: u32, height: u32, ratio: AspectRatio, rect: &CropRect) -> String {
    format!(
        "{}x{} at {}: x={:.2} y={:.2} width={:.2} height={:.2}",
        width, height, ratio, rect.x, rect.y, rect.width, rect.height
    )
}

pub fn present_export(artifact: &ExportArtifact) -> String {
    format!(
        "exported {}x{} to {}",
        artifact.width,
        artifact.height,
        artifact.file_path.display()
    )
}

pub fn present_title(snapshot: &SessionSnapshot) -> String {
    let mode = match snapshot.view {
        ViewMode::Camera => format!(
            "camera {}{}",
            snapshot.facing.as_str(),
            if snapshot.mirrored { " mirrored" } else { "" }
        ),
        ViewMode::Editing => match snapshot.capture_size {
            Some((width, height)) => format!("editing {}x{}", width, height),
            None => "editing".to_string(),
        },
    };
    format!(
        "lite-booth | {} | history {}/{} | crop {}{}",
        mode,
        snapshot.history_cursor + 1,
        snapshot.history_len,
        snapshot.aspect_ratio,
        if snapshot.show_original { " | original" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lite_booth_domain::{crop_rect, FacingMode, PRESETS};

    fn snapshot(view: ViewMode) -> SessionSnapshot {
        SessionSnapshot {
            view,
            filters: FilterVector::IDENTITY,
            history_cursor: 1,
            history_len: 3,
            can_undo: true,
            can_redo: true,
            aspect_ratio: AspectRatio::Square,
            mirrored: true,
            facing: FacingMode::User,
            streaming: view == ViewMode::Camera,
            countdown_remaining: None,
            capture_size: (view == ViewMode::Editing).then_some((640, 480)),
            show_original: false,
        }
    }

    #[test]
    fn preset_row_is_tab_separated() {
        let row = present_preset_row(&PRESETS[2]);
        assert!(row.starts_with("Noir\tbrightness(90%) contrast(120%)"));
        assert!(row.ends_with("grayscale(100%)"));
    }

    #[test]
    fn presets_json_lists_every_preset() {
        let text = present_presets_json(&PRESETS).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("parse");
        let rows = parsed.as_array().expect("array");
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[4]["name"], "Cyberpunk");
        assert_eq!(rows[4]["filters"]["hueRotate"], 180.0);
    }

    #[test]
    fn crop_line_uses_two_decimals() {
        let rect = crop_rect(1920, 1080, AspectRatio::Square).expect("crop");
        assert_eq!(
            present_crop(1920, 1080, AspectRatio::Square, &rect),
            "1920x1080 at 1:1: x=420.00 y=0.00 width=1080.00 height=1080.00"
        );
    }

    #[test]
    fn channel_values_carry_units() {
        assert_eq!(present_channel_value(FilterChannel::HueRotate, -9.6), "-10deg");
        assert_eq!(present_channel_value(FilterChannel::Sepia, 30.0), "30%");
    }

    #[test]
    fn title_reflects_view() {
        assert_eq!(
            present_title(&snapshot(ViewMode::Camera)),
            "lite-booth | camera user mirrored | history 2/3 | crop 1:1"
        );
        assert_eq!(
            present_title(&snapshot(ViewMode::Editing)),
            "lite-booth | editing 640x480 | history 2/3 | crop 1:1"
        );
    }
}
