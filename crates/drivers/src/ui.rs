use std::time::{Duration, Instant};

use font8x8::UnicodeFonts;
use lite_booth_adapters::{present_channel_value, present_export, present_title};
use lite_booth_application::{
    ApplicationError, ApplicationService, ApplyPresetCommand, CountdownStatus, CropPreviewQuery,
    CycleAspectRatioCommand, DiscardCaptureCommand, ExportCommand, RedoCommand,
    RenderPreviewCommand, ResetFiltersCommand, SessionSnapshot, SessionSnapshotQuery,
    SetChannelCommand, ShowOriginalCommand, StartCameraCommand, StartCountdownCommand,
    StopCameraCommand, SwitchCameraCommand, TickCountdownCommand, ToggleMirrorCommand,
    UndoCommand, ViewMode,
};
use lite_booth_domain::{CropRect, FilterChannel, FilterVector, Frame, PRESETS};
use log::{error, warn};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::AppConfig;

const WINDOW_WIDTH: usize = 1120;
const WINDOW_HEIGHT: usize = 760;
const CANVAS_MARGIN: usize = 24;
const HEADER_TOP: usize = 20;
const HEADER_HEIGHT: usize = 56;
const WORKAREA_TOP: usize = 94;
const WORKAREA_BOTTOM_MARGIN: usize = 28;
const SPLIT_GUTTER: usize = 24;
const CONTROL_PANEL_WIDTH: usize = 300;
const CONTROL_INSET: usize = 18;
const SLIDER_HEIGHT: usize = 40;
const SLIDER_GAP: usize = 10;
const PRESET_BUTTON_HEIGHT: usize = 26;
const PRESET_BUTTON_GAP: usize = 4;
const NOTICE_MS: u64 = 4_000;
const COUNTDOWN_SCALE: usize = 12;

const PRESET_KEYS: [Key; 8] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
];

const KEY_HELP_COLOR: u32 = 0x6A5B47;
const KEY_HELP_DISABLED_COLOR: u32 = 0xC8B89F;

const SLIDER_COLORS: [u32; 7] = [
    0xFF996C, 0x9CD8BE, 0xFFD58F, 0xC89A6A, 0x8A95D8, 0xD8E2F0, 0xBEA6E8,
];

#[derive(Debug, Clone, Copy)]
struct SliderSpec {
    channel: FilterChannel,
    top: usize,
    color: u32,
}

/// A slider under the mouse. Its value is previewed until release, when it
/// becomes one history entry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SliderDrag {
    channel: FilterChannel,
    start_value: f32,
    value: f32,
}

impl SliderDrag {
    fn begin(channel: FilterChannel, value: f32) -> Self {
        Self {
            channel,
            start_value: value,
            value,
        }
    }

    fn update(&mut self, value: f32) -> bool {
        if (self.value - value).abs() < f32::EPSILON {
            return false;
        }
        self.value = value;
        true
    }

    fn draft(&self, committed: FilterVector) -> FilterVector {
        committed.with_channel(self.channel, self.value)
    }

    fn committed_value(&self) -> Option<f32> {
        ((self.value - self.start_value).abs() >= f32::EPSILON).then_some(self.value)
    }
}

struct Notice {
    duration_ms: u64,
    text: Option<String>,
    shown_at_ms: u64,
}

impl Notice {
    fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            text: None,
            shown_at_ms: 0,
        }
    }

    fn show(&mut self, text: impl Into<String>, now_ms: u64) {
        self.text = Some(text.into());
        self.shown_at_ms = now_ms;
    }

    fn current(&self, now_ms: u64) -> Option<&str> {
        if now_ms.saturating_sub(self.shown_at_ms) >= self.duration_ms {
            return None;
        }
        self.text.as_deref()
    }
}

#[derive(Debug, Clone)]
struct PreviewCanvas {
    width: usize,
    height: usize,
    source_width: u32,
    source_height: u32,
    pixels: Vec<u32>,
}

pub fn launch_window(service: &mut ApplicationService, config: &AppConfig) -> Result<(), String> {
    let width = WINDOW_WIDTH;
    let height = WINDOW_HEIGHT;
    let sliders = slider_specs();

    let mut window = Window::new("lite-booth", width, height, WindowOptions::default())
        .map_err(|error| format!("failed to start UI window: {error}"))?;
    window.limit_update_rate(Some(Duration::from_micros(16_000)));

    let mut buffer = vec![0x222222_u32; width * height];
    let start = Instant::now();
    let mut notice = Notice::new(NOTICE_MS);
    let mut drag: Option<SliderDrag> = None;
    let mut was_mouse_down = false;
    let mut preview: Option<PreviewCanvas> = None;
    let mut preview_dirty = true;

    if let Err(error) = service.start_camera(StartCameraCommand) {
        report(&mut notice, error, 0);
    }

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now_ms = start.elapsed().as_millis() as u64;
        if drag.is_none() && handle_keys(&window, service, config, &mut notice, now_ms) {
            preview_dirty = true;
        }

        let mouse_down = window.get_mouse_down(MouseButton::Left);
        let mouse_pos = window.get_mouse_pos(MouseMode::Clamp);
        let hovered_slider = mouse_pos
            .and_then(|(mouse_x, mouse_y)| slider_at_position(mouse_x, mouse_y, &sliders, width));

        if mouse_down {
            if let Some((mouse_x, mouse_y)) = mouse_pos {
                if !was_mouse_down {
                    let committed = service.filters();
                    drag = hovered_slider
                        .map(|channel| SliderDrag::begin(channel, committed.get(channel)));
                    if drag.is_none() {
                        if let Some(index) = preset_at_position(mouse_x, mouse_y, width) {
                            preview_dirty |= apply_preset(service, index, &mut notice, now_ms);
                        }
                    }
                }
                if let Some(active) = drag.as_mut() {
                    preview_dirty |= active.update(x_to_value(active.channel, mouse_x, width));
                }
            }
        } else if let Some(released) = drag.take() {
            if let Some(value) = released.committed_value() {
                let command = SetChannelCommand {
                    channel: released.channel,
                    value,
                };
                if let Err(error) = service.set_channel(command) {
                    report(&mut notice, error, now_ms);
                }
                preview_dirty = true;
            }
        }
        was_mouse_down = mouse_down;

        match service.tick_countdown(TickCountdownCommand) {
            Ok(CountdownStatus::Captured(summary)) => {
                notice.show(
                    format!("captured {}x{}", summary.width, summary.height),
                    now_ms,
                );
                preview_dirty = true;
            }
            Ok(_) => {}
            Err(error) => report(&mut notice, error, now_ms),
        }

        let snapshot = service.snapshot(SessionSnapshotQuery);
        let committed = snapshot.filters;
        let shown_filters = drag.map_or(committed, |active| active.draft(committed));
        let live = snapshot.view == ViewMode::Camera && snapshot.streaming;
        if snapshot.view == ViewMode::Camera && !snapshot.streaming {
            preview = None;
        } else if live || preview_dirty {
            let command = RenderPreviewCommand {
                draft: drag.map(|active| active.draft(committed)),
            };
            match service.render_preview(command) {
                Ok(frame) => preview = Some(preview_canvas_from_frame(&frame, width, height)),
                Err(error) => {
                    if live {
                        service.stop_camera(StopCameraCommand);
                    }
                    report(&mut notice, error, now_ms);
                }
            }
        }
        preview_dirty = false;

        draw_background(&mut buffer, width, height);
        draw_header(&mut buffer, width, &snapshot);
        draw_preview_shadow(&mut buffer, width, height);
        draw_preview_panel(&mut buffer, width, height, preview.as_ref(), &snapshot);
        if let Some(canvas) = preview.as_ref() {
            if let Ok(Some(rect)) = service.crop_preview(CropPreviewQuery) {
                draw_crop_overlay(&mut buffer, width, height, canvas, &rect);
            }
        }
        if let Some(remaining) = snapshot.countdown_remaining {
            draw_countdown(&mut buffer, width, height, remaining);
        }
        if let Some(text) = notice.current(now_ms) {
            draw_notice(&mut buffer, width, height, text);
        }

        let focused = drag.map(|active| active.channel).or(hovered_slider);
        draw_control_panel(&mut buffer, width, height);
        draw_control_text(&mut buffer, width, &snapshot, focused);
        draw_sliders(&mut buffer, width, &sliders, shown_filters);
        draw_presets(&mut buffer, width, committed);
        draw_key_help(&mut buffer, width, &snapshot);
        if let Some(hovered) = hovered_slider {
            draw_slider_hover(&mut buffer, width, hovered, &sliders);
        }

        window.set_title(&format!("{} | esc quit", present_title(&snapshot)));
        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|error| format!("failed to update UI window: {error}"))?;
    }

    service.stop_camera(StopCameraCommand);
    Ok(())
}

/// Returns true when the preview needs a fresh render.
fn handle_keys(
    window: &Window,
    service: &mut ApplicationService,
    config: &AppConfig,
    notice: &mut Notice,
    now_ms: u64,
) -> bool {
    let ctrl = window.is_key_down(Key::LeftCtrl) || window.is_key_down(Key::RightCtrl);
    let pressed = |key: Key| window.is_key_pressed(key, KeyRepeat::No);
    let mut changed = false;

    for (index, key) in PRESET_KEYS.iter().enumerate() {
        if pressed(*key) {
            changed |= apply_preset(service, index, notice, now_ms);
        }
    }

    if ctrl && pressed(Key::Z) {
        changed |= service.undo(UndoCommand);
    }
    if ctrl && pressed(Key::Y) {
        changed |= service.redo(RedoCommand);
    }
    if !ctrl && pressed(Key::R) {
        service.reset_filters(ResetFiltersCommand);
        changed = true;
    }
    if pressed(Key::A) {
        let ratio = service.cycle_aspect_ratio(CycleAspectRatioCommand);
        notice.show(format!("crop {ratio}"), now_ms);
        changed = true;
    }
    if pressed(Key::M) {
        let mirrored = service.toggle_mirror(ToggleMirrorCommand);
        notice.show(if mirrored { "mirror on" } else { "mirror off" }, now_ms);
        changed = true;
    }
    if pressed(Key::F) {
        if let Some(facing) = attempt(service.switch_camera(SwitchCameraCommand), notice, now_ms) {
            notice.show(format!("camera {}", facing.as_str()), now_ms);
        }
        let snapshot = service.snapshot(SessionSnapshotQuery);
        if snapshot.view == ViewMode::Camera && !snapshot.streaming {
            attempt(service.start_camera(StartCameraCommand), notice, now_ms);
        }
        changed = true;
    }
    if pressed(Key::Space) {
        let started = attempt(service.start_countdown(StartCountdownCommand), notice, now_ms);
        if let Some(seconds) = started {
            notice.show(format!("capturing in {seconds}"), now_ms);
        }
    }
    if pressed(Key::E) {
        let command = ExportCommand {
            file_path: config.export_path(),
        };
        if let Some(artifact) = attempt(service.export(command), notice, now_ms) {
            notice.show(present_export(&artifact), now_ms);
        }
    }
    if pressed(Key::Backspace) {
        attempt(service.discard_capture(DiscardCaptureCommand), notice, now_ms);
        changed = true;
    }

    let hold_original = window.is_key_down(Key::O);
    if hold_original != service.snapshot(SessionSnapshotQuery).show_original {
        service.set_show_original(ShowOriginalCommand {
            enabled: hold_original,
        });
        changed = true;
    }

    changed
}

fn apply_preset(
    service: &mut ApplicationService,
    index: usize,
    notice: &mut Notice,
    now_ms: u64,
) -> bool {
    let Some(preset) = PRESETS.get(index) else {
        return false;
    };
    let command = ApplyPresetCommand {
        name: preset.name.to_string(),
    };
    attempt(service.apply_preset(command), notice, now_ms).is_some()
}

fn attempt<T>(result: Result<T, ApplicationError>, notice: &mut Notice, now_ms: u64) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            report(notice, error, now_ms);
            None
        }
    }
}

fn report(notice: &mut Notice, error: ApplicationError, now_ms: u64) {
    if error.is_recoverable() {
        warn!("{error}");
    } else {
        error!("{error}");
    }
    notice.show(error.to_string(), now_ms);
}

fn preview_canvas_from_frame(frame: &Frame, window_width: usize, window_height: usize) -> PreviewCanvas {
    let src_width = frame.width() as usize;
    let src_height = frame.height() as usize;

    let (_, _, stage_width, stage_height) = stage_bounds(window_width, window_height);
    let max_width = stage_width.saturating_sub(2).max(1);
    let max_height = stage_height.saturating_sub(2).max(1);

    let scale = (max_width as f32 / src_width as f32).min(max_height as f32 / src_height as f32);
    let dst_width = ((src_width as f32 * scale).max(1.0)).round() as usize;
    let dst_height = ((src_height as f32 * scale).max(1.0)).round() as usize;

    let source = frame.pixels();
    let mut pixels = vec![0_u32; dst_width * dst_height];
    for y in 0..dst_height {
        let src_y = y * src_height / dst_height;
        for x in 0..dst_width {
            let src_x = x * src_width / dst_width;
            pixels[y * dst_width + x] = source[src_y * src_width + src_x];
        }
    }

    PreviewCanvas {
        width: dst_width,
        height: dst_height,
        source_width: frame.width(),
        source_height: frame.height(),
        pixels,
    }
}

fn draw_preview_panel(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    preview: Option<&PreviewCanvas>,
    snapshot: &SessionSnapshot,
) {
    let panel_left = preview_panel_left();
    let panel_top = preview_panel_top();
    let panel_right = preview_panel_right(width);
    let panel_bottom = preview_panel_bottom(height);

    fill_rect(
        buffer,
        width,
        panel_left,
        panel_top,
        panel_right.saturating_sub(panel_left),
        panel_bottom.saturating_sub(panel_top),
        0xFBFAF7,
    );
    draw_rect(
        buffer,
        width,
        panel_left,
        panel_top,
        panel_right.saturating_sub(panel_left),
        panel_bottom.saturating_sub(panel_top),
        0xC8B89F,
    );

    let (stage_left, stage_top, stage_width, stage_height) = stage_bounds(width, height);
    fill_rect(buffer, width, stage_left, stage_top, stage_width, stage_height, 0x101010);
    draw_rect(buffer, width, stage_left, stage_top, stage_width, stage_height, 0x2D2D2D);

    let Some(preview) = preview else {
        let hint = "NO CAMERA - PRESS F TO RETRY";
        let x = stage_left + stage_width.saturating_sub(hint.len() * 8) / 2;
        draw_text(buffer, width, x, stage_top + stage_height / 2, hint, 0x8C8C8C);
        return;
    };

    let (start_x, start_y) = canvas_origin(preview, width, height);
    let draw_width = preview.width.min(stage_width.saturating_sub(2));
    let draw_height = preview.height.min(stage_height.saturating_sub(2));
    for y in 0..draw_height {
        for x in 0..draw_width {
            let color = preview.pixels[y * preview.width + x];
            set_pixel(buffer, width, start_x + x, start_y + y, color);
        }
    }

    if snapshot.show_original {
        fill_rect(buffer, width, start_x + 8, start_y + 8, 84, 16, 0x1B1F26);
        draw_text(buffer, width, start_x + 14, start_y + 12, "ORIGINAL", 0xFFFFFF);
    }
}

/// Shades everything outside the export crop and outlines the kept area.
fn draw_crop_overlay(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    canvas: &PreviewCanvas,
    rect: &CropRect,
) {
    let (origin_x, origin_y) = canvas_origin(canvas, width, height);
    let scale_x = canvas.width as f64 / canvas.source_width as f64;
    let scale_y = canvas.height as f64 / canvas.source_height as f64;
    let left = ((rect.x * scale_x).round() as usize).min(canvas.width);
    let top = ((rect.y * scale_y).round() as usize).min(canvas.height);
    let right = (((rect.x + rect.width) * scale_x).round() as usize).clamp(left, canvas.width);
    let bottom = (((rect.y + rect.height) * scale_y).round() as usize).clamp(top, canvas.height);

    if left == 0 && top == 0 && right == canvas.width && bottom == canvas.height {
        return;
    }
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if x < left || x >= right || y < top || y >= bottom {
                darken_pixel(buffer, width, origin_x + x, origin_y + y, 110);
            }
        }
    }
    draw_rect(
        buffer,
        width,
        origin_x + left,
        origin_y + top,
        right - left,
        bottom - top,
        0xFFFFFF,
    );
}

fn draw_countdown(buffer: &mut [u32], width: usize, height: usize, remaining: u32) {
    let (stage_left, stage_top, stage_width, stage_height) = stage_bounds(width, height);
    let text = remaining.to_string();
    let glyph = 8 * COUNTDOWN_SCALE;
    let text_width = text.len() * glyph;
    let box_width = text_width + 48;
    let box_height = glyph + 48;
    let box_left = stage_left + stage_width.saturating_sub(box_width) / 2;
    let box_top = stage_top + stage_height.saturating_sub(box_height) / 2;

    for y in box_top..box_top + box_height {
        for x in box_left..box_left + box_width {
            darken_pixel(buffer, width, x, y, 150);
        }
    }
    draw_text_scaled(
        buffer,
        width,
        box_left + 24,
        box_top + 24,
        &text,
        0xFFFFFF,
        COUNTDOWN_SCALE,
    );
}

fn draw_notice(buffer: &mut [u32], width: usize, height: usize, text: &str) {
    let (stage_left, stage_top, stage_width, stage_height) = stage_bounds(width, height);
    let strip_top = (stage_top + stage_height).saturating_sub(26);
    fill_rect(
        buffer,
        width,
        stage_left + 1,
        strip_top,
        stage_width.saturating_sub(2),
        24,
        0x1A1F29,
    );
    let max_chars = stage_width.saturating_sub(24) / 8;
    let clipped: String = text.chars().take(max_chars).collect();
    draw_text(buffer, width, stage_left + 12, strip_top + 8, &clipped, 0xF7AE3D);
}

fn slider_specs() -> [SliderSpec; 7] {
    let start = slider_area_top();
    let stride = SLIDER_HEIGHT + SLIDER_GAP;
    let mut index = 0;
    FilterChannel::ALL.map(|channel| {
        let spec = SliderSpec {
            channel,
            top: start + stride * index,
            color: SLIDER_COLORS[index],
        };
        index += 1;
        spec
    })
}

fn draw_background(buffer: &mut [u32], width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            let t = y as f32 / height.max(1) as f32;
            let mut color = lerp_color(0xF7EFE0, 0xF2E1CC, t);
            if ((x + (y * 2)) / 36) % 2 == 0 {
                color = darken_color(color, 6);
            }
            buffer[y * width + x] = color;
        }
    }

    let vignette = 160usize;
    for y in 0..height {
        for x in 0..width {
            let dx = x.min(width.saturating_sub(1).saturating_sub(x));
            let dy = y.min(height.saturating_sub(1).saturating_sub(y));
            let edge = dx.min(dy);
            if edge < vignette {
                let strength = ((vignette - edge) as f32 / vignette as f32 * 20.0) as u8;
                let idx = y * width + x;
                buffer[idx] = darken_color(buffer[idx], strength);
            }
        }
    }
}

fn draw_sliders(buffer: &mut [u32], width: usize, sliders: &[SliderSpec], filters: FilterVector) {
    if let Some(first) = sliders.first() {
        let y = first.top.saturating_sub(14);
        draw_text(buffer, width, slider_left(width) + 8, y, "FILTERS", 0x6A5B47);
    }
    for slider in sliders {
        draw_slider_shell(buffer, width, slider.top);
        let value = filters.get(slider.channel);
        let x = value_to_x(slider.channel, value, width);
        draw_slider_track(buffer, width, slider.channel, slider.top, x, slider.color);
        draw_slider_knob(buffer, width, x, slider.top, slider.color);
        let label = format!(
            "{} {}",
            slider.channel.label(),
            present_channel_value(slider.channel, value)
        );
        draw_text(
            buffer,
            width,
            slider_left(width) + 8,
            slider.top + 5,
            &label,
            0x4A3E2E,
        );
    }
}

fn draw_control_text(
    buffer: &mut [u32],
    width: usize,
    snapshot: &SessionSnapshot,
    focused: Option<FilterChannel>,
) {
    let left = control_panel_left(width);
    let top = control_panel_top();
    draw_text(buffer, width, left + 24, top + 22, "LITE-BOOTH", 0xFFFFFF);

    let view_text = match (snapshot.view, snapshot.capture_size) {
        (ViewMode::Editing, Some((w, h))) => format!("EDITING {}X{}", w, h),
        (ViewMode::Editing, None) => "EDITING".to_string(),
        (ViewMode::Camera, _) => format!(
            "CAMERA {}{}",
            snapshot.facing.as_str().to_ascii_uppercase(),
            if snapshot.mirrored { " MIRRORED" } else { "" }
        ),
    };
    draw_text(buffer, width, left + 26, top + 50, &view_text, 0x1B1F26);

    let history_text = format!(
        "HISTORY {}/{}  CROP {}",
        snapshot.history_cursor + 1,
        snapshot.history_len,
        snapshot.aspect_ratio.as_str().to_ascii_uppercase()
    );
    draw_text(buffer, width, left + 26, top + 64, &history_text, 0x4A3E2E);

    let focus_text = focused
        .map(|channel| format!("{}: {}", channel.label(), channel_effect(channel)))
        .unwrap_or_else(|| "DRAG A SLIDER OR PICK A PRESET".to_string());
    draw_text(buffer, width, left + 26, top + 78, &focus_text, 0x4A3E2E);
}

fn draw_presets(buffer: &mut [u32], width: usize, filters: FilterVector) {
    let top = preset_area_top();
    draw_text(
        buffer,
        width,
        slider_left(width) + 8,
        top.saturating_sub(12),
        "PRESETS",
        0x6A5B47,
    );
    for (index, preset) in PRESETS.iter().enumerate() {
        let (left, button_top, button_width) = preset_button(index, width);
        let active = preset.filters == filters;
        let (fill, text_color) = if active {
            (0x1B1F26, 0xFFFFFF)
        } else {
            (0xFAF6EE, 0x4A3E2E)
        };
        fill_rect(
            buffer,
            width,
            left,
            button_top,
            button_width,
            PRESET_BUTTON_HEIGHT,
            fill,
        );
        draw_rect(
            buffer,
            width,
            left,
            button_top,
            button_width,
            PRESET_BUTTON_HEIGHT,
            0xD8C7AD,
        );
        let label = format!("{} {}", index + 1, preset.name.to_ascii_uppercase());
        draw_text(buffer, width, left + 8, button_top + 9, &label, text_color);
    }
}

fn draw_key_help(buffer: &mut [u32], width: usize, snapshot: &SessionSnapshot) {
    let top = preset_area_top() + 4 * (PRESET_BUTTON_HEIGHT + PRESET_BUTTON_GAP) + 4;
    let left = slider_left(width) + 4;
    let lines = [
        "SPACE SNAP  E SAVE  BKSP RETAKE",
        "A CROP  M MIRROR  F FLIP  O HOLD",
    ];
    for (row, line) in lines.iter().enumerate() {
        draw_text(buffer, width, left, top + row * 12, line, KEY_HELP_COLOR);
    }

    let mut x = left;
    for (label, color) in history_hints(snapshot) {
        draw_text(buffer, width, x, top + lines.len() * 12, label, color);
        x += (label.len() + 2) * 8;
    }
}

/// Undo/redo labels dim when the history cursor cannot move that way.
fn history_hints(snapshot: &SessionSnapshot) -> [(&'static str, u32); 3] {
    let shade = |enabled: bool| {
        if enabled {
            KEY_HELP_COLOR
        } else {
            KEY_HELP_DISABLED_COLOR
        }
    };
    [
        ("CTRL+Z UNDO", shade(snapshot.can_undo)),
        ("CTRL+Y REDO", shade(snapshot.can_redo)),
        ("R RESET", KEY_HELP_COLOR),
    ]
}

fn draw_slider_shell(buffer: &mut [u32], width: usize, top: usize) {
    let left = slider_left(width);
    let right = slider_right(width);
    fill_rect(
        buffer,
        width,
        left,
        top,
        right.saturating_sub(left).saturating_add(1),
        SLIDER_HEIGHT,
        0xFAF6EE,
    );
    draw_rect(
        buffer,
        width,
        left,
        top,
        right.saturating_sub(left).saturating_add(1),
        SLIDER_HEIGHT,
        0xD8C7AD,
    );
}

fn draw_slider_track(
    buffer: &mut [u32],
    width: usize,
    channel: FilterChannel,
    top: usize,
    knob_x: usize,
    color: u32,
) {
    let left = slider_left(width);
    let right = slider_right(width);
    let center_y = slider_track_y(top);

    for y in center_y.saturating_sub(2)..=center_y + 2 {
        for x in left + 8..right.saturating_sub(8) {
            set_pixel(buffer, width, x, y, 0xB8A58D);
        }
    }

    let neutral_x = value_to_x(channel, FilterVector::IDENTITY.get(channel), width);
    let range_start = neutral_x.min(knob_x).saturating_sub(1);
    let range_end = neutral_x.max(knob_x).saturating_add(1).min(right);
    for y in center_y.saturating_sub(2)..=center_y + 2 {
        for x in range_start..=range_end {
            set_pixel(buffer, width, x, y, color);
        }
    }
}

fn draw_slider_knob(buffer: &mut [u32], width: usize, x: usize, top: usize, color: u32) {
    let knob_w = 12;
    let knob_h = 14;
    let left = x.saturating_sub(knob_w / 2);
    let knob_top = slider_track_y(top).saturating_sub(knob_h / 2);

    fill_rect(buffer, width, left, knob_top, knob_w, knob_h, color);
    draw_rect(buffer, width, left, knob_top, knob_w, knob_h, 0xFFFFFF);
}

fn draw_header(buffer: &mut [u32], width: usize, snapshot: &SessionSnapshot) {
    let left = CANVAS_MARGIN;
    let right = width.saturating_sub(CANVAS_MARGIN);
    let band_width = right.saturating_sub(left);
    fill_rect(
        buffer,
        width,
        left,
        HEADER_TOP,
        band_width,
        HEADER_HEIGHT,
        0xFFFDF8,
    );
    draw_rect(
        buffer,
        width,
        left,
        HEADER_TOP,
        band_width,
        HEADER_HEIGHT,
        0xCCBBA4,
    );

    let accent_h = HEADER_HEIGHT.saturating_sub(16);
    let text_y = HEADER_TOP + 24;
    fill_rect(buffer, width, left + 12, HEADER_TOP + 8, 220, accent_h, 0xF05C4B);
    draw_text(buffer, width, left + 14, text_y, "LITE-BOOTH", 0xFFFFFF);

    fill_rect(buffer, width, left + 240, HEADER_TOP + 8, 160, accent_h, 0xF7AE3D);
    let history = format!(
        "HISTORY {}/{}",
        snapshot.history_cursor + 1,
        snapshot.history_len
    );
    draw_text(buffer, width, left + 248, text_y, &history, 0x1B1F26);

    let ratio_left = right.saturating_sub(210);
    fill_rect(buffer, width, ratio_left, HEADER_TOP + 8, 94, accent_h, 0x4E78D5);
    let ratio = snapshot.aspect_ratio.as_str().to_ascii_uppercase();
    draw_text(buffer, width, ratio_left + 8, text_y, &ratio, 0xFFFFFF);

    let view_left = right.saturating_sub(108);
    fill_rect(buffer, width, view_left, HEADER_TOP + 8, 82, accent_h, 0x1B1F26);
    let view = match snapshot.view {
        ViewMode::Camera => "CAMERA",
        ViewMode::Editing => "EDITING",
    };
    draw_text(buffer, width, view_left + 8, text_y, view, 0xFFFFFF);
}

fn fill_rect(buffer: &mut [u32], width: usize, left: usize, top: usize, w: usize, h: usize, color: u32) {
    for y in top..top.saturating_add(h) {
        for x in left..left.saturating_add(w) {
            set_pixel(buffer, width, x, y, color);
        }
    }
}

fn draw_rect(buffer: &mut [u32], width: usize, left: usize, top: usize, w: usize, h: usize, color: u32) {
    if w == 0 || h == 0 {
        return;
    }
    let right = left + w - 1;
    let bottom = top + h - 1;
    for x in left..=right {
        set_pixel(buffer, width, x, top, color);
        set_pixel(buffer, width, x, bottom, color);
    }
    for y in top..=bottom {
        set_pixel(buffer, width, left, y, color);
        set_pixel(buffer, width, right, y, color);
    }
}

fn lerp_color(start: u32, end: u32, t: f32) -> u32 {
    let clamped = t.clamp(0.0, 1.0);
    let sr = ((start >> 16) & 0xFF) as f32;
    let sg = ((start >> 8) & 0xFF) as f32;
    let sb = (start & 0xFF) as f32;
    let er = ((end >> 16) & 0xFF) as f32;
    let eg = ((end >> 8) & 0xFF) as f32;
    let eb = (end & 0xFF) as f32;

    let r = (sr + (er - sr) * clamped).round() as u32;
    let g = (sg + (eg - sg) * clamped).round() as u32;
    let b = (sb + (eb - sb) * clamped).round() as u32;
    (r << 16) | (g << 8) | b
}

fn darken_color(color: u32, amount: u8) -> u32 {
    let r = ((color >> 16) & 0xFF).saturating_sub(amount as u32);
    let g = ((color >> 8) & 0xFF).saturating_sub(amount as u32);
    let b = (color & 0xFF).saturating_sub(amount as u32);
    (r << 16) | (g << 8) | b
}

fn darken_pixel(buffer: &mut [u32], width: usize, x: usize, y: usize, amount: u8) {
    let height = buffer.len() / width;
    if x < width && y < height {
        let idx = y * width + x;
        buffer[idx] = darken_color(buffer[idx], amount);
    }
}

fn draw_control_panel(buffer: &mut [u32], width: usize, height: usize) {
    let left = control_panel_left(width);
    let top = control_panel_top();
    let right = control_panel_right(width);
    let bottom = control_panel_bottom(height);
    let panel_w = right.saturating_sub(left);
    let panel_h = bottom.saturating_sub(top);

    fill_rect(buffer, width, left, top, panel_w, panel_h, 0xFBFAF7);
    draw_rect(buffer, width, left, top, panel_w, panel_h, 0xCCBBA4);

    let band_w = panel_w.saturating_sub(36);
    fill_rect(buffer, width, left + 18, top + 18, band_w, 16, 0x1A1F29);
    fill_rect(buffer, width, left + 18, top + 44, band_w, 46, 0xF0E3D0);
    draw_rect(buffer, width, left + 18, top + 44, band_w, 46, 0xD4C1A6);
}

fn draw_preview_shadow(buffer: &mut [u32], width: usize, height: usize) {
    let panel_left = preview_panel_left();
    let panel_top = preview_panel_top();
    let panel_right = preview_panel_right(width);
    let panel_bottom = preview_panel_bottom(height);

    for y in panel_top + 4..panel_bottom + 8 {
        for x in panel_left + 4..panel_right + 8 {
            darken_pixel(buffer, width, x, y, 14);
        }
    }
}

fn draw_slider_hover(buffer: &mut [u32], width: usize, channel: FilterChannel, sliders: &[SliderSpec]) {
    if let Some(spec) = sliders.iter().find(|spec| spec.channel == channel) {
        let left = slider_left(width);
        let right = slider_right(width);
        draw_rect(
            buffer,
            width,
            left,
            spec.top.saturating_sub(1),
            right.saturating_sub(left).saturating_add(1),
            SLIDER_HEIGHT + 2,
            0x5A667A,
        );
    }
}

fn slider_left(width: usize) -> usize {
    control_panel_left(width).saturating_add(CONTROL_INSET)
}

fn slider_right(width: usize) -> usize {
    control_panel_right(width).saturating_sub(CONTROL_INSET)
}

fn slider_area_top() -> usize {
    control_panel_top() + 110
}

fn slider_track_y(top: usize) -> usize {
    top + SLIDER_HEIGHT * 2 / 3
}

fn preset_area_top() -> usize {
    slider_area_top() + 7 * (SLIDER_HEIGHT + SLIDER_GAP) + 16
}

/// Left, top and width of preset button `index`; two columns.
fn preset_button(index: usize, width: usize) -> (usize, usize, usize) {
    let left = slider_left(width);
    let button_width = slider_right(width).saturating_sub(left + PRESET_BUTTON_GAP) / 2;
    let column = index % 2;
    let row = index / 2;
    (
        left + column * (button_width + PRESET_BUTTON_GAP),
        preset_area_top() + row * (PRESET_BUTTON_HEIGHT + PRESET_BUTTON_GAP),
        button_width,
    )
}

fn preset_at_position(mouse_x: f32, mouse_y: f32, width: usize) -> Option<usize> {
    let x = mouse_x.max(0.0) as usize;
    let y = mouse_y.max(0.0) as usize;
    (0..PRESETS.len()).find(|index| {
        let (left, top, button_width) = preset_button(*index, width);
        x >= left && x < left + button_width && y >= top && y < top + PRESET_BUTTON_HEIGHT
    })
}

fn preview_panel_left() -> usize {
    CANVAS_MARGIN
}

fn preview_panel_top() -> usize {
    WORKAREA_TOP
}

fn preview_panel_right(width: usize) -> usize {
    width.saturating_sub(CANVAS_MARGIN + CONTROL_PANEL_WIDTH + SPLIT_GUTTER)
}

fn preview_panel_bottom(height: usize) -> usize {
    height.saturating_sub(WORKAREA_BOTTOM_MARGIN)
}

/// Left, top, width and height of the dark area the preview is drawn on.
fn stage_bounds(width: usize, height: usize) -> (usize, usize, usize, usize) {
    let stage_left = preview_panel_left() + 12;
    let stage_top = preview_panel_top() + 12;
    let stage_width = preview_panel_right(width).saturating_sub(stage_left + 12);
    let stage_height = preview_panel_bottom(height).saturating_sub(stage_top + 12);
    (stage_left, stage_top, stage_width, stage_height)
}

fn canvas_origin(canvas: &PreviewCanvas, width: usize, height: usize) -> (usize, usize) {
    let (stage_left, stage_top, stage_width, stage_height) = stage_bounds(width, height);
    let content_width = stage_width.saturating_sub(2);
    let content_height = stage_height.saturating_sub(2);
    (
        stage_left + 1 + content_width.saturating_sub(canvas.width.min(content_width)) / 2,
        stage_top + 1 + content_height.saturating_sub(canvas.height.min(content_height)) / 2,
    )
}

fn control_panel_left(width: usize) -> usize {
    preview_panel_right(width).saturating_add(SPLIT_GUTTER)
}

fn control_panel_right(width: usize) -> usize {
    width.saturating_sub(CANVAS_MARGIN)
}

fn control_panel_top() -> usize {
    WORKAREA_TOP
}

fn control_panel_bottom(height: usize) -> usize {
    height.saturating_sub(WORKAREA_BOTTOM_MARGIN)
}

fn slider_at_position(
    mouse_x: f32,
    mouse_y: f32,
    sliders: &[SliderSpec],
    width: usize,
) -> Option<FilterChannel> {
    let x = mouse_x.max(0.0) as usize;
    let y = mouse_y.max(0.0) as usize;
    let left = slider_left(width);
    let right = slider_right(width);
    if x < left || x > right {
        return None;
    }
    sliders
        .iter()
        .find(|spec| y >= spec.top.saturating_sub(2) && y <= spec.top + SLIDER_HEIGHT + 2)
        .map(|spec| spec.channel)
}

fn value_to_x(channel: FilterChannel, value: f32, width: usize) -> usize {
    let left = slider_left(width) as f32;
    let right = slider_right(width) as f32;
    let t = channel.fill_fraction(value);
    (left + t * (right - left)).round() as usize
}

/// Slider positions snap to whole percent or degree steps.
fn x_to_value(channel: FilterChannel, x: f32, width: usize) -> f32 {
    let left = slider_left(width) as f32;
    let right = slider_right(width) as f32;
    let clamped = x.clamp(left, right);
    let t = (clamped - left) / (right - left);
    let (min, max) = channel.range();
    (min + t * (max - min)).round()
}

fn set_pixel(buffer: &mut [u32], width: usize, x: usize, y: usize, color: u32) {
    let height = buffer.len() / width;
    if x < width && y < height {
        buffer[y * width + x] = color;
    }
}

fn draw_text(buffer: &mut [u32], width: usize, x: usize, y: usize, text: &str, color: u32) {
    draw_text_scaled(buffer, width, x, y, text, color, 1);
}

fn draw_text_scaled(
    buffer: &mut [u32],
    width: usize,
    x: usize,
    y: usize,
    text: &str,
    color: u32,
    scale: usize,
) {
    let mut cursor_x = x;
    for ch in text.chars() {
        if ch == '\n' {
            continue;
        }
        draw_char(buffer, width, cursor_x, y, ch, color, scale);
        cursor_x = cursor_x.saturating_add(8 * scale);
    }
}

fn draw_char(
    buffer: &mut [u32],
    width: usize,
    x: usize,
    y: usize,
    ch: char,
    color: u32,
    scale: usize,
) {
    let glyph = font8x8::BASIC_FONTS.get(ch).unwrap_or([0; 8]);
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8 {
            if (bits >> col) & 1 == 1 {
                fill_rect(
                    buffer,
                    width,
                    x + col * scale,
                    y + row * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }
}

fn channel_effect(channel: FilterChannel) -> &'static str {
    match channel {
        FilterChannel::Brightness => "overall light",
        FilterChannel::Contrast => "light-dark separation",
        FilterChannel::Saturation => "color intensity",
        FilterChannel::Sepia => "warm brown toning",
        FilterChannel::HueRotate => "shift every hue",
        FilterChannel::Invert => "negative image",
        FilterChannel::Grayscale => "drain color",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lite_booth_adapters::{CpuFilterRenderer, PngExporter, SystemClock, TestPatternSource};
    use lite_booth_application::SessionSettings;
    use lite_booth_domain::pack_rgb;

    fn undo_redo_enabled(service: &ApplicationService) -> (bool, bool) {
        let hints = history_hints(&service.snapshot(SessionSnapshotQuery));
        (
            hints[0].1 == KEY_HELP_COLOR,
            hints[1].1 == KEY_HELP_COLOR,
        )
    }

    #[test]
    fn history_hints_follow_cursor() {
        let mut service = ApplicationService::new(
            Box::new(TestPatternSource::new(8, 4)),
            Box::new(CpuFilterRenderer),
            Box::new(PngExporter),
            Box::new(SystemClock),
            SessionSettings::default(),
        );
        assert_eq!(undo_redo_enabled(&service), (false, false));

        service
            .set_channel(SetChannelCommand {
                channel: FilterChannel::Sepia,
                value: 40.0,
            })
            .expect("set channel");
        assert_eq!(undo_redo_enabled(&service), (true, false));

        assert!(service.undo(UndoCommand));
        assert_eq!(undo_redo_enabled(&service), (false, true));

        assert!(service.redo(RedoCommand));
        assert_eq!(undo_redo_enabled(&service), (true, false));
        assert_eq!(
            history_hints(&service.snapshot(SessionSnapshotQuery))[2],
            ("R RESET", KEY_HELP_COLOR)
        );
    }

    #[test]
    fn notice_expires_after_duration() {
        let mut notice = Notice::new(4_000);
        assert_eq!(notice.current(0), None);
        notice.show("camera unavailable", 100);
        assert_eq!(notice.current(4_099), Some("camera unavailable"));
        assert_eq!(notice.current(4_100), None);
    }

    #[test]
    fn x_and_value_mapping_roundtrip() {
        let width = WINDOW_WIDTH;
        for (channel, original) in [
            (FilterChannel::HueRotate, -90.0),
            (FilterChannel::Brightness, 150.0),
            (FilterChannel::Grayscale, 40.0),
        ] {
            let x = value_to_x(channel, original, width) as f32;
            let back = x_to_value(channel, x, width);
            assert!((original - back).abs() <= 1.0, "{channel:?}: {back}");
        }
    }

    #[test]
    fn slider_values_stay_inside_channel_range() {
        let width = WINDOW_WIDTH;
        assert_eq!(x_to_value(FilterChannel::HueRotate, 0.0, width), -180.0);
        assert_eq!(x_to_value(FilterChannel::Invert, 10_000.0, width), 100.0);
    }

    #[test]
    fn drag_commits_only_changed_values() {
        let mut drag = SliderDrag::begin(FilterChannel::Sepia, 0.0);
        assert_eq!(drag.committed_value(), None);
        assert!(drag.update(45.0));
        assert!(!drag.update(45.0));
        assert_eq!(drag.draft(FilterVector::IDENTITY).sepia, 45.0);
        assert_eq!(drag.committed_value(), Some(45.0));
        assert!(drag.update(0.0));
        assert_eq!(drag.committed_value(), None);
    }

    #[test]
    fn every_channel_has_a_hit_area() {
        let width = WINDOW_WIDTH;
        let sliders = slider_specs();
        let x = (slider_left(width) + 20) as f32;
        for spec in &sliders {
            let y = (spec.top + SLIDER_HEIGHT / 2) as f32;
            assert_eq!(slider_at_position(x, y, &sliders, width), Some(spec.channel));
        }
        assert_eq!(slider_at_position(10.0, 200.0, &sliders, width), None);
    }

    #[test]
    fn preset_buttons_do_not_overlap_sliders() {
        let width = WINDOW_WIDTH;
        let sliders = slider_specs();
        let last_slider_bottom = sliders[6].top + SLIDER_HEIGHT;
        let (_, first_top, _) = preset_button(0, width);
        assert!(first_top > last_slider_bottom);
        let (_, last_top, _) = preset_button(7, width);
        assert!(last_top + PRESET_BUTTON_HEIGHT < control_panel_bottom(WINDOW_HEIGHT));

        for index in 0..PRESETS.len() {
            let (left, top, _) = preset_button(index, width);
            let hit = preset_at_position((left + 2) as f32, (top + 2) as f32, width);
            assert_eq!(hit, Some(index));
        }
    }

    #[test]
    fn preview_canvas_keeps_aspect_ratio() {
        let frame = Frame::filled(1280, 720, pack_rgb(1, 2, 3)).expect("frame");
        let canvas = preview_canvas_from_frame(&frame, WINDOW_WIDTH, WINDOW_HEIGHT);
        let (_, _, stage_width, stage_height) = stage_bounds(WINDOW_WIDTH, WINDOW_HEIGHT);
        assert!(canvas.width <= stage_width && canvas.height <= stage_height);
        let ratio = canvas.width as f32 / canvas.height as f32;
        assert!((ratio - 16.0 / 9.0).abs() < 0.02);
        assert!(canvas.pixels.iter().all(|pixel| *pixel == pack_rgb(1, 2, 3)));
    }
}
