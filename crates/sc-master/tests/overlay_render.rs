//! Renderer lifecycle and draw output against a recording host.

mod common;

use common::{asset_dir, config_for, Call, RecordingHost, ALL_ICONS};
use sc_master::gfx::{Rect, Rgba, Vec2};
use sc_master::{DecodedMelody, Lifecycle, NoteButton, OverlayRenderer, OverlayView, SongDisplay};
use NoteButton::*;

fn full_song() -> SongDisplay {
    SongDisplay::new(
        [NoteA, NoteCDown, NoteCRight, NoteCLeft, NoteCUp, NoteA, NoteCUp, NoteCDown]
            .into_iter()
            .collect(),
    )
}

fn shown(display: &SongDisplay) -> OverlayView<'_> {
    OverlayView {
        shown: true,
        display: Some(display),
    }
}

/// Renderer past both loading ticks, with the recorded calls cleared.
fn ready_renderer(name: &str, host: &mut RecordingHost) -> OverlayRenderer {
    let dir = asset_dir(name, &ALL_ICONS);
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let idle = OverlayView { shown: false, display: None };
    renderer.on_render_tick(host, idle);
    renderer.on_render_tick(host, idle);
    assert_eq!(renderer.lifecycle(), Lifecycle::Ready);
    host.clear();
    renderer
}

#[test]
fn first_tick_only_loads_the_font() {
    let dir = asset_dir("first-tick", &ALL_ICONS);
    let mut host = RecordingHost::new();
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(renderer.lifecycle(), Lifecycle::FontReady);
    assert_eq!(
        host.calls,
        vec![Call::LoadFont {
            path: dir.join("Cantarell-Regular.ttf"),
            size: 22.0,
        }]
    );
}

#[test]
fn font_failure_is_retried_next_tick() {
    let dir = asset_dir("font-retry", &ALL_ICONS);
    let mut host = RecordingHost::new();
    host.fail_font = true;
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));
    assert_eq!(renderer.lifecycle(), Lifecycle::Unloaded);
    assert!(host.sprites().is_empty());

    host.fail_font = false;
    renderer.on_render_tick(&mut host, shown(&song));
    assert_eq!(renderer.lifecycle(), Lifecycle::FontReady);

    let font_loads = host
        .calls
        .iter()
        .filter(|c| matches!(c, Call::LoadFont { .. }))
        .count();
    assert_eq!(font_loads, 3);
}

#[test]
fn second_tick_loads_icons_and_draws() {
    let dir = asset_dir("second-tick", &ALL_ICONS);
    let mut host = RecordingHost::new();
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(renderer.lifecycle(), Lifecycle::Ready);
    let sprites = dir.join("sprites");
    let expected: Vec<_> = ALL_ICONS.iter().map(|s| sprites.join(format!("{}.png", s))).collect();
    assert_eq!(host.loaded_textures(), expected);
    assert_eq!(host.sprites().len(), 8);
    assert_eq!(host.texts().len(), 1);
}

#[test]
fn full_song_draws_icons_then_caption() {
    let mut host = RecordingHost::new();
    let mut renderer = ready_renderer("full-song", &mut host);
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));

    // Texture ids follow sorted file names: a, c_down, c_left, c_right, c_up.
    let ids = [1, 2, 4, 3, 5, 1, 5, 2];
    let expected: Vec<(u64, Rect)> = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, Rect::new(542.0 + 12.0 * i as f32, 446.0, 12.0, 32.0)))
        .collect();
    assert_eq!(host.sprites(), expected);

    match host.calls.last() {
        Some(Call::Text { text, pos, color, outline }) => {
            assert_eq!(text, "Your Scarecrow's Song: ");
            assert_eq!(*pos, Vec2::new(342.0, 454.0));
            assert_eq!(*color, Rgba::WHITE);
            assert_eq!(*outline, Rgba::BLACK);
        }
        other => panic!("expected caption last, got {:?}", other),
    }
}

#[test]
fn sprites_use_the_whole_texture_and_white_tint() {
    let mut host = RecordingHost::new();
    let mut renderer = ready_renderer("sprite-src", &mut host);
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));

    for call in &host.calls {
        if let Call::Sprite { src, tint, .. } = call {
            assert_eq!(*src, Rect::new(0.0, 0.0, 24.0, 64.0));
            assert_eq!(*tint, Rgba::WHITE);
        }
    }
}

#[test]
fn hidden_screen_draws_nothing() {
    let mut host = RecordingHost::new();
    let mut renderer = ready_renderer("hidden", &mut host);
    let song = full_song();

    renderer.on_render_tick(&mut host, OverlayView { shown: false, display: Some(&song) });
    renderer.on_render_tick(&mut host, OverlayView { shown: true, display: None });

    assert!(host.calls.is_empty());
}

#[test]
fn short_song_stops_at_first_missing_slot() {
    let mut host = RecordingHost::new();
    let mut renderer = ready_renderer("short-song", &mut host);
    let song = SongDisplay::new([NoteA, NoteCDown, NoteCUp].into_iter().collect());

    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(host.sprites().len(), 3);
    assert!(host.texts().is_empty());
}

#[test]
fn hole_in_song_stops_drawing() {
    let mut host = RecordingHost::new();
    let mut renderer = ready_renderer("hole", &mut host);
    let notes = DecodedMelody::from_slots(&[
        Some(NoteA),
        None,
        Some(NoteCUp),
        Some(NoteCUp),
        Some(NoteCUp),
        Some(NoteCUp),
        Some(NoteCUp),
        Some(NoteCUp),
    ]);
    let song = SongDisplay::new(notes);

    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(host.sprites().len(), 1);
    assert!(host.texts().is_empty());
}

#[test]
fn missing_icon_file_stops_drawing() {
    let dir = asset_dir("missing-icon", &["a", "c_down"]);
    let mut host = RecordingHost::new();
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(renderer.lifecycle(), Lifecycle::Ready);
    // Slots 0 and 1 are a and c_down; c_right has no icon.
    assert_eq!(host.sprites().len(), 2);
    assert!(host.texts().is_empty());
}

#[test]
fn texture_failure_releases_and_retries() {
    let dir = asset_dir("texture-retry", &ALL_ICONS);
    let mut host = RecordingHost::new();
    host.fail_texture = Some("c_left".into());
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(renderer.lifecycle(), Lifecycle::FontReady);
    let mut released = host.released();
    released.sort();
    assert_eq!(released, vec![1, 2]);
    assert!(host.sprites().is_empty());

    host.fail_texture = None;
    renderer.on_render_tick(&mut host, shown(&song));
    assert_eq!(renderer.lifecycle(), Lifecycle::Ready);
    assert_eq!(host.sprites().len(), 8);
}

#[test]
fn stray_files_in_sprite_dir_are_ignored() {
    let dir = asset_dir("stray-files", &ALL_ICONS);
    let sprites = dir.join("sprites");
    std::fs::write(sprites.join(".DS_Store"), b"\0\0\0\x01Bud1").unwrap();
    std::fs::write(sprites.join("Thumbs.db"), b"").unwrap();
    std::fs::write(sprites.join("README.md"), b"note icons").unwrap();
    std::fs::create_dir_all(sprites.join("unused")).unwrap();
    let mut host = RecordingHost::new();
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(renderer.lifecycle(), Lifecycle::Ready);
    let expected: Vec<_> = ALL_ICONS
        .iter()
        .map(|s| sprites.join(format!("{}.png", s)))
        .collect();
    assert_eq!(host.loaded_textures(), expected);
    assert!(host.released().is_empty());
    assert_eq!(host.sprites().len(), 8);
    assert_eq!(host.texts().len(), 1);
}

#[test]
fn upper_case_png_extension_is_an_icon() {
    let dir = asset_dir("upper-case", &["a", "c_down", "c_left", "c_right"]);
    let sprites = dir.join("sprites");
    std::fs::write(sprites.join("c_up.PNG"), b"").unwrap();
    let mut host = RecordingHost::new();
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));

    assert!(host.loaded_textures().contains(&sprites.join("c_up.PNG")));
}

#[test]
fn missing_sprite_dir_keeps_font() {
    let dir = std::env::temp_dir().join(format!("sc-overlay-no-sprites-{}", std::process::id()));
    let mut host = RecordingHost::new();
    let mut renderer = OverlayRenderer::new(config_for(&dir));
    let song = full_song();

    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));
    renderer.on_render_tick(&mut host, shown(&song));

    assert_eq!(renderer.lifecycle(), Lifecycle::FontReady);
    let font_loads = host
        .calls
        .iter()
        .filter(|c| matches!(c, Call::LoadFont { .. }))
        .count();
    assert_eq!(font_loads, 1);
}
