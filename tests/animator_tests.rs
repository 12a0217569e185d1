use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_pixel_heightmap::{FrameBuffer, PixelHeightmap, PixelHeightmapConfig};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

fn solid_frame(w: usize, h: usize, c: [f32; 4]) -> FrameBuffer {
    FrameBuffer::new(w, h, vec![c; w * h])
}

fn base_config() -> PixelHeightmapConfig {
    PixelHeightmapConfig {
        pixel_spacing: 1.0,
        min_height: 0.0,
        max_height: 10.0,
        max_resolution: 0,
        transition_duration: 1.0,
        frame_hold_duration: 1.0,
        auto_play: false,
        looping: true,
        height_darkening: 0.0,
        use_vertical_gradient: false,
        ..Default::default()
    }
}

#[test]
fn empty_frame_list_leaves_animator_inert() {
    let mut animator = PixelHeightmap::new(Vec::new(), base_config());
    assert!(!animator.is_initialized());
    assert!(animator.to_mesh().is_none());
    assert!(animator.grid_size().is_none());

    let report = animator.tick(1.0);
    assert!(!report.mesh_changed, "inert animator must not report changes");

    // Control calls are no-ops, not panics.
    animator.play();
    animator.stop();
    animator.set_frame(0);
}

#[test]
fn grid_derives_from_first_frame() {
    let animator = PixelHeightmap::new(vec![solid_frame(8, 6, WHITE)], base_config());
    assert_eq!(animator.grid_size(), Some((8, 6)));
    assert_eq!(animator.frame_count(), 1);
}

#[test]
fn resolution_cap_preserves_aspect_ratio() {
    let cfg = PixelHeightmapConfig {
        max_resolution: 130,
        ..base_config()
    };
    let animator = PixelHeightmap::new(vec![solid_frame(377, 377, WHITE)], cfg);
    let (w, h) = animator.grid_size().unwrap();
    assert!(w <= 130 && h <= 130);
    assert_eq!(w, h, "square source stays square");
}

#[test]
fn white_frame_maps_to_max_height() {
    let animator = PixelHeightmap::new(vec![solid_frame(2, 2, WHITE)], base_config());
    let cells = animator.cells().unwrap();
    for cell in cells.iter() {
        assert!((cell.current_height - 10.0).abs() < 1e-3);
        assert_eq!(cell.current_height, cell.target_height, "init snaps");
    }
}

#[test]
fn black_frame_maps_to_min_height() {
    let animator = PixelHeightmap::new(vec![solid_frame(2, 2, BLACK)], base_config());
    for cell in animator.cells().unwrap().iter() {
        assert_eq!(cell.current_height, 0.0);
    }
}

#[test]
fn set_frame_is_idempotent_on_buffers() {
    let frames = vec![solid_frame(4, 4, BLACK), solid_frame(4, 4, WHITE)];
    let mut animator = PixelHeightmap::new(frames, base_config());

    animator.set_frame(1);
    let positions = animator.mesh_builder().unwrap().positions().to_vec();
    let colors = animator.mesh_builder().unwrap().colors().to_vec();

    animator.set_frame(1);
    assert_eq!(animator.mesh_builder().unwrap().positions(), positions.as_slice());
    assert_eq!(animator.mesh_builder().unwrap().colors(), colors.as_slice());
}

#[test]
fn set_frame_out_of_range_is_skipped() {
    let mut animator = PixelHeightmap::new(vec![solid_frame(2, 2, WHITE)], base_config());
    let before = animator.mesh_builder().unwrap().positions().to_vec();

    animator.set_frame(5);

    assert_eq!(animator.current_frame(), 0, "frame index unchanged");
    assert_eq!(
        animator.mesh_builder().unwrap().positions(),
        before.as_slice(),
        "buffers untouched"
    );
}

#[test]
fn grid_dimensions_survive_frame_changes() {
    let frames = vec![solid_frame(6, 4, BLACK), solid_frame(6, 4, WHITE)];
    let mut animator = PixelHeightmap::new(frames, base_config());
    let before = animator.grid_size();

    animator.set_frame(1);
    assert_eq!(animator.grid_size(), before);

    animator.play();
    for _ in 0..20 {
        animator.tick(0.25);
    }
    assert_eq!(animator.grid_size(), before);
}

#[test]
fn playback_blends_heights_monotonically() {
    let frames = vec![solid_frame(2, 2, BLACK), solid_frame(2, 2, WHITE)];
    let mut animator = PixelHeightmap::new(frames, base_config());
    animator.play();

    animator.tick(1.0); // hold expires, retarget frame 1
    assert!(animator.is_transitioning());

    let mut last = animator.cells().unwrap().cell(0).current_height;
    assert_eq!(last, 0.0, "blend starts from black frame's height");

    for _ in 0..3 {
        animator.tick(0.25);
        let now = animator.cells().unwrap().cell(0).current_height;
        assert!(now >= last, "height approaches target monotonically");
        assert!(now <= 10.0 + 1e-3);
        last = now;
    }

    animator.tick(0.5); // progress crosses 1.0 → snap
    let cell = *animator.cells().unwrap().cell(0);
    assert_eq!(cell.current_height, cell.target_height, "snap is exact");
    assert!(!animator.is_transitioning());
}

#[test]
fn looping_playback_wraps_to_frame_zero() {
    let frames = vec![
        solid_frame(2, 2, BLACK),
        solid_frame(2, 2, [0.5, 0.5, 0.5, 1.0]),
        solid_frame(2, 2, WHITE),
    ];
    let mut animator = PixelHeightmap::new(frames, base_config());
    animator.play();

    // Each frame needs 1s hold + 1s transition.
    for _ in 0..4 {
        animator.tick(1.0);
    }
    assert_eq!(animator.current_frame(), 2);
    animator.tick(1.0); // frame 2's hold expires → wraps
    assert_eq!(animator.current_frame(), 0);
    assert!(animator.is_playing());
}

#[test]
fn non_looping_playback_parks_on_last_frame() {
    let frames = vec![solid_frame(2, 2, BLACK), solid_frame(2, 2, WHITE)];
    let cfg = PixelHeightmapConfig {
        looping: false,
        ..base_config()
    };
    let mut animator = PixelHeightmap::new(frames, cfg);
    animator.play();

    animator.tick(1.0); // retarget frame 1
    animator.tick(1.0); // snap
    animator.tick(1.0); // final hold expires → stop

    assert!(!animator.is_playing());
    assert_eq!(animator.current_frame(), 1);

    // Terminal invariant: displayed state equals the last frame's target.
    let cell = *animator.cells().unwrap().cell(0);
    assert!((cell.current_height - 10.0).abs() < 1e-3);
    assert_eq!(cell.current_height, cell.target_height);

    // No further target changes.
    animator.tick(5.0);
    assert_eq!(animator.current_frame(), 1);
}

#[test]
fn stop_rewinds_to_frame_zero_snapped() {
    let frames = vec![solid_frame(2, 2, BLACK), solid_frame(2, 2, WHITE)];
    let mut animator = PixelHeightmap::new(frames, base_config());
    animator.play();
    animator.tick(1.0);
    animator.tick(0.3); // mid-blend

    animator.stop();
    assert!(!animator.is_playing());
    assert_eq!(animator.current_frame(), 0);
    let cell = *animator.cells().unwrap().cell(0);
    assert_eq!(cell.current_height, 0.0, "frame 0 reloaded with no blend");
    assert_eq!(cell.current_height, cell.target_height);
}

#[test]
fn normal_throttle_fires_on_interval() {
    let cfg = PixelHeightmapConfig {
        recalculate_normals: true,
        normal_update_interval: 2,
        ..base_config()
    };
    let mut animator = PixelHeightmap::new(vec![solid_frame(2, 2, WHITE)], cfg);

    let mut refreshed = Vec::new();
    for tick in 1..=6 {
        if animator.tick(0.1).normals_refreshed {
            refreshed.push(tick);
        }
    }
    assert_eq!(refreshed, vec![2, 4, 6]);
}

#[test]
fn collider_throttle_fires_on_interval() {
    let cfg = PixelHeightmapConfig {
        enable_collision: true,
        collision_update_interval: 3,
        ..base_config()
    };
    let mut animator = PixelHeightmap::new(vec![solid_frame(2, 2, WHITE)], cfg);

    let mut due = Vec::new();
    for tick in 1..=9 {
        if animator.tick(0.1).collider_due {
            due.push(tick);
        }
    }
    assert_eq!(due, vec![3, 6, 9]);
}

#[test]
fn config_change_reports_collision_toggle() {
    let mut animator = PixelHeightmap::new(vec![solid_frame(2, 2, WHITE)], base_config());

    let mut cfg = animator.config().clone();
    cfg.enable_collision = true;
    assert!(animator.on_config_changed(cfg.clone()), "off → on toggles");
    assert!(!animator.on_config_changed(cfg.clone()), "unchanged");

    cfg.enable_collision = false;
    assert!(animator.on_config_changed(cfg), "on → off toggles");
}

#[test]
fn config_change_remaps_current_frame_snapped() {
    let mut animator = PixelHeightmap::new(vec![solid_frame(2, 2, WHITE)], base_config());

    let mut cfg = animator.config().clone();
    cfg.max_height = 4.0;
    animator.on_config_changed(cfg);

    let cell = *animator.cells().unwrap().cell(0);
    assert!((cell.current_height - 4.0).abs() < 1e-3);
    assert_eq!(cell.current_height, cell.target_height, "immediate snap");
}

#[test]
fn from_images_decodes_rgba8() {
    let image = Image::new(
        Extent3d {
            width: 2,
            height: 2,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        vec![255u8; 2 * 2 * 4],
        TextureFormat::Rgba8Unorm,
        default(),
    );
    let animator = PixelHeightmap::from_images(&[image], base_config());
    assert!(animator.is_initialized());
    assert_eq!(animator.grid_size(), Some((2, 2)));
    let cell = animator.cells().unwrap().cell(0);
    assert!((cell.current_height - 10.0).abs() < 1e-3, "white pixels → max height");
}

#[test]
fn from_images_skips_undecodable_frames() {
    let good = Image::new(
        Extent3d {
            width: 2,
            height: 2,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        vec![0u8; 2 * 2 * 4],
        TextureFormat::Rgba8Unorm,
        default(),
    );
    let bad = Image::new(
        Extent3d {
            width: 2,
            height: 2,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        vec![0u8; 2 * 2],
        TextureFormat::R8Unorm,
        default(),
    );

    let animator = PixelHeightmap::from_images(&[good, bad], base_config());
    assert!(animator.is_initialized());
    assert_eq!(animator.frame_count(), 1, "unsupported frame dropped");
}

#[test]
fn from_images_skips_zero_sized_frames() {
    // A 0×0 image is constructible (empty byte buffer matches the zero
    // volume) and must be dropped like any other bad frame, not panic.
    let empty = Image::new(
        Extent3d {
            width: 0,
            height: 0,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        Vec::new(),
        TextureFormat::Rgba8Unorm,
        default(),
    );

    let animator = PixelHeightmap::from_images(&[empty], base_config());
    assert!(!animator.is_initialized(), "no usable frames → inert");

    let good = Image::new(
        Extent3d {
            width: 2,
            height: 2,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        vec![255u8; 2 * 2 * 4],
        TextureFormat::Rgba8Unorm,
        default(),
    );
    let zero = Image::new(
        Extent3d {
            width: 0,
            height: 4,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        Vec::new(),
        TextureFormat::Rgba8Unorm,
        default(),
    );
    let animator = PixelHeightmap::from_images(&[zero, good], base_config());
    assert!(animator.is_initialized());
    assert_eq!(animator.frame_count(), 1, "zero-sized frame dropped");
    assert_eq!(animator.grid_size(), Some((2, 2)), "grid derives from the good frame");
}

#[test]
fn world_bounds_cover_the_full_height_range() {
    let cfg = PixelHeightmapConfig {
        pixel_spacing: 2.0,
        ..base_config()
    };
    // Flat black frame: displayed columns are all zero height, but the
    // bounds must still cover what the animation can grow into.
    let animator = PixelHeightmap::new(vec![solid_frame(4, 3, BLACK)], cfg);
    let (min, max) = animator.world_bounds().unwrap();
    assert_eq!(min, Vec3::ZERO);
    assert_eq!(max, Vec3::new(8.0, 10.0, 6.0));

    let inert = PixelHeightmap::new(Vec::new(), base_config());
    assert!(inert.world_bounds().is_none());
}

#[test]
fn mesh_output_sizes_match_grid() {
    let animator = PixelHeightmap::new(vec![solid_frame(3, 5, WHITE)], base_config());
    let mesh = animator.to_mesh().unwrap();
    assert_eq!(mesh.count_vertices(), 3 * 5 * 24);
    assert_eq!(mesh.indices().unwrap().len(), 3 * 5 * 36);
}
