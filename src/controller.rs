//! Top-level animator: owns frames, cell state, geometry and playback.
//!
//! [`PixelHeightmap`] is driven explicitly — construct it, then call
//! [`tick`](PixelHeightmap::tick) once per rendered frame with the elapsed
//! time. For Bevy apps, [`animate_pixel_heightmap`] wraps that loop in a
//! system that keeps a mesh asset in sync, mirroring how splat textures are
//! re-uploaded on change.

use bevy::prelude::*;

use crate::cells::CellGrid;
use crate::config::PixelHeightmapConfig;
use crate::geometry::CubeGridMeshBuilder;
use crate::mapper::{map_cell, target_height};
use crate::sampler::{FrameBuffer, derive_grid_size};
use crate::sequencer::{Sequencer, SequencerCommand};
use crate::throttle::UpdateThrottle;

/// What a tick changed, so the caller knows which consumers to refresh.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickReport {
    /// Vertex positions/colors were rewritten this tick.
    pub mesh_changed: bool,
    /// Normals were recomputed this tick and should be re-uploaded.
    pub normals_refreshed: bool,
    /// The collision representation is due for a refresh this tick.
    pub collider_due: bool,
}

struct ActiveState {
    grid: CellGrid,
    geometry: CubeGridMeshBuilder,
    sequencer: Sequencer,
    throttle: UpdateThrottle,
}

/// Animated pixel heightmap: one vertical box per working-resolution pixel,
/// blending between an ordered sequence of source frames.
///
/// Constructed with a non-empty frame list the animator derives its grid from
/// frame 0 (capped by `max_resolution`), loads frame 0 snapped, and builds
/// the full cuboid mesh. An empty frame list is reported and leaves the
/// instance inert: no geometry, no playback, every control call a no-op.
#[derive(Resource)]
pub struct PixelHeightmap {
    config: PixelHeightmapConfig,
    frames: Vec<FrameBuffer>,
    state: Option<ActiveState>,
}

impl PixelHeightmap {
    /// Creates an animator over pre-decoded frame buffers.
    ///
    /// All frames are assumed to share frame 0's resolution.
    pub fn new(frames: Vec<FrameBuffer>, config: PixelHeightmapConfig) -> Self {
        let config = config.validated();

        if frames.is_empty() {
            error!("pixel heightmap initialized with no frames; staying inert");
            return Self {
                config,
                frames,
                state: None,
            };
        }

        let (w, h) = derive_grid_size(
            frames[0].width(),
            frames[0].height(),
            config.max_resolution,
        );

        let grid = CellGrid::new(w, h);
        let geometry = CubeGridMeshBuilder::new(w, h, &config);
        let sequencer = Sequencer::new(
            frames.len(),
            config.frame_hold_duration,
            config.transition_duration,
            config.looping,
            config.auto_play,
        );

        let mut this = Self {
            config,
            frames,
            state: Some(ActiveState {
                grid,
                geometry,
                sequencer,
                throttle: UpdateThrottle::new(),
            }),
        };

        this.load_frame(0);
        if let Some(state) = &mut this.state {
            state.grid.snap_all();
            state.geometry.build(&state.grid);
        }
        this
    }

    /// Creates an animator by decoding a slice of Bevy images.
    ///
    /// Frames that cannot be decoded are reported and skipped; if none
    /// survive, the animator is inert.
    pub fn from_images(images: &[Image], config: PixelHeightmapConfig) -> Self {
        let frames: Vec<FrameBuffer> = images
            .iter()
            .enumerate()
            .filter_map(|(i, image)| match FrameBuffer::from_image(image) {
                Ok(frame) => Some(frame),
                Err(err) => {
                    warn!("skipping frame {i}: {err}");
                    None
                }
            })
            .collect();
        Self::new(frames, config)
    }

    /// Resamples frame `index` to the working grid and retargets every cell.
    ///
    /// Out-of-range indices are reported and skipped without touching state.
    fn load_frame(&mut self, index: usize) -> bool {
        let Some(state) = &mut self.state else {
            return false;
        };
        let Some(frame) = self.frames.get(index) else {
            warn!(
                "frame index {index} out of range (have {} frames), load skipped",
                self.frames.len()
            );
            return false;
        };

        let samples = frame.resample(state.grid.width(), state.grid.height());
        for (i, sample) in samples.iter().enumerate() {
            let height = target_height(&self.config, *sample);
            let color = map_cell(&self.config, *sample, height);
            state.grid.retarget(i, height, color);
        }
        true
    }

    /// Advances the animation by `dt` seconds and rewrites the geometry.
    ///
    /// This is the single per-frame entry point; control calls must not run
    /// concurrently with it.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let command = self
            .state
            .as_mut()
            .and_then(|state| state.sequencer.tick(dt));

        match command {
            Some(SequencerCommand::Retarget { frame }) => {
                self.load_frame(frame);
            }
            Some(SequencerCommand::Blend { t }) => {
                if let Some(state) = &mut self.state {
                    state.grid.blend_all(t);
                }
            }
            Some(SequencerCommand::Snap) => {
                if let Some(state) = &mut self.state {
                    state.grid.snap_all();
                }
            }
            None => {}
        }

        let Some(state) = self.state.as_mut() else {
            return TickReport::default();
        };
        state.geometry.rewrite(&state.grid);
        state.throttle.advance();

        let normals_refreshed = state
            .throttle
            .normals_due(self.config.recalculate_normals, self.config.normal_update_interval);
        if normals_refreshed {
            state.geometry.recompute_normals();
        }

        TickReport {
            mesh_changed: true,
            normals_refreshed,
            collider_due: state
                .throttle
                .collision_due(self.config.enable_collision, self.config.collision_update_interval),
        }
    }

    /// Starts or resumes playback.
    pub fn play(&mut self) {
        if let Some(state) = &mut self.state {
            state.sequencer.play();
        }
    }

    /// Freezes playback in place.
    pub fn pause(&mut self) {
        if let Some(state) = &mut self.state {
            state.sequencer.pause();
        }
    }

    /// Stops playback and snaps back to frame 0 with no blend.
    pub fn stop(&mut self) {
        if self.state.is_none() {
            return;
        }
        if let Some(state) = &mut self.state {
            state.sequencer.stop();
        }
        self.load_frame(0);
        if let Some(state) = &mut self.state {
            state.grid.snap_all();
            state.geometry.rewrite(&state.grid);
        }
    }

    /// Jumps straight to frame `index`, no blend, keeping the play/pause
    /// flag. Out-of-range indices are reported and skipped.
    pub fn set_frame(&mut self, index: usize) {
        if self.state.is_none() {
            return;
        }
        if index >= self.frames.len() {
            warn!(
                "set_frame({index}) out of range (have {} frames), ignored",
                self.frames.len()
            );
            return;
        }
        if let Some(state) = &mut self.state {
            state.sequencer.force_frame(index);
        }
        self.load_frame(index);
        if let Some(state) = &mut self.state {
            state.grid.snap_all();
            state.geometry.rewrite(&state.grid);
        }
    }

    /// Adopts a new configuration.
    ///
    /// Timing, loop, color and gradient settings take effect immediately: the
    /// current frame is re-mapped and snapped (grid dimensions are fixed at
    /// construction, so `max_resolution` changes require a new animator).
    /// Returns `true` when `enable_collision` flipped, in which case the
    /// caller must attach or detach the collider now rather than waiting for
    /// the throttle.
    pub fn on_config_changed(&mut self, config: PixelHeightmapConfig) -> bool {
        let config = config.validated();
        let collision_toggled = config.enable_collision != self.config.enable_collision;
        self.config = config;

        if let Some(state) = &mut self.state {
            state.sequencer.set_timing(
                self.config.frame_hold_duration,
                self.config.transition_duration,
                self.config.looping,
            );
            state.geometry.apply_config(&self.config);
        }

        let current = self.current_frame();
        self.load_frame(current);
        if let Some(state) = &mut self.state {
            state.grid.snap_all();
            state.geometry.rewrite(&state.grid);
        }

        collision_toggled
    }

    /// `false` when construction failed (no usable frames).
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Working grid dimensions, `(width, height)` in cells.
    pub fn grid_size(&self) -> Option<(usize, usize)> {
        self.state
            .as_ref()
            .map(|s| (s.grid.width(), s.grid.height()))
    }

    /// Number of loaded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the frame currently displayed or being blended toward.
    pub fn current_frame(&self) -> usize {
        self.state
            .as_ref()
            .map(|s| s.sequencer.current_frame())
            .unwrap_or(0)
    }

    /// Whether playback is advancing.
    pub fn is_playing(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.sequencer.is_playing())
    }

    /// Whether a blend toward the current frame is underway.
    pub fn is_transitioning(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.sequencer.is_transitioning())
    }

    /// The active configuration (post-validation).
    pub fn config(&self) -> &PixelHeightmapConfig {
        &self.config
    }

    /// Read access to the cell state store.
    pub fn cells(&self) -> Option<&CellGrid> {
        self.state.as_ref().map(|s| &s.grid)
    }

    /// Read access to the geometry buffers.
    pub fn mesh_builder(&self) -> Option<&CubeGridMeshBuilder> {
        self.state.as_ref().map(|s| &s.geometry)
    }

    /// Builds a fresh renderable mesh from the current buffers.
    pub fn to_mesh(&self) -> Option<Mesh> {
        self.mesh_builder().map(CubeGridMeshBuilder::to_mesh)
    }

    /// Axis-aligned bounds `(min, max)` enclosing every state the animation
    /// can reach: the full grid footprint up to `max_height`.
    ///
    /// In-place attribute updates do not refresh a render `Aabb` computed
    /// from the initial mesh, so give the mesh entity a fixed `Aabb` built
    /// from these bounds to keep frustum culling correct as columns grow.
    pub fn world_bounds(&self) -> Option<(Vec3, Vec3)> {
        let (w, h) = self.grid_size()?;
        let s = self.config.pixel_spacing;
        Some((
            Vec3::ZERO,
            Vec3::new(w as f32 * s, self.config.max_height, h as f32 * s),
        ))
    }
}

/// Resource holding the mesh asset the animator writes into.
///
/// Insert alongside the [`PixelHeightmap`] resource before adding
/// [`animate_pixel_heightmap`] to the `Update` schedule.
///
/// # Example
///
/// ```ignore
/// let animator = PixelHeightmap::from_images(&frames, config);
/// let handle = meshes.add(animator.to_mesh().unwrap());
/// commands.spawn((Mesh3d(handle.clone()), MeshMaterial3d(material)));
/// commands.insert_resource(PixelHeightmapMesh { handle });
/// commands.insert_resource(animator);
/// app.add_systems(Update, animate_pixel_heightmap);
/// ```
#[derive(Resource)]
pub struct PixelHeightmapMesh {
    /// Handle to the animated mesh asset.
    pub handle: Handle<Mesh>,
}

/// Bevy system: ticks the animator with frame time and re-uploads the mutated
/// attributes into the target mesh asset in place.
///
/// Rewriting attributes does not recompute the render `Aabb` the entity got
/// at spawn, so a mesh built from a short first frame can be frustum-culled
/// once columns animate taller. Insert a fixed `Aabb` covering
/// [`PixelHeightmap::world_bounds`] on the mesh entity to avoid that.
pub fn animate_pixel_heightmap(
    time: Res<Time>,
    mut animator: ResMut<PixelHeightmap>,
    target: Res<PixelHeightmapMesh>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let report = animator.tick(time.delta_secs());
    if !report.mesh_changed {
        return;
    }

    let Some(mesh) = meshes.get_mut(&target.handle) else {
        return;
    };
    if let Some(builder) = animator.mesh_builder() {
        builder.apply_to_mesh(mesh, report.normals_refreshed);
    }
}
