//! Animated pixel heightmaps for Bevy.
//!
//! Turns an ordered sequence of images into an animated grid of vertical
//! boxes: each working-resolution pixel becomes one column whose height
//! encodes luminance and whose vertex color encodes the pixel color, with
//! smoothstepped blending between successive frames.
//!
//! # Pipeline
//!
//! - **[`FrameBuffer`]**: CPU-side linear RGBA samples decoded from a Bevy
//!   [`Image`](bevy::prelude::Image), box-filter resampled to the working
//!   grid resolution (capped by `max_resolution`).
//! - **[`mapper`]**: pure per-cell functions mapping a sample to a target
//!   column height and graded base color (saturation, brightness, tint,
//!   height darkening).
//! - **[`CellGrid`]**: per-cell current/target state, blended each tick.
//! - **[`CubeGridMeshBuilder`]**: fixed-topology cuboid mesh (24 vertices,
//!   36 indices per cell); indices written once, positions/colors rewritten
//!   in place every tick.
//! - **[`Sequencer`]**: hold → transition state machine driving playback.
//! - **[`UpdateThrottle`]**: gates normal recomputation and collider
//!   refreshes to configurable tick intervals.
//!
//! [`PixelHeightmap`] wires these together behind explicit `tick(dt)` /
//! `play` / `pause` / `stop` / `set_frame` entry points, and
//! [`animate_pixel_heightmap`] adapts that loop to a Bevy `Update` system
//! that mutates a mesh asset in place.
//!
//! # Feature Flags
//!
//! - `physics`: Enables [`collider`] and [`collider::build_cell_heightfield_collider`]
//!   for Avian3D integration.
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_pixel_heightmap::{
//!     PixelHeightmap, PixelHeightmapConfig, PixelHeightmapMesh, animate_pixel_heightmap,
//! };
//!
//! fn setup(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//!     images: Res<Assets<Image>>,
//!     frames: Res<MyFrameHandles>,
//! ) {
//!     let sources: Vec<Image> = frames.collect_loaded(&images);
//!     let config = PixelHeightmapConfig::default()
//!         .with_max_resolution(130)
//!         .with_height_range(0.0, 2.0);
//!
//!     let animator = PixelHeightmap::from_images(&sources, config);
//!     let handle = meshes.add(animator.to_mesh().expect("frames loaded"));
//!
//!     commands.spawn((
//!         Mesh3d(handle.clone()),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//!     commands.insert_resource(PixelHeightmapMesh { handle });
//!     commands.insert_resource(animator);
//! }
//!
//! // app.add_systems(Update, animate_pixel_heightmap);
//! ```

pub mod cells;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod mapper;
pub mod math;
pub mod sampler;
pub mod sequencer;
pub mod throttle;

#[cfg(feature = "physics")]
pub mod collider;

pub use cells::{Cell, CellGrid};
pub use config::PixelHeightmapConfig;
pub use controller::{
    PixelHeightmap, PixelHeightmapMesh, TickReport, animate_pixel_heightmap,
};
pub use error::FrameError;
pub use geometry::{CubeGridMeshBuilder, INDICES_PER_CELL, VERTICES_PER_CELL};
pub use sampler::{FrameBuffer, derive_grid_size};
pub use sequencer::{Sequencer, SequencerCommand};
pub use throttle::UpdateThrottle;

#[cfg(feature = "physics")]
pub use collider::build_cell_heightfield_collider;
