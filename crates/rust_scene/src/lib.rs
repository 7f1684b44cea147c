//! # Rust Scene
//!
//! A 2D scene graph with cached transforms, draw ordering, culling and hit
//! testing.
//!
//! ## Features
//!
//! - **Hierarchy**: arena-backed nodes addressed by generational handles
//! - **Lazy Transforms**: local, world and inverse matrices recomputed on read
//! - **Draw Ordering**: stable per-frame queue sorted by accumulated order
//! - **Components**: pluggable drawing and hit testing per node
//! - **Animators**: one time-driven mutator per node with a pluggable scheduler
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_scene::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     rust_scene::foundation::logging::init();
//!
//!     let mut scene = SceneGraph::new();
//!     let root = scene.create_node();
//!     let ship = scene.create_node();
//!     scene.attach_child(root, ship)?;
//!
//!     let hull = scene.insert_component(ShapeRenderer::rectangle(Vec2::new(2.0, 1.0)));
//!     scene.add_component(ship, hull)?;
//!
//!     let spin = scene.insert_animator(Rotate::by(std::f32::consts::PI, 2.0));
//!     scene.set_animator(ship, Some(spin))?;
//!
//!     let camera = OrthoCamera::new(Vec2::new(64.0, 36.0));
//!     let mut commands = CommandBuffer::new();
//!     scene.update(1.0 / 60.0);
//!     let queue = scene.draw_frame(root, &camera, &mut commands);
//!     assert_eq!(queue.len(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animators;
pub mod components;
pub mod config;
pub mod foundation;
pub mod scene;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        animators::{Fade, Move, Rotate, Scale, Sequence},
        components::{ShapeRenderer, SpriteRenderer},
        config::{Config, ConfigError, SceneConfig},
        foundation::math::{Color, Mat4, Mat4Ext, Vec2, Vec3},
        scene::{
            Aabb2, Animator, AnimatorId, Camera, CommandBuffer, Component, ComponentId, DrawQueue, Node, NodeId,
            OrthoCamera, SceneError, SceneGraph, UpdateList, UpdateScheduler,
        },
    };
}
