//! Scene graph demo application
//!
//! Builds a small ship-and-asteroids scene, animates it for a few frames and
//! logs the draw queue and hit tests of every frame.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

use rust_scene::animators::{Fade, Move, Rotate, Scale, Sequence};
use rust_scene::components::{ShapeRenderer, SpriteRenderer};
use rust_scene::config::{Config, ConfigError, SceneConfig};
use rust_scene::foundation::math::{Color, Vec2, Vec3};
use rust_scene::scene::{CommandBuffer, NodeId, OrthoCamera, SceneError, SceneGraph};

const FRAME_TIME: f32 = 1.0 / 30.0;
const FRAME_COUNT: usize = 90;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build scene: {0}")]
    Scene(#[from] SceneError),
}

struct DemoScene {
    scene: SceneGraph,
    camera: OrthoCamera,
    root: NodeId,
    ship: NodeId,
}

impl DemoScene {
    fn build(config: SceneConfig) -> Result<Self, DemoError> {
        let mut scene = SceneGraph::with_config(config);
        let camera = OrthoCamera::new(Vec2::new(64.0, 36.0));

        let root = scene.create_node();
        if let Some(node) = scene.node_mut(root) {
            node.set_name("root");
        }

        let background = scene.create_node();
        let starfield = scene.insert_component(SpriteRenderer::new(Vec2::new(64.0, 36.0)));
        scene.add_component(background, starfield)?;
        if let Some(node) = scene.node_mut(background) {
            node.set_name("background");
            node.set_color(Color::new(10, 10, 40, 255));
            node.set_order(-10);
        }
        scene.attach_child(root, background)?;

        let ship = scene.create_node();
        let hull = scene.insert_component(ShapeRenderer::new(vec![
            Vec2::new(0.0, 1.5),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
        ]));
        scene.add_component(ship, hull)?;
        if let Some(node) = scene.node_mut(ship) {
            node.set_name("ship");
            node.set_order(10);
        }
        scene.attach_child(root, ship)?;

        let flight = scene.insert_animator(
            Sequence::new()
                .then(Move::to(Vec2::new(12.0, 4.0), 1.0))
                .then(Rotate::by(std::f32::consts::FRAC_PI_2, 0.5))
                .then(Scale::to(Vec2::new(1.5, 1.5), 0.5)),
        );
        scene.set_animator(ship, Some(flight))?;

        let thruster = scene.create_node();
        let flame = scene.insert_component(
            ShapeRenderer::rectangle(Vec2::new(0.6, 1.0)).with_tint(Color::new(255, 140, 0, 255)),
        );
        scene.add_component(thruster, flame)?;
        if let Some(node) = scene.node_mut(thruster) {
            node.set_name("thruster");
            node.set_position(Vec3::new(0.0, -1.5, 0.0));
            node.set_order(-1);
        }
        scene.attach_child(ship, thruster)?;
        let flicker = scene.insert_animator(Fade::out(2.0));
        scene.set_animator(thruster, Some(flicker))?;

        for (index, x) in [-20.0_f32, -8.0, 40.0].into_iter().enumerate() {
            let asteroid = scene.create_node();
            let rock = scene.insert_component(ShapeRenderer::regular(7, 2.0));
            scene.add_component(asteroid, rock)?;
            if let Some(node) = scene.node_mut(asteroid) {
                node.set_name(format!("asteroid-{index}"));
                node.set_position(Vec3::new(x, -6.0, 0.0));
                node.set_color(Color::new(160, 150, 140, 255));
            }
            scene.attach_child(root, asteroid)?;
        }

        Ok(Self {
            scene,
            camera,
            root,
            ship,
        })
    }

    fn name_of(&self, node: NodeId) -> &str {
        self.scene.node(node).and_then(|node| node.name()).unwrap_or("<unnamed>")
    }

    fn run(&mut self) {
        let mut commands = CommandBuffer::with_capacity(self.scene.config().draw_queue_capacity);

        for frame in 0..FRAME_COUNT {
            commands.clear();
            self.scene.update(FRAME_TIME);
            let queue = self.scene.draw_frame(self.root, &self.camera, &mut commands);

            if frame % 30 == 0 {
                let names: Vec<&str> = queue.nodes().map(|node| self.name_of(node)).collect();
                log::info!("Frame {}: drawing {:?}", frame, names);

                let (triangles, lines) = commands.vertices();
                log::debug!(
                    "Frame {}: {} commands, {} triangle vertices, {} line vertices, {} bytes",
                    frame,
                    commands.len(),
                    triangles.len(),
                    lines.len(),
                    CommandBuffer::as_bytes(&triangles).len()
                );

                let probe = Vec2::new(12.0, 4.0);
                match self.scene.pick_node(&queue, probe) {
                    Some(node) => log::info!("Frame {}: {:?} hits {}", frame, probe, self.name_of(node)),
                    None => log::info!("Frame {}: {:?} hits nothing", frame, probe),
                }
            }
        }

        if let Some(ship) = self.scene.node(self.ship) {
            log::info!(
                "Ship finished at {:?} with rotation {:.3}",
                ship.world_position(),
                ship.rotation()
            );
        }
    }
}

fn load_config() -> Result<SceneConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            SceneConfig::load_from_file(&path)
        }
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> Result<(), DemoError> {
    rust_scene::foundation::logging::init();

    log::info!("Starting scene graph demo");

    let config = load_config()?;
    let mut demo = DemoScene::build(config)?;
    demo.run();

    log::info!("Demo finished");
    Ok(())
}
