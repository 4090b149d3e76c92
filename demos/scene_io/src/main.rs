//! Round-trips a small scene through the binary scene format.
//!
//! Builds a scene with a tagged player, a ring of point lights, and a sun,
//! saves it to disk, loads it back into a fresh [`Scene`], and prints what
//! came out the other side.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use glam::Vec3;
use tracing::info;

use ember_scene::components::{self, DirectionalLight, PointLight, Tag, Transform};
use ember_scene::{EntityId, Scene};
use ember_stream::BinaryStream;

#[derive(Parser)]
#[command(name = "scene_io", about = "Scene save/load round-trip demo")]
struct Args {
    /// Where to write the scene file
    #[arg(short, long, default_value = "demo.scene")]
    output: PathBuf,

    /// Number of point lights to place
    #[arg(short, long, default_value_t = 4)]
    lights: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    components::register_builtin();

    let scene = build_scene(args.lights)?;
    info!(
        name = scene.name(),
        entities = scene.entity_count(),
        "scene built"
    );

    let mut stream = BinaryStream::new();
    scene.serialize(&mut stream)?;
    stream
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        bytes = stream.len(),
        "scene saved"
    );

    let mut loaded = Scene::new("empty");
    let mut stream = BinaryStream::load(&args.output)
        .with_context(|| format!("reading {}", args.output.display()))?;
    loaded.deserialize(&mut stream)?;

    ensure!(
        loaded.entity_count() == scene.entity_count(),
        "entity count changed across the round trip"
    );

    info!(
        name = loaded.name(),
        entities = loaded.entity_count(),
        "scene loaded"
    );
    loaded.each_component(|entity: EntityId, tag: &Tag| {
        info!(%entity, name = %tag.name, "tagged entity");
    });
    loaded.each_component(|entity: EntityId, light: &PointLight| {
        info!(%entity, intensity = light.intensity, "point light");
    });

    Ok(())
}

fn build_scene(lights: u32) -> Result<Scene> {
    let mut scene = Scene::new("demo");

    let player = scene.spawn_named("Player");
    scene.add_component(player, Transform::from_position(Vec3::ZERO))?;

    let sun = scene.spawn_named("Sun");
    scene.add_component(sun, DirectionalLight::default())?;

    for index in 0..lights {
        let angle = index as f32 / lights.max(1) as f32 * std::f32::consts::TAU;
        let light = scene.create_entity();
        scene.add_component(
            light,
            Transform::from_position(Vec3::new(angle.cos(), 2.0, angle.sin()) * 5.0),
        )?;
        scene.add_component(light, PointLight::new(Vec3::ONE, 1.0 + index as f32))?;
    }

    Ok(scene)
}
