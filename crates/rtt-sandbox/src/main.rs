//! Runtime transformer sandbox
//!
//! Runs a scripted session against an in-memory scene: pick an object, grab
//! a gizmo handle, drag it with snapping, then rotate and scale the
//! selection. Pass a RON config path as the first argument to override the
//! defaults.

use glam::{Quat, Vec3};

use rtt_core::{Domain, SnapSetting, SpaceType, Transform, TransformationKind, TransformerConfig};
use rtt_gizmo::CameraPose;
use rtt_transformer::{MemoryScene, Scene, TransformerTool};

const TRACE_DISTANCE: f32 = 1000.0;

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rtt_sandbox=debug,rtt_transformer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting runtime transformer sandbox");

    let config = load_config(std::env::args().nth(1));
    run_session(config);
}

fn load_config(path: Option<String>) -> TransformerConfig {
    let Some(path) = path else {
        let mut config = TransformerConfig::default();
        config.snapping.translate = SnapSetting::new(1.0);
        config.snapping.rotate = SnapSetting::new(15.0);
        return config;
    };

    match TransformerConfig::load(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load config {}: {}, using defaults", path, e);
            TransformerConfig::default()
        }
    }
}

fn run_session(config: TransformerConfig) {
    let mut scene = MemoryScene::new();
    let (_, crate_root) = scene.spawn_actor("Crate", Transform::from_translation(Vec3::ZERO));
    let (barrel, _) = scene.spawn_actor(
        "Barrel",
        Transform::from_rotation_translation(Quat::from_rotation_z(0.4), Vec3::new(4.0, 0.0, 0.0)),
    );

    let eye = Vec3::new(0.0, 0.0, 20.0);
    let look = Vec3::NEG_Z;
    let mut tool = TransformerTool::new(config);
    tool.set_camera(CameraPose::new(eye, look, 60.0));

    // Pick the crate, then add the barrel
    let pointer = |target: Vec3| (target - eye).normalize();
    tool.trace(&scene, &scene, eye, pointer(Vec3::ZERO), TRACE_DISTANCE, false);
    tool.select_actor(&scene, barrel, true);
    tool.log_selected_components(&scene);

    // Grab the X arrow of the gizmo sitting on the barrel
    let Some(gizmo) = tool.gizmo() else {
        tracing::warn!("No gizmo after selection");
        return;
    };
    let scale = gizmo.state().scene_scale();
    let arrow = gizmo.location() + Vec3::new(0.6 * scale.x, 0.0, 0.0);
    let grab_origin = arrow + Vec3::new(0.0, 0.0, eye.z);
    if !tool.trace(&scene, &scene, grab_origin, look, TRACE_DISTANCE, true) {
        tracing::warn!("Missed the gizmo handle");
        return;
    }
    let (domain, in_progress) = tool.current_domain();
    tracing::info!("Grabbed {} (in progress: {})", domain.name(), in_progress);

    drag(&mut tool, &mut scene, grab_origin, Vec3::new(0.35, 0.2, 0.0), 10);
    tool.clear_domain();
    log_transform(&scene, crate_root, "after translate");

    // Rotate both objects around the gizmo
    tool.set_transformation_type(&scene, TransformationKind::Rotate);
    tool.set_domain(Domain::AxisZ);
    let pivot = tool.gizmo().map_or(Vec3::ZERO, |g| g.location());
    let start = pivot + Vec3::new(1.0, 0.0, eye.z);
    tool.update_transform(&mut scene, look, start, look);
    let end = pivot + Vec3::new(0.0, 1.0, eye.z);
    let delta = tool.update_transform(&mut scene, look, end, look);
    tracing::info!("Rotation delta: {:?}", delta.rotation);
    tool.clear_domain();

    // The X ring is edge-on from the front; drag across it
    tool.set_domain(Domain::AxisX);
    drag(&mut tool, &mut scene, pivot + Vec3::new(0.0, 0.0, eye.z), Vec3::new(0.0, 0.1, 0.0), 4);
    tool.clear_domain();
    log_transform(&scene, crate_root, "after rotate");

    // Scale in local space along X
    tool.set_space_type(&scene, SpaceType::Local);
    tool.set_transformation_type(&scene, TransformationKind::Scale);
    tool.set_domain(Domain::AxisX);
    let origin = tool.gizmo().map_or(Vec3::ZERO, |g| g.location()) + Vec3::new(0.0, 0.0, eye.z);
    drag(&mut tool, &mut scene, origin, Vec3::new(0.1, 0.1, 0.0), 5);
    tool.clear_domain();
    log_transform(&scene, crate_root, "after scale");

    for event in tool.take_events() {
        tracing::debug!("{:?}", event);
    }
}

fn drag(tool: &mut TransformerTool, scene: &mut MemoryScene, from: Vec3, step: Vec3, frames: usize) {
    let look = Vec3::NEG_Z;
    for frame in 0..=frames {
        let origin = from + step * frame as f32;
        let delta = tool.update_transform(scene, look, origin, look);
        tracing::debug!(
            "Frame {}: translation {:?} rotation {:?} scale {:?}",
            frame,
            delta.translation,
            delta.rotation,
            delta.scale
        );
    }
}

fn log_transform(scene: &MemoryScene, component: rtt_transformer::ComponentId, label: &str) {
    if let Some(transform) = scene.world_transform(component) {
        tracing::info!(
            "{} {}: translation {:?} rotation {:?} scale {:?}",
            scene.component_name(component).unwrap_or("[INVALID]"),
            label,
            transform.translation,
            transform.rotation,
            transform.scale
        );
    }
}
