//! Demo room with a camera track to edit and ride.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_spline_cam::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(SplineCamPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, show_help)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((Camera3d::default(), SplineCamView));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor and a few pillars so motion is visible.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.3))),
    ));

    let pillar = meshes.add(Cuboid::new(1.0, 4.0, 1.0));
    let stone = materials.add(Color::srgb(0.7, 0.65, 0.6));
    for position in [
        Vec3::new(-6.0, 2.0, -8.0),
        Vec3::new(5.0, 2.0, -4.0),
        Vec3::new(-14.0, 2.0, 1.0),
        Vec3::new(2.0, 2.0, 7.0),
    ] {
        commands.spawn((
            Mesh3d(pillar.clone()),
            MeshMaterial3d(stone.clone()),
            Transform::from_translation(position),
        ));
    }
}

fn show_help(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut shown: Local<bool>,
    mut last_mode: Local<Option<StateKind>>,
    controller: Res<ModeController>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        *shown = !*shown;
    }

    let active = controller.active_kind();
    let mode_changed = *last_mode != active;
    *last_mode = active;

    if keyboard.just_pressed(KeyCode::KeyH) || mode_changed {
        if *shown {
            let mode = active.map_or("none", |kind| kind.name());
            println!("\n=== Spline Cam Help ===");
            println!("Mode: {mode}");
            println!();
            println!("Global:");
            println!("  H          - Toggle this help");
            println!("  1 / 2 / 3  - Free cam / Spline editor / Follow spline");
            println!("  F1         - Toggle wireframe flag");
            println!();
            println!("Free cam:");
            println!("  LMB + drag - Look");
            println!("  WASD       - Move");
            println!("  Q/E        - Up/Down");
            println!("  Arrows     - Turn");
            println!("  Scroll     - Zoom");
            println!("  F          - Switch free / first person");
            println!();
            println!("Spline editor:");
            println!("  Tab / Shift+Tab  - Select next / previous point");
            println!("  Space            - Insert point at preview marker");
            println!("  Shift+Space      - Delete selected point");
            println!("  Shift+WASDQE     - Move selected point");
            println!("  Shift+Arrows     - Turn point orientation");
            println!("  Backspace        - Clear point orientation");
            println!("  C                - Toggle cyclic/clamped");
            println!("  G                - Show sample points");
            println!("  P, R, F          - Pause, rewind, fast-forward preview");
            println!();
            println!("Follow spline:");
            println!("  P          - Pause");
            println!("  R / F      - Rewind / Fast-forward (hold)");
            println!("  Home       - Back to start");
            println!("========================\n");
        }
    }
}
