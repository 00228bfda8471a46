//! Kinescope demo entry point.
//!
//! Opens a raylib window with two animations:
//! - a looping "runner" built from a procedurally generated sprite strip;
//! - a non-looping "explosion" loaded from a numbered file sequence (or a
//!   generated strip when the files are missing). When it finishes the camera
//!   shakes and the explosion replays one frame interval later.
//!
//! Press SPACE to shake the camera by hand. A repeating timer entity also
//! sends a "quake" signal every few seconds.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --config ./config.ini --seed 42
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;

use kinescope::backend::raylib::{RaylibBackend, RaylibLoader};
use kinescope::components::animation::Animation;
use kinescope::components::timer::Timer;
use kinescope::components::zindex::ZIndex;
use kinescope::events::animation::AnimationFinishedEvent;
use kinescope::events::timer::TimerEvent;
use kinescope::resources::animationstore::{AnimationClip, AnimationStore};
use kinescope::resources::atlas::{Atlas, AtlasStore};
use kinescope::resources::camera::Camera;
use kinescope::resources::gameconfig::GameConfig;
use kinescope::resources::texturestore::TextureStore;
use kinescope::resources::worldtime::WorldTime;
use kinescope::systems::animation::animation_system;
use kinescope::systems::camera::camera_system;
use kinescope::systems::render::render_animations;
use kinescope::systems::time::{update_timers, update_world_time};
use kinescope::vector2::Vector2 as Vec2;

const STRIP_FRAME_SIZE: i32 = 64;
const RUNNER_FRAMES: u32 = 6;
const QUAKE_PERIOD: f32 = 5.0;
const REPLAY_SIGNAL: &str = "replay";

/// Kinescope frame animation and camera shake demo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Seed for the camera shake random source.
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate a strip of `frames` square frames with a shrinking box.
fn procedural_strip(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    frames: u32,
    color: Color,
) -> Result<Texture2D, String> {
    let frames = frames.max(1) as i32;
    let size = STRIP_FRAME_SIZE;
    let mut image = Image::gen_image_color(size * frames, size, Color::BLANK);
    for i in 0..frames {
        let inset = i * size / (2 * frames);
        image.draw_rectangle(
            i * size + inset,
            inset,
            size - 2 * inset,
            size - 2 * inset,
            color,
        );
    }
    rl.load_texture_from_image(thread, &image)
        .map_err(|e| format!("Failed to create strip texture: {}", e))
}

/// Store `texture` as a one-texture atlas and register a strip clip for it.
fn register_strip(
    textures: &mut TextureStore<Texture2D>,
    atlases: &mut AtlasStore,
    clips: &mut AnimationStore,
    key: &str,
    texture: Texture2D,
    clip: AnimationClip,
) {
    let mut atlas = Atlas::new();
    atlas.add_texture(textures.insert(texture));
    atlases.insert(key, atlas);
    if clips.get(key).is_none() {
        clips.insert(key, clip);
    }
}

/// Shake when the explosion finishes and schedule a replay one frame interval
/// later, so its last frame stays on screen for a full interval.
fn shake_on_explosion(
    trigger: On<AnimationFinishedEvent>,
    mut camera: ResMut<Camera>,
    config: Res<GameConfig>,
    animations: Query<&Animation>,
    mut commands: Commands,
) {
    let event = trigger.event();
    info!("Animation finished: {}", event.signal);
    camera.shake(config.shake_strength, config.shake_duration);
    if let Ok(animation) = animations.get(event.entity) {
        commands
            .entity(event.entity)
            .insert(Timer::one_shot(animation.interval()).with_signal(REPLAY_SIGNAL));
    }
}

fn replay_on_timer(trigger: On<TimerEvent>, mut animations: Query<&mut Animation>) {
    let event = trigger.event();
    if event.signal != REPLAY_SIGNAL {
        return;
    }
    if let Ok(mut animation) = animations.get_mut(event.entity) {
        animation.reset();
    }
}

fn shake_on_quake(trigger: On<TimerEvent>, mut camera: ResMut<Camera>, config: Res<GameConfig>) {
    if trigger.event().signal == "quake" {
        camera.shake(config.shake_strength * 0.5, config.shake_duration * 2.0);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using default settings", e);
    }

    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .title("Kinescope")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- Assets ---------------
    let mut textures: TextureStore<Texture2D> = TextureStore::new();
    let mut atlases = AtlasStore::new();
    let mut clips = AnimationStore::new();
    if let Err(e) = clips.load_from_file(&config.clips_path.to_string_lossy()) {
        warn!("{}; using built-in clips", e);
    }

    let runner = procedural_strip(&mut rl, &thread, RUNNER_FRAMES, Color::DARKBLUE)
        .expect("Failed to generate runner strip");
    register_strip(
        &mut textures,
        &mut atlases,
        &mut clips,
        "runner",
        runner,
        AnimationClip {
            atlas: "runner".to_string(),
            slices: Some(RUNNER_FRAMES),
            interval: 0.1,
            looped: true,
            on_finished: None,
        },
    );

    let mut explosion = Atlas::new();
    let loaded = {
        let mut loader = RaylibLoader::new(&mut rl, &thread, &mut textures);
        explosion.load(
            &mut loader,
            &config.explosion_template,
            config.explosion_frames as usize,
        )
    };
    match loaded {
        Ok(_) => {
            atlases.insert("explosion", explosion);
            if clips.get("explosion").is_none() {
                clips.insert(
                    "explosion",
                    AnimationClip {
                        atlas: "explosion".to_string(),
                        slices: None,
                        interval: 0.06,
                        looped: false,
                        on_finished: Some("explosion_done".to_string()),
                    },
                );
            }
        }
        Err(e) => {
            warn!("{}; generating explosion frames", e);
            explosion.release(&mut textures);
            let strip = procedural_strip(&mut rl, &thread, config.explosion_frames, Color::ORANGE)
                .expect("Failed to generate explosion strip");
            register_strip(
                &mut textures,
                &mut atlases,
                &mut clips,
                "explosion",
                strip,
                AnimationClip {
                    atlas: "explosion".to_string(),
                    slices: Some(config.explosion_frames.max(1)),
                    interval: 0.06,
                    looped: false,
                    on_finished: Some("explosion_done".to_string()),
                },
            );
        }
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(match cli.seed {
        Some(seed) => Camera::with_seed(seed),
        None => Camera::new(),
    });

    let centre = Vec2::new(window_width as f32 / 2.0, window_height as f32 / 2.0);
    if let Some(mut animation) = clips.instantiate("runner", &atlases, &textures) {
        animation.set_position(centre - Vec2::new(120.0, 0.0));
        world.spawn((animation, ZIndex(0)));
    }
    if let Some(mut animation) = clips.instantiate("explosion", &atlases, &textures) {
        animation.set_position(centre + Vec2::new(120.0, 0.0));
        if let Some(frame) = animation.current_frame() {
            let (w, h) = (frame.source.width as f32, frame.source.height as f32);
            animation.set_center(Vec2::new(w / 2.0, h / 2.0));
        }
        world.spawn((animation, ZIndex(1)));
    }
    world.spawn(Timer::repeating(QUAKE_PERIOD).with_signal("quake"));

    world.insert_resource(config.clone());
    world.insert_resource(atlases);
    world.insert_resource(clips);

    world.add_observer(shake_on_explosion);
    world.add_observer(replay_on_timer);
    world.add_observer(shake_on_quake);
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems((update_timers, animation_system, camera_system.after(animation_system)));

    // --------------- Main loop ---------------
    let mut spin = 0.0_f64;
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            world
                .resource_mut::<Camera>()
                .shake(config.shake_strength, config.shake_duration);
        }

        update.run(&mut world);

        spin = (spin + dt as f64 * 90.0) % 360.0;
        let mut animations = world.query::<&mut Animation>();
        for mut animation in animations.iter_mut(&mut world) {
            if !animation.is_looping() {
                animation.set_rotation(spin);
            }
        }

        let offset = world.resource::<Camera>().position();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        {
            let mut backend = RaylibBackend::new(&mut d, &textures);
            render_animations(&mut world, &mut backend);
        }
        d.draw_text("SPACE: shake camera", 10, 10, 20, Color::DARKGRAY);
        d.draw_text(
            &format!("offset: ({:.1}, {:.1})", offset.x, offset.y),
            10,
            36,
            20,
            Color::DARKGRAY,
        );
    }
}
