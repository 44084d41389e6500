use anyhow::Result;
use glam::Vec2;
use log::info;
use rollback_shortcuts::engine::game_loop::TickClock;
use rollback_shortcuts::engine::input::{InputManager, ShortcutConfig, ShortcutDispatcher};
use rollback_shortcuts::engine::rollback::{PreFinalizeHook, Simulation};
use rollback_shortcuts::game::{ArenaFrame, ArenaWorld, CycleFeature, CycleShortcuts};
use std::time::Instant;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

const MAX_PLAYERS: usize = 4;
const PALETTE_COUNT: usize = 8;
const ACCESSORY_COUNT: usize = 4;

/// Speculative iterations per tick, standing in for rollback depth
const RESIMULATIONS: u32 = 2;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rollback Shortcuts...");

    // Keyboard drives player 1; winit has no gamepad input
    let mut input = InputManager::new(MAX_PLAYERS);
    if let Some(player) = input.player_mut(0) {
        player.attach_keyboard();
    }

    let mut world = ArenaWorld::new(PALETTE_COUNT, ACCESSORY_COUNT);
    let fighter = world.spawn(Some(0), Vec2::new(-2.0, 0.0));
    world.spawn(None, Vec2::new(2.0, 0.0));
    let mut sim = Simulation::new(world, RESIMULATIONS);

    let hook = PreFinalizeHook::<ArenaFrame>::new();
    let mut dispatcher = ShortcutDispatcher::new();
    let palettes = CycleShortcuts::install(
        CycleFeature::Palette,
        &ShortcutConfig::palette_defaults(MAX_PLAYERS),
        &mut dispatcher,
    )?;
    let accessories = CycleShortcuts::install(
        CycleFeature::Accessory,
        &ShortcutConfig::accessory_defaults(MAX_PLAYERS),
        &mut dispatcher,
    )?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rollback Shortcuts")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut clock = TickClock::new();
    let mut shown = (0, 0);

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} frames, removing {} and {} shortcuts",
                    sim.frame(),
                    palettes.feature().name(),
                    accessories.feature().name()
                );
                palettes.uninstall(&mut dispatcher);
                accessories.uninstall(&mut dispatcher);
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::Pause)
                {
                    clock.toggle_pause();
                }
                input.process_keyboard_event(0, &event);
            }
            Event::AboutToWait => {
                for _ in 0..clock.begin_wake() {
                    dispatcher.poll(&input, &hook);
                    sim.advance(&hook);
                    input.update();
                }

                if let Some(f) = sim.world().fighter(fighter) {
                    let current = (f.palette, f.accessory_set);
                    if current != shown {
                        shown = current;
                        info!("Palette {}, accessory set {}", current.0, current.1);
                        window.set_title(&format!(
                            "Rollback Shortcuts - palette {} / accessories {}",
                            current.0, current.1
                        ));
                    }
                }

                elwt.set_control_flow(ControlFlow::WaitUntil(
                    Instant::now() + clock.tick_duration(),
                ));
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
