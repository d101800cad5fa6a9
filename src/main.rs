use lifegrid::config::LifeConfig;
use lifegrid::constants::{FPS_UPDATE_INTERVAL_SECS, WINDOW_TITLE};
use lifegrid::interaction::InputState;
use lifegrid::renderer::{FrameView, Renderer, status_title};
use lifegrid::simulation::SimulationState;
use lifegrid::utils::{FpsCounter, frame_interval};
use std::{sync::Arc, time::Instant};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

// --- Main Function ---
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let life_config = LifeConfig::default();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(life_config.window_size())
            .with_resizable(false)
            .build(&event_loop)?,
    );
    let mut renderer = pollster::block_on(Renderer::new(window.clone(), &life_config))?;
    log::info!(
        "Grid {}x{} with {}x{} px cells",
        life_config.grid_width,
        life_config.grid_height,
        life_config.cell_width,
        life_config.cell_height
    );

    let mut simulation_state = SimulationState::new(life_config);
    let mut input = InputState::new();
    let mut fps_counter = FpsCounter::new(FPS_UPDATE_INTERVAL_SECS, Instant::now());
    let mut next_frame = Instant::now();
    let mut current_title = String::new();

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| match event {
        Event::AboutToWait => {
            let now = Instant::now();
            if now >= next_frame {
                // One frame: input, then at most one step; rendering follows on redraw.
                input.apply(&mut simulation_state);
                simulation_state.update();
                window.request_redraw();
                next_frame = match frame_interval(simulation_state.step_rate()) {
                    Some(interval) => now + interval,
                    None => now,
                };
            }
            if next_frame > now {
                elwt.set_control_flow(ControlFlow::WaitUntil(next_frame));
            } else {
                elwt.set_control_flow(ControlFlow::Poll);
            }
        }
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(physical_size) => renderer.resize(physical_size),
            WindowEvent::ScaleFactorChanged { .. } => renderer.resize(window.inner_size()),
            WindowEvent::KeyboardInput {
                event: ref key_event,
                ..
            } if key_event.state == ElementState::Pressed
                && key_event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                elwt.exit()
            }
            WindowEvent::RedrawRequested => {
                if fps_counter.tick(Instant::now()) {
                    log::debug!("FPS: {:.1}", fps_counter.fps());
                }
                let display = simulation_state.display;
                let config = simulation_state.config();
                let view = FrameView {
                    grid: simulation_state.grid(),
                    cell_size: config.cell_size(),
                    show_grid_lines: display.show_grid_lines,
                    show_controls: display.show_controls,
                    step_rate: simulation_state.step_rate(),
                    min_step_rate: config.min_step_rate,
                    max_step_rate: config.max_step_rate,
                };
                match renderer.render(&view) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("Surface lost or outdated, reconfiguring");
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU Error: OutOfMemory");
                        elwt.exit();
                    }
                    Err(e) => log::warn!("WGPU Error: {:?}", e),
                }

                let title = status_title(
                    WINDOW_TITLE,
                    simulation_state.generation(),
                    simulation_state.step_rate(),
                    simulation_state.is_running(),
                    display.show_fps.then(|| fps_counter.fps()),
                );
                if title != current_title {
                    window.set_title(&title);
                    current_title = title;
                }
            }
            other => {
                input.handle_window_event(&other, window.scale_factor());
            }
        },
        _ => {}
    })?;
    log::info!("Window closed, exiting");
    Ok(())
}
