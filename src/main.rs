mod app;
mod braille;
mod color;
mod config;
mod glider;
mod grid;
mod logging;
mod presets;
mod settings;
mod simulation;
mod ui;
mod viewport;

use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use presets::PresetManager;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use settings::LifeSettings;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "glider-life")]
#[command(about = "Conway's Game of Life in the terminal, with gliders drifting in from off-screen")]
struct Args {
    /// Preset to start from (drifting, calm, or a user preset name)
    #[arg(long)]
    preset: Option<String>,

    /// Canvas dots per cell side (1, 2, 4 or 8; other values round down)
    #[arg(long = "cell-size")]
    cell_size: Option<usize>,

    /// Hidden cells around the visible area (6-40)
    #[arg(long)]
    margin: Option<usize>,

    /// Random fill density (0.05-0.9)
    #[arg(short = 'd', long)]
    density: Option<f64>,

    /// Milliseconds between generations (20-2000)
    #[arg(short = 'i', long)]
    interval: Option<u64>,

    /// Disable glider injection
    #[arg(long = "no-gliders", default_value = "false")]
    no_gliders: bool,

    /// Fill the grid randomly on start
    #[arg(long, default_value = "false")]
    random: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file (defaults to the platform cache directory)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Load the config file. A missing file gives defaults; an existing explicit file must parse.
fn load_config(explicit: Option<&Path>, default_path: Option<PathBuf>) -> Result<AppConfig, String> {
    match explicit {
        Some(path) => {
            if path.exists() {
                AppConfig::load_from_file(path)
            } else {
                log::info!("config {} not found, using defaults", path.display());
                Ok(AppConfig::default())
            }
        }
        None => match default_path {
            Some(path) if path.exists() => AppConfig::load_from_file(&path).or_else(|err| {
                log::warn!("{}; using defaults", err);
                Ok(AppConfig::default())
            }),
            _ => Ok(AppConfig::default()),
        },
    }
}

/// Starting settings and preset name.
///
/// CLI flags win over `--preset`, which wins over the config file. An unknown
/// preset name is an error.
fn resolve_settings(
    args: &Args,
    config: &AppConfig,
    presets: &PresetManager,
) -> Result<(LifeSettings, String), String> {
    let mut settings = config.settings.clone();
    let mut preset_name = String::from("custom");

    if let Some(name) = &args.preset {
        let preset = presets.find(name).ok_or_else(|| {
            format!(
                "unknown preset '{}' (available: {})",
                name,
                presets.preset_names().join(", ")
            )
        })?;
        settings = preset.settings.clone();
        preset_name = preset.name.clone();
    }

    if let Some(cell_size) = args.cell_size {
        settings.cell_size = cell_size;
    }
    if let Some(margin) = args.margin {
        settings.margin = margin;
    }
    if let Some(density) = args.density {
        settings.density = density;
    }
    if let Some(interval) = args.interval {
        settings.step_interval_ms = interval;
    }
    if args.no_gliders {
        settings.glider_spawning = false;
    }

    Ok((settings, preset_name))
}

fn full_area(width: u16, height: u16) -> Rect {
    Rect {
        x: 0,
        y: 0,
        width,
        height,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(err) = logging::init(args.log_file.as_deref()) {
        eprintln!("warning: {}", err);
    }

    let config = load_config(args.config.as_deref(), AppConfig::default_path())?;
    let (settings, preset_name) = resolve_settings(&args, &config, &PresetManager::new())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Get initial terminal size and create app
    let size = terminal.size()?;
    let (canvas_width, canvas_height) =
        ui::get_canvas_size(full_area(size.width, size.height), config.fullscreen);
    let mut app = App::new(canvas_width, canvas_height, settings, Instant::now());
    app.color_scheme = config.color_scheme;
    app.fullscreen_mode = config.fullscreen;
    app.preset_name = preset_name;
    app.config_path = args.config.clone();

    if args.random {
        app.randomize();
    }

    let (view_w, view_h) = app.simulation.visible_size();
    log::info!(
        "started: grid {}x{}, view {}x{}, preset {}",
        app.simulation.grid().width(),
        app.simulation.grid().height(),
        view_w,
        view_h,
        app.preset_name
    );

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Re-read the terminal size and rebuild the grid for the current layout
fn refresh_canvas<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) {
    let size = terminal.size().unwrap_or_default();
    let (canvas_width, canvas_height) =
        ui::get_canvas_size(full_area(size.width, size.height), app.fullscreen_mode);
    app.resize(canvas_width, canvas_height);
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Event poll timeout; the step clock itself runs off the settings interval
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        terminal.draw(|frame| ui::render(frame, app, Instant::now()))?;

        if event::poll(FRAME_DURATION)? && handle_event(terminal, app, event::read()?, Instant::now()) {
            return Ok(());
        }

        // Run simulation tick
        app.tick(Instant::now());
    }
}

/// Apply one terminal event. Returns true when the app should quit.
fn handle_event<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event: Event,
    now: Instant,
) -> bool {
    match event {
        // Only process Press events
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Handle Ctrl+C
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return true;
            }

            match key.code {
                // System controls
                KeyCode::Char('q') | KeyCode::Char('Q') => return true,
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Char('n') | KeyCode::Char('N') => app.single_step(),
                KeyCode::Char('r') | KeyCode::Char('R') => app.randomize(),
                KeyCode::Char('x') | KeyCode::Char('X') => app.clear(),
                KeyCode::Backspace => app.reset(now),
                KeyCode::Char('g') | KeyCode::Char('G') => {
                    app.toggle_gliders(now);
                    app.focus = Focus::Gliders;
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    app.increase_speed();
                    app.focus = Focus::Interval;
                }
                KeyCode::Char('-') | KeyCode::Char('_') => {
                    app.decrease_speed();
                    app.focus = Focus::Interval;
                }
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    app.cycle_color_scheme();
                    app.focus = Focus::ColorScheme;
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    app.cycle_preset(now);
                    refresh_canvas(terminal, app);
                }
                KeyCode::Char('w') | KeyCode::Char('W') => app.save_config(now),
                KeyCode::Char('v') | KeyCode::Char('V') => {
                    app.toggle_fullscreen();
                    refresh_canvas(terminal, app);
                }
                KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => app.toggle_help(),

                // Navigation
                KeyCode::Tab => app.next_focus(),
                KeyCode::BackTab => app.prev_focus(),
                KeyCode::Up => {
                    if !app.show_help && app.focus.is_param() {
                        app.adjust_focused_up(now);
                    }
                }
                KeyCode::Down => {
                    if !app.show_help && app.focus.is_param() {
                        app.adjust_focused_down(now);
                    }
                }
                KeyCode::Esc => {
                    if app.show_help {
                        app.toggle_help();
                    } else if app.focus.is_param() {
                        app.focus = Focus::Controls;
                    }
                }
                KeyCode::Char('j') | KeyCode::Char('J') => {
                    if app.show_help {
                        app.scroll_help_down(ui::HELP_CONTENT_LINES);
                    }
                }
                KeyCode::Char('k') | KeyCode::Char('K') => {
                    if app.show_help {
                        app.scroll_help_up();
                    }
                }
                _ => {}
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            if !app.show_help {
                let (origin_x, origin_y) = ui::get_canvas_origin(app.fullscreen_mode);
                if column >= origin_x && row >= origin_y {
                    app.click(column - origin_x, row - origin_y, now);
                }
            }
        }
        Event::Resize(width, height) => {
            let (canvas_width, canvas_height) =
                ui::get_canvas_size(full_area(width, height), app.fullscreen_mode);
            app.resize(canvas_width, canvas_height);
        }
        _ => {}
    }
    false
}
