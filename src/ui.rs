use crate::app::{App, Focus};
use crate::braille;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const SIDEBAR_WIDTH: u16 = 24;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app, now);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Calculate the canvas size (excluding borders)
pub fn get_canvas_size(frame_area: Rect, fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (frame_area.width.saturating_sub(2), frame_area.height.saturating_sub(2))
    } else {
        let canvas_width = frame_area.width.saturating_sub(SIDEBAR_WIDTH + 2);
        let canvas_height = frame_area.height.saturating_sub(2);
        (canvas_width, canvas_height)
    }
}

/// Terminal position of the canvas' top-left character (inside the border)
pub fn get_canvas_origin(fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (1, 1)
    } else {
        (SIDEBAR_WIDTH + 1, 1)
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status
            Constraint::Length(8), // Parameters
            Constraint::Min(6),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app, now);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let block = styled_block(" Game of Life ");
    let sim = &app.simulation;
    let (view_w, view_h) = sim.visible_size();

    let (status_text, status_color) = if sim.paused {
        ("PAUSED", HIGHLIGHT_COLOR)
    } else if app.is_holding(now) {
        ("EDITING", Color::Magenta)
    } else {
        ("RUNNING", Color::Green)
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("Gen {}", sim.generation),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Live {}", sim.live_count()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("View {}x{}", view_w, view_h),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    if let Some(message) = app.status_message(now) {
        content.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(HIGHLIGHT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let settings = &app.simulation.settings;

    let content = vec![
        make_line(
            "Color",
            app.color_scheme.name().to_string(),
            app.focus == Focus::ColorScheme,
        ),
        make_line(
            "Hold",
            format!("{}s", settings.click_cooldown_secs),
            app.focus == Focus::Cooldown,
        ),
        make_line(
            "Density",
            format!("{:.2}", settings.density),
            app.focus == Focus::Density,
        ),
        make_line(
            "Gliders",
            if settings.glider_spawning { "on" } else { "off" }.to_string(),
            app.focus == Focus::Gliders,
        ),
        make_line(
            "Every",
            format!("{}s", settings.glider_interval_secs),
            app.focus == Focus::GliderInterval,
        ),
        make_line(
            "Step",
            format!("{}ms", settings.step_interval_ms),
            app.focus == Focus::Interval,
        ),
    ];

    // Calculate scroll to keep focused item visible based on actual area
    let focus_line = app.focus.line_index();
    let visible_height = area.height.saturating_sub(2); // minus borders
    let content_height = content.len() as u16;

    let scroll = if visible_height == 0 || visible_height >= content_height {
        0
    } else if focus_line >= visible_height {
        focus_line.saturating_sub(visible_height - 1)
    } else {
        0
    };

    let paragraph = Paragraph::new(content).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Click", "toggle cell"),
        make_control("Space", "pause/resume"),
        make_control("N", "single step"),
        make_control("R", "randomize"),
        make_control("X", "clear"),
        make_control("Bksp", "reset"),
        make_control("G", "gliders on/off"),
        make_control("+/-", "speed"),
        make_control("P", "next preset"),
        make_control("W", "write config"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = braille::render_to_braille(
        app.simulation.grid(),
        app.simulation.viewport(),
        inner.width,
        inner.height,
        app.color_scheme.cell_color(),
    );

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            frame.render_widget(Paragraph::new(Line::from(span)), cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(32);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("CONWAY'S GAME OF LIFE", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("A live cell with 2 or 3 live neighbours survives. A dead cell with exactly 3 is born. Everything else dies or stays dead."),
        Line::from(""),
        Line::from(Span::styled("GLIDERS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("With gliders on, a glider is placed just outside the visible area every few seconds and drifts in. G toggles it."),
        Line::from(""),
        Line::from(Span::styled("EDITING:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Click a cell to flip it. The clock holds for a moment after each click so you can draw a pattern."),
        Line::from(""),
        Line::from(Span::styled("PRESETS (P):", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("drifting: dense fill, gliders on. calm: sparse fill, faster clock, no gliders. Extra presets load from the config directory."),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Pause, N=Step, R=Random, X=Clear, Backspace=Reset, C=Colors, V=Fullscreen, Tab/Arrows=Adjust, +/-=Speed, W=Save, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2);
    let is_scrollable = content_height > visible_height;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
