// What you SEE:
// • A toolbar strip on top, the canvas below it (scaled to fit the window).
// • Hold Left Mouse over the canvas: paint with the current tool.
// • P = pen (black), E = eraser (white), [ / ] = thinner / thicker (Shift: x10).
// • C clears the canvas, S exports it as a `.li` file. ESC quits.

mod config;
mod draw;
mod error;
mod export;
mod input;
mod surface;
mod types;

use config::CanvasConfig;
use draw::{blit_scaled, draw_crosshair, draw_text_5x7, fill_rect, Drawer};
use error::Error;
use export::{export_canvas, DialogPrompt, FsWriter};
use input::{dispatch, PointerTracker};
use minifb::Key;
use surface::PaintSurface;
use types::{FrameBuffer, Tool, ViewportRect};

const TOOLBAR_BG: u32 = 0x00_30_30_30;
const TOOLBAR_FG: u32 = 0x00_FF_FF_FF;
const CURSOR_IDLE: u32 = 0x00_80_80_80;
const CURSOR_DRAWING: u32 = 0x00_FF_33_33;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = CanvasConfig::default();
    let mut surface = PaintSurface::new(&cfg)?;
    let mut drawer = Drawer::new(&cfg.title, cfg.window_width(), cfg.window_height())?;
    log::info!(
        "canvas {}x{}, shown at {}x{}",
        cfg.buffer_width,
        cfg.buffer_height,
        cfg.viewport_size,
        cfg.viewport_size
    );

    // The canvas sits right below the toolbar.
    let viewport = ViewportRect {
        x: 0.0,
        y: cfg.toolbar_height as f32,
        width: cfg.viewport_size as f32,
        height: cfg.viewport_size as f32,
    };
    let mut screen = FrameBuffer::new(cfg.window_width(), cfg.window_height());
    let mut pointer = PointerTracker::new();
    let mut prompt = DialogPrompt::default();
    let mut writer = FsWriter;

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Controls */
        if drawer.pressed_once(Key::C) {
            surface.clear();
        }
        if drawer.pressed_once(Key::P) {
            surface.set_tool(Tool::Pen);
        }
        if drawer.pressed_once(Key::E) {
            surface.set_tool(Tool::Eraser);
        }
        let step = if drawer.shift_down() { 10 } else { 1 };
        if drawer.pressed_repeat(Key::LeftBracket) {
            surface.set_tool_width(surface.tool().width().saturating_sub(step));
        }
        if drawer.pressed_repeat(Key::RightBracket) {
            surface.set_tool_width(surface.tool().width() + step);
        }
        if drawer.pressed_once(Key::S) && !surface.drag().is_dragging() {
            // A failed write is reported and the session goes on.
            if let Err(e) = export_canvas(&surface, &mut prompt, &mut writer) {
                log::error!("{e}");
            }
        }

        /* 2) Pointer → stroke state machine */
        let mouse = drawer.mouse_pos();
        if let Some(event) = pointer.poll(drawer.left_mouse_down(), mouse, &viewport) {
            dispatch(event, &mut surface, viewport);
        }

        /* 3) Compose: canvas, cursor, toolbar */
        blit_scaled(&mut screen, surface.pixmap(), &viewport);

        if let Some(p) = mouse.filter(|&p| viewport.contains(p)) {
            let scale = viewport.width / surface.width() as f32;
            let size = ((surface.tool().width() as f32 * scale / 2.0) as i32).max(6);
            let color = if pointer.is_drawing() { CURSOR_DRAWING } else { CURSOR_IDLE };
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, size, color);
        }

        let screen_width = screen.width;
        fill_rect(&mut screen, 0, 0, screen_width, cfg.toolbar_height, TOOLBAR_BG);
        let tool = surface.tool();
        let status = format!(
            "{} | WIDTH: {} | C: CLEAR  S: EXPORT  P/E: TOOL  [ ]: WIDTH",
            tool.tool.label(),
            tool.width()
        );
        let text_y = (cfg.toolbar_height as i32 - 7) / 2;
        draw_text_5x7(&mut screen, 6, text_y, &status, TOOLBAR_FG);

        /* 4) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}
