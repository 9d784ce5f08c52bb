// The paint surface: a fixed-size raster buffer plus the tool and drag state
// that turn pointer drags into stroke segments.
//
// Rendering goes through tiny-skia's path stroker, one call per segment, so
// width, round caps and round joins come from the same primitive every time.

use crate::config::CanvasConfig;
use crate::error::Error;
use crate::types::{DragState, Point, Tool, ToolState, ViewportRect};
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Canvas background; `clear()` resets every pixel to it.
pub const BACKGROUND: Color = Color::WHITE;

/// `.li` value for a pixel whose red channel is 0.
pub const LI_INK: u8 = 0;
/// `.li` value for every other pixel.
pub const LI_BLANK: u8 = 1;

pub struct PaintSurface {
    pixmap: Pixmap,
    tool: ToolState,
    drag: DragState,
    anti_alias: bool,
}

impl PaintSurface {
    /// Allocate a background-filled buffer of the configured size.
    pub fn new(cfg: &CanvasConfig) -> Result<Self, Error> {
        let mut pixmap = Pixmap::new(cfg.buffer_width, cfg.buffer_height).ok_or(Error::Raster {
            width: cfg.buffer_width,
            height: cfg.buffer_height,
        })?;
        pixmap.fill(BACKGROUND);

        Ok(Self {
            pixmap,
            tool: ToolState::default(),
            drag: DragState::default(),
            anti_alias: cfg.anti_alias,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Read-only view of the raster, for presenting it on screen.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn tool(&self) -> ToolState {
        self.tool
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn begin_stroke(&mut self) {
        self.drag = DragState::Dragging { last: None };
        log::trace!("stroke begin");
    }

    /// Feed one pointer position (window space) into the active stroke.
    ///
    /// The first call after `begin_stroke` only anchors the stroke; every
    /// later call draws a segment from the previous point. Returns whether a
    /// segment was rendered.
    pub fn continue_stroke(&mut self, pointer: Point, viewport: ViewportRect) -> bool {
        let DragState::Dragging { last } = self.drag else {
            return false;
        };
        let Some(point) = viewport.to_buffer(pointer, self.width(), self.height()) else {
            return false;
        };

        let drew = match last {
            Some(from) => self.render_segment(from, point),
            None => false,
        };
        self.drag = DragState::Dragging { last: Some(point) };
        drew
    }

    pub fn end_stroke(&mut self) {
        if self.drag.is_dragging() {
            log::trace!("stroke end at {:?}", self.drag.last_point());
        }
        self.drag = DragState::Idle;
    }

    /// Reset every pixel to the background. There is no undo.
    pub fn clear(&mut self) {
        self.pixmap.fill(BACKGROUND);
        log::info!("canvas cleared");
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool.tool != tool {
            log::debug!("tool -> {}", tool.label());
        }
        self.tool.tool = tool;
    }

    /// Set the stroke width; values outside 1..=500 are clamped.
    pub fn set_tool_width(&mut self, width: u32) {
        self.tool.set_width(width);
        log::debug!("stroke width -> {}", self.tool.width());
    }

    /// Pack the buffer as `.li` bytes: one byte per pixel, row-major,
    /// 0 where the red channel is exactly 0 and 1 everywhere else.
    ///
    /// Only red is inspected, so anti-aliased stroke edges (partially
    /// blended toward white) come out as 1. No width/height header is
    /// written; readers must know the dimensions.
    pub fn encode_li(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .map(|px| if px.red() == 0 { LI_INK } else { LI_BLANK })
            .collect()
    }

    fn render_segment(&mut self, from: Point, to: Point) -> bool {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        // Degenerate or non-finite paths are dropped without a fuss.
        let Some(path) = pb.finish() else {
            return false;
        };

        let mut paint = Paint::default();
        paint.set_color(self.tool.tool.color());
        paint.anti_alias = self.anti_alias;

        let stroke = Stroke {
            width: self.tool.width() as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        true
    }
}
