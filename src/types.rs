// Core types shared by the paint surface, the input tracker and the window.

use crate::config::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use tiny_skia::Color;

/// What the window shows this frame: toolbar, scaled canvas, cursor.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is (pixels)
    pub height: usize,     // how tall the window is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-black buffer; filled in fresh every frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A position in buffer space (or window space, before mapping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where the raster buffer is shown inside the window, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    /// `(pointer - origin) / size * buffer_size`, per axis.
    /// None when the rect has no area (the mapping is undefined).
    pub fn to_buffer(&self, p: Point, buffer_width: u32, buffer_height: u32) -> Option<Point> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(Point {
            x: (p.x - self.x) / self.width * buffer_width as f32,
            y: (p.y - self.y) / self.height * buffer_height as f32,
        })
    }
}

/// The two mutually exclusive drawing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

impl Tool {
    pub fn color(self) -> Color {
        match self {
            Tool::Pen => Color::BLACK,
            Tool::Eraser => Color::WHITE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "PEN",
            Tool::Eraser => "ERASER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    width: u32, // always within MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH
}

impl ToolState {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self { tool: Tool::Pen, width: MIN_STROKE_WIDTH }
    }
}

/// Pointer-drag state. There is no way to hold a last point while idle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { last: Option<Point> },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn last_point(&self) -> Option<Point> {
        match self {
            DragState::Dragging { last } => *last,
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped_to_slider_range() {
        let mut t = ToolState::default();
        t.set_width(0);
        assert_eq!(t.width(), 1);
        t.set_width(501);
        assert_eq!(t.width(), 500);
        t.set_width(42);
        assert_eq!(t.width(), 42);
    }

    #[test]
    fn viewport_mapping_scales_each_axis() {
        let rect = ViewportRect { x: 0.0, y: 20.0, width: 750.0, height: 750.0 };
        let p = rect.to_buffer(Point::new(375.0, 20.0), 1500, 1500).unwrap();
        assert_eq!(p, Point::new(750.0, 0.0));

        let wide = ViewportRect { x: 10.0, y: 10.0, width: 200.0, height: 100.0 };
        let p = wide.to_buffer(Point::new(110.0, 60.0), 100, 100).unwrap();
        assert_eq!(p, Point::new(50.0, 50.0));
    }

    #[test]
    fn empty_viewport_has_no_mapping() {
        let rect = ViewportRect { x: 0.0, y: 0.0, width: 0.0, height: 10.0 };
        assert!(rect.to_buffer(Point::new(1.0, 1.0), 100, 100).is_none());
    }

    #[test]
    fn idle_drag_has_no_last_point() {
        let d = DragState::default();
        assert!(!d.is_dragging());
        assert_eq!(d.last_point(), None);
    }
}
