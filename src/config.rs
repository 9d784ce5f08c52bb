// Startup constants for the canvas and its window.

/// Narrowest stroke the width control allows.
pub const MIN_STROKE_WIDTH: u32 = 1;
/// Widest stroke the width control allows.
pub const MAX_STROKE_WIDTH: u32 = 500;

#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub buffer_width: u32,    // raster buffer size, fixed for the whole session
    pub buffer_height: u32,
    pub viewport_size: usize, // on-screen square the buffer is scaled into
    pub toolbar_height: usize,
    pub title: String,
    /// Anti-aliased stroke edges, like a browser 2D canvas.
    pub anti_alias: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            buffer_width: 1500,
            buffer_height: 1500,
            viewport_size: 750,
            toolbar_height: 20,
            title: String::from("li-sketch"),
            anti_alias: true,
        }
    }
}

impl CanvasConfig {
    pub fn window_width(&self) -> usize {
        self.viewport_size
    }

    pub fn window_height(&self) -> usize {
        self.toolbar_height + self.viewport_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_stacks_toolbar_over_viewport() {
        let cfg = CanvasConfig::default();
        assert_eq!(cfg.window_width(), 750);
        assert_eq!(cfg.window_height(), 770);
        assert_eq!((cfg.buffer_width, cfg.buffer_height), (1500, 1500));
    }
}
