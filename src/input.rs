// Pointer input.
// minifb is polled once per frame, so press/release and movement have to be
// recovered by comparing against the previous frame. The resulting events
// drive the paint surface's stroke state machine.

use crate::surface::PaintSurface;
use crate::types::{Point, ViewportRect};

/// Type of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    /// Button pressed over the canvas (start of stroke)
    Down,
    /// Pointer moved over the canvas while the stroke is active
    Move,
    /// Button released (end of stroke)
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in window pixels
    pub position: Point,
    pub event_type: PointerEventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Button {
    #[default]
    Released,
    /// Pressed over the canvas; moves are forwarded.
    Drawing,
    /// Pressed somewhere else; ignored until released.
    HeldOutside,
}

/// Edge detector over the polled mouse state.
#[derive(Debug, Default)]
pub struct PointerTracker {
    button: Button,
    last_position: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare this frame's mouse state with the last one and report what
    /// changed, if anything. At most one event per frame.
    pub fn poll(
        &mut self,
        left_down: bool,
        position: Option<Point>,
        viewport: &ViewportRect,
    ) -> Option<PointerEvent> {
        let moved = position.is_some() && position != self.last_position;
        if position.is_some() {
            self.last_position = position;
        }
        let at = self.last_position.unwrap_or(Point::new(0.0, 0.0));
        let over_canvas = position.is_some_and(|p| viewport.contains(p));

        let (next, event_type) = match (self.button, left_down) {
            (Button::Released, true) if over_canvas => (Button::Drawing, Some(PointerEventType::Down)),
            (Button::Released, true) => (Button::HeldOutside, None),
            (Button::Drawing, false) => (Button::Released, Some(PointerEventType::Up)),
            (Button::HeldOutside, false) => (Button::Released, None),
            (Button::Drawing, true) if moved && over_canvas => (Button::Drawing, Some(PointerEventType::Move)),
            (state, _) => (state, None),
        };
        self.button = next;

        event_type.map(|event_type| PointerEvent { position: at, event_type })
    }

    pub fn is_drawing(&self) -> bool {
        self.button == Button::Drawing
    }
}

/// Route one pointer event to the matching stroke operation.
pub fn dispatch(event: PointerEvent, surface: &mut PaintSurface, viewport: ViewportRect) {
    match event.event_type {
        PointerEventType::Down => surface.begin_stroke(),
        PointerEventType::Move => {
            surface.continue_stroke(event.position, viewport);
        }
        PointerEventType::Up => surface.end_stroke(),
    }
}
