use crate::api::types::EntityId;

/// Pointer events delivered by the rendering backend.
/// Enter/leave come from the backend's hit-testing; moves are raw screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor started hovering the entity `target`.
    PointerEnter { target: EntityId },
    /// The cursor stopped hovering the entity `target`.
    PointerLeave { target: EntityId },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerEnter { target: EntityId(3) });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerEnter { target: EntityId(1) });
        q.push(InputEvent::PointerLeave { target: EntityId(1) });
        let kinds: Vec<_> = q.iter().copied().collect();
        assert_eq!(
            kinds,
            vec![
                InputEvent::PointerEnter { target: EntityId(1) },
                InputEvent::PointerLeave { target: EntityId(1) },
            ]
        );
    }
}
