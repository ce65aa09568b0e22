use egui::{Event, Rect};

use super::ButtonState;
use crate::map::RawPointerEvent;

/// Translates [`egui::Event`]s into [`RawPointerEvent`]s for a map occupying `rect`.
///
/// Positions become relative to the top left corner of the map. Presses outside of the map are
/// ignored, but once pressed inside, the pointer keeps being followed outside so drags do not
/// get stuck at the edge.
#[derive(Debug, Clone, Default)]
pub struct EguiInput {
    buttons: ButtonState,
    hovering: bool,
    last: Option<egui::Pos2>,
}

impl EguiInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    fn captured(&self) -> bool {
        self.buttons.primary || self.buttons.secondary || self.buttons.middle
    }

    pub fn translate(&mut self, event: &Event, rect: Rect) -> Option<RawPointerEvent> {
        match event {
            Event::PointerMoved(pos) => {
                if rect.contains(*pos) || self.captured() {
                    let pos = (*pos - rect.min).to_pos2();
                    self.hovering = true;
                    self.last = Some(pos);
                    Some(RawPointerEvent::Moved(pos))
                } else {
                    self.left()
                }
            }
            Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                if *pressed && !rect.contains(*pos) {
                    return None;
                }

                let state = self.buttons.with(*button, *pressed);
                if state == self.buttons {
                    return None;
                }

                self.buttons = state;
                let pos = (*pos - rect.min).to_pos2();
                self.last = Some(pos);
                Some(RawPointerEvent::Buttons { pos, state })
            }
            Event::MouseWheel { delta, .. } => {
                let pos = self.last.filter(|_| self.hovering)?;
                Some(RawPointerEvent::Scroll { pos, delta: *delta })
            }
            Event::PointerGone => self.left(),
            _ => None,
        }
    }

    /// Translate everything egui received in this frame.
    pub fn translate_all(&mut self, input: &egui::InputState, rect: Rect) -> Vec<RawPointerEvent> {
        input
            .events
            .iter()
            .filter_map(|event| self.translate(event, rect))
            .collect()
    }

    fn left(&mut self) -> Option<RawPointerEvent> {
        if !self.hovering {
            return None;
        }

        self.hovering = false;
        self.last = None;
        Some(RawPointerEvent::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, MouseWheelUnit, PointerButton, pos2, vec2};

    fn rect() -> Rect {
        Rect::from_min_size(pos2(100., 50.), vec2(400., 300.))
    }

    fn button(x: f32, y: f32, pressed: bool) -> Event {
        Event::PointerButton {
            pos: pos2(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn wheel(y: f32) -> Event {
        Event::MouseWheel {
            unit: MouseWheelUnit::Line,
            delta: vec2(0., y),
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn wheel_scrolls_at_the_hovered_position() {
        let mut input = EguiInput::new();

        // Nowhere to zoom at yet.
        assert_eq!(None, input.translate(&wheel(1.), rect()));

        input.translate(&Event::PointerMoved(pos2(110., 70.)), rect());
        assert_eq!(
            Some(RawPointerEvent::Scroll {
                pos: pos2(10., 20.),
                delta: vec2(0., 1.)
            }),
            input.translate(&wheel(1.), rect())
        );

        // Moved away from the map.
        assert_eq!(
            Some(RawPointerEvent::Left),
            input.translate(&Event::PointerMoved(pos2(10., 10.)), rect())
        );
        assert_eq!(None, input.translate(&wheel(-1.), rect()));
    }

    #[test]
    fn positions_become_relative_to_the_map() {
        let mut input = EguiInput::new();

        assert_eq!(
            Some(RawPointerEvent::Moved(pos2(10., 20.))),
            input.translate(&Event::PointerMoved(pos2(110., 70.)), rect())
        );
    }

    #[test]
    fn tracking_buttons() {
        let mut input = EguiInput::new();

        assert_eq!(
            Some(RawPointerEvent::Buttons {
                pos: pos2(0., 0.),
                state: ButtonState::PRIMARY
            }),
            input.translate(&button(100., 50., true), rect())
        );

        // Dragged outside, still followed.
        assert_eq!(
            Some(RawPointerEvent::Moved(pos2(-50., 0.))),
            input.translate(&Event::PointerMoved(pos2(50., 50.)), rect())
        );

        assert_eq!(
            Some(RawPointerEvent::Buttons {
                pos: pos2(-50., 0.),
                state: ButtonState::RELEASED
            }),
            input.translate(&button(50., 50., false), rect())
        );
    }

    #[test]
    fn presses_outside_are_ignored() {
        let mut input = EguiInput::new();
        assert_eq!(None, input.translate(&button(10., 10., true), rect()));
        assert_eq!(ButtonState::RELEASED, input.buttons());
    }

    #[test]
    fn leaving_the_map() {
        let mut input = EguiInput::new();

        assert_eq!(None, input.translate(&Event::PointerGone, rect()));

        input.translate(&Event::PointerMoved(pos2(200., 100.)), rect());
        assert_eq!(
            Some(RawPointerEvent::Left),
            input.translate(&Event::PointerMoved(pos2(0., 0.)), rect())
        );
        assert_eq!(None, input.translate(&Event::PointerGone, rect()));
    }
}
