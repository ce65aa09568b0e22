use std::time::Duration;

use egui::{PointerButton, Vec2};

use super::{
    ButtonAction, ButtonEvent, ButtonState, DeltaPosition, PointerFlows, PointerPosition,
};

/// Pressing for longer than that, without moving, makes a long press.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(500);

/// Raw pointer input, already augmented with geography.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSample {
    /// Pointer moved, or left the viewport if `None`.
    Moved(Option<PointerPosition>),

    /// State of the buttons changed.
    Buttons {
        state: ButtonState,
        position: Option<PointerPosition>,
    },
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    Pressed {
        start: Duration,
        origin: Option<PointerPosition>,

        /// When the long press fires, unless cancelled by then.
        deadline: Option<Duration>,

        dragging: bool,
    },
}

/// Turns raw pointer samples into hovers, clicks, short presses, long presses and drags, which get
/// published on the [`PointerFlows`].
///
/// Only the primary button is classified. Time is given explicitly with every call, as a
/// [`Duration`] since any fixed point, so the long press is a deadline which [`Self::tick`] fires
/// rather than a timer running somewhere else. A sample arriving exactly at the deadline is
/// processed first and may still cancel it.
pub struct PointerClassifier {
    flows: PointerFlows,
    long_press: Duration,
    state: State,
    last_buttons: Option<ButtonState>,
    last_position: Option<PointerPosition>,
}

impl PointerClassifier {
    pub fn new(flows: PointerFlows, long_press: Duration) -> Self {
        Self {
            flows,
            long_press,
            state: State::Idle,
            last_buttons: None,
            last_position: None,
        }
    }

    pub fn flows(&self) -> &PointerFlows {
        &self.flows
    }

    pub fn long_press_duration(&self) -> Duration {
        self.long_press
    }

    /// Whether the primary button is held and the gesture is not classified yet.
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, State::Pressed { .. })
    }

    /// When [`Self::tick`] should be called next, if anything is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            State::Pressed { deadline, .. } => deadline,
            State::Idle => None,
        }
    }

    pub fn handle(&mut self, sample: PointerSample, now: Duration) {
        self.fire_long_press(|deadline| deadline < now);

        match sample {
            PointerSample::Moved(position) => self.moved(position),
            PointerSample::Buttons { state, position } => self.buttons(state, position, now),
        }
    }

    /// Let the time pass, firing the long press if it is due.
    pub fn tick(&mut self, now: Duration) {
        self.fire_long_press(|deadline| deadline <= now);
    }

    fn fire_long_press(&mut self, due: impl Fn(Duration) -> bool) {
        let State::Pressed {
            deadline: Some(deadline),
            origin,
            ..
        } = self.state
        else {
            return;
        };

        if !due(deadline) {
            return;
        }

        self.state = State::Idle;

        match origin {
            Some(position) => {
                log::trace!("Long press at {position:?}.");
                self.flows.long_presses.publish(position);
            }
            None => log::trace!("Long press without a position, ignoring."),
        }
    }

    fn moved(&mut self, position: Option<PointerPosition>) {
        let previous = std::mem::replace(&mut self.last_position, position);

        if let State::Pressed {
            deadline, dragging, ..
        } = &mut self.state
        {
            match (previous, position) {
                (Some(previous), Some(current)) => {
                    let delta = DeltaPosition::new(previous, current);
                    if delta.diff == Vec2::ZERO {
                        return;
                    }

                    if deadline.take().is_some() {
                        log::trace!("Movement cancelled the long press.");
                    }

                    *dragging = true;
                    self.flows.drags.publish(delta);
                    return;
                }
                (_, None) => {
                    // Pointer left while pressed, nothing to classify anymore. Still forwarded
                    // to the moves, so hover tracking learns the pointer is gone.
                    *deadline = None;
                    *dragging = true;
                }
                (None, Some(_)) => (),
            }
        }

        self.flows.moves.publish(position);
    }

    fn buttons(
        &mut self,
        state: ButtonState,
        position: Option<PointerPosition>,
        now: Duration,
    ) {
        if position.is_some() {
            self.last_position = position;
        }
        let position = position.or(self.last_position);

        let previous = self.last_buttons.replace(state);

        match (previous.map(|buttons| buttons.primary), state.primary) {
            (None | Some(false), true) => self.press(position, now),
            (Some(true), false) => self.release(position, now),
            (None, false) => {
                log::trace!("Release without a press.");
                self.publish_click(ButtonAction::Release, position);
            }
            (Some(false), false) | (Some(true), true) => (),
        }
    }

    fn press(&mut self, position: Option<PointerPosition>, now: Duration) {
        self.state = State::Pressed {
            start: now,
            origin: position,
            deadline: now.checked_add(self.long_press),
            dragging: false,
        };

        self.publish_click(ButtonAction::Press, position);
    }

    fn release(&mut self, position: Option<PointerPosition>, now: Duration) {
        if let State::Pressed {
            start,
            origin,
            dragging,
            ..
        } = self.state
        {
            let elapsed = now.saturating_sub(start);

            if dragging {
                log::trace!("Release after a drag.");
            } else if elapsed >= self.long_press {
                log::trace!("Release after {elapsed:?}, too late for a short press.");
            } else if let Some(position) = position.or(origin) {
                log::trace!("Short press at {position:?}.");
                self.flows.short_presses.publish(position);
            }
        }

        self.state = State::Idle;
        self.publish_click(ButtonAction::Release, position);
    }

    fn publish_click(&self, action: ButtonAction, position: Option<PointerPosition>) {
        self.flows.clicks.publish(ButtonEvent {
            button: PointerButton::Primary,
            action,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::Subscription, position::lat_lon};
    use egui::pos2;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn at(x: f32, y: f32) -> Option<PointerPosition> {
        Some(PointerPosition {
            coordinates: lat_lon(y as f64 / 10., x as f64 / 10.),
            offset: pos2(x, y),
        })
    }

    fn press(position: Option<PointerPosition>) -> PointerSample {
        PointerSample::Buttons {
            state: ButtonState::PRIMARY,
            position,
        }
    }

    fn release(position: Option<PointerPosition>) -> PointerSample {
        PointerSample::Buttons {
            state: ButtonState::RELEASED,
            position,
        }
    }

    struct Recorder {
        moves: Subscription<Option<PointerPosition>>,
        clicks: Subscription<ButtonEvent>,
        short_presses: Subscription<PointerPosition>,
        long_presses: Subscription<PointerPosition>,
        drags: Subscription<DeltaPosition>,
    }

    fn classifier() -> (PointerClassifier, Recorder) {
        let flows = PointerFlows::new();
        let recorder = Recorder {
            moves: flows.moves.subscribe(),
            clicks: flows.clicks.subscribe(),
            short_presses: flows.short_presses.subscribe(),
            long_presses: flows.long_presses.subscribe(),
            drags: flows.drags.subscribe(),
        };
        (PointerClassifier::new(flows, DEFAULT_LONG_PRESS), recorder)
    }

    fn actions(clicks: &mut Subscription<ButtonEvent>) -> Vec<ButtonAction> {
        clicks.drain().into_iter().map(|e| e.action).collect()
    }

    #[test]
    fn quick_press_is_a_short_press() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(press(at(10., 10.)), ms(0));
        classifier.handle(release(at(10., 10.)), ms(100));
        classifier.tick(ms(1000));

        assert_eq!(vec![at(10., 10.).unwrap()], recorder.short_presses.drain());
        assert!(recorder.long_presses.drain().is_empty());
        assert!(recorder.drags.drain().is_empty());
        assert_eq!(
            vec![ButtonAction::Press, ButtonAction::Release],
            actions(&mut recorder.clicks)
        );
    }

    #[test]
    fn holding_is_a_long_press() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(press(at(10., 10.)), ms(0));
        classifier.tick(ms(499));
        assert!(recorder.long_presses.drain().is_empty());
        assert_eq!(Some(ms(500)), classifier.next_deadline());

        classifier.tick(ms(501));
        assert_eq!(vec![at(10., 10.).unwrap()], recorder.long_presses.drain());
        assert!(!classifier.is_pressed());

        // Fires only once, and the release does not make it a short press.
        classifier.tick(ms(2000));
        classifier.handle(release(at(10., 10.)), ms(2100));
        assert!(recorder.long_presses.drain().is_empty());
        assert!(recorder.short_presses.drain().is_empty());
        assert_eq!(
            vec![ButtonAction::Press, ButtonAction::Release],
            actions(&mut recorder.clicks)
        );
    }

    #[test]
    fn leaving_while_pressed_is_still_a_move() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(PointerSample::Moved(at(10., 10.)), ms(0));
        classifier.handle(press(at(10., 10.)), ms(10));
        classifier.handle(PointerSample::Moved(None), ms(50));

        assert_eq!(vec![at(10., 10.), None], recorder.moves.drain());
        assert!(recorder.drags.drain().is_empty());
        assert_eq!(None, classifier.next_deadline());

        classifier.tick(ms(1000));
        classifier.handle(release(None), ms(1100));
        assert!(recorder.long_presses.drain().is_empty());
        assert!(recorder.short_presses.drain().is_empty());
    }

    #[test]
    fn overdue_long_press_fires_before_the_next_sample() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(press(at(10., 10.)), ms(0));

        // Nobody ticked in time.
        classifier.handle(PointerSample::Moved(at(20., 10.)), ms(800));

        assert_eq!(1, recorder.long_presses.drain().len());
        assert!(recorder.drags.drain().is_empty());
        assert_eq!(vec![at(20., 10.)], recorder.moves.drain());
    }

    #[test]
    fn dragging_is_neither_short_nor_long_press() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(press(at(10., 10.)), ms(0));
        classifier.handle(PointerSample::Moved(at(15., 12.)), ms(50));
        classifier.handle(PointerSample::Moved(at(25., 12.)), ms(80));
        classifier.tick(ms(600));
        classifier.handle(release(at(25., 12.)), ms(700));

        let drags = recorder.drags.drain();
        assert_eq!(2, drags.len());
        assert_eq!(Vec2::new(5., 2.), drags[0].diff);
        assert_eq!(Vec2::new(10., 0.), drags[1].diff);

        assert!(recorder.short_presses.drain().is_empty());
        assert!(recorder.long_presses.drain().is_empty());
        assert!(recorder.moves.drain().is_empty(), "moves are drags when pressed");
    }

    #[test]
    fn moves_are_forwarded_when_idle() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(PointerSample::Moved(at(1., 2.)), ms(0));
        classifier.handle(PointerSample::Moved(None), ms(10));

        assert_eq!(vec![at(1., 2.), None], recorder.moves.drain());
        assert!(recorder.drags.drain().is_empty());
    }

    #[test]
    fn unmatched_release_is_only_a_click() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(release(at(1., 1.)), ms(0));
        classifier.tick(ms(1000));

        assert_eq!(vec![ButtonAction::Release], actions(&mut recorder.clicks));
        assert!(recorder.short_presses.drain().is_empty());
        assert!(recorder.long_presses.drain().is_empty());
    }

    #[test]
    fn first_move_without_history_is_not_a_drag() {
        let (mut classifier, mut recorder) = classifier();

        // Touch screens may report a press before any position.
        classifier.handle(press(None), ms(0));
        classifier.handle(PointerSample::Moved(at(5., 5.)), ms(10));

        assert!(recorder.drags.drain().is_empty());
        assert_eq!(vec![at(5., 5.)], recorder.moves.drain());

        classifier.handle(PointerSample::Moved(at(6., 5.)), ms(20));
        assert_eq!(1, recorder.drags.drain().len());
    }

    #[test]
    fn release_at_the_deadline_is_neither() {
        let (mut classifier, mut recorder) = classifier();

        classifier.handle(press(at(1., 1.)), ms(0));
        classifier.handle(release(at(1., 1.)), ms(500));
        classifier.tick(ms(1000));

        assert!(recorder.short_presses.drain().is_empty());
        assert!(recorder.long_presses.drain().is_empty());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let (mut classifier, mut recorder) = classifier();

        let secondary = ButtonState {
            secondary: true,
            ..ButtonState::RELEASED
        };

        classifier.handle(release(at(1., 1.)), ms(0));
        recorder.clicks.drain();

        classifier.handle(
            PointerSample::Buttons {
                state: secondary,
                position: at(1., 1.),
            },
            ms(10),
        );
        classifier.handle(release(at(1., 1.)), ms(20));

        assert!(recorder.clicks.drain().is_empty());
        assert!(!classifier.is_pressed());
    }
}
