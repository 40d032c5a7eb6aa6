// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer event handling.
//!
//! The rendering layer forwards button presses, releases and motion with the
//! pointer position already converted to a time-axis value. The machine keeps
//! one [`InputMode`] and the global selection, mutates the store as gestures
//! progress, and reports to its listeners.

use super::state::{Edge, InputMode};
use crate::error::Result;
use crate::models::annotation::AnnotationId;
use crate::models::events::{ListenerId, Listeners};
use crate::models::store::AnnotationStore;
use crate::util::time::{format_range, format_timestamp, DEFAULT_TIME_FORMAT};

/// Identifies the display surface an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayId(pub usize);

/// Mouse button of a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Map a toolkit button number (1 = left, 2 = middle, 3 = right).
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => PointerButton::Primary,
            2 => PointerButton::Middle,
            3 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

/// A button press or release at a time-axis position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub display: DisplayId,
    pub button: PointerButton,
    pub x: f64,
    /// Time tolerance for grabbing an annotation edge
    pub border_offset: f64,
    /// Toolkit event timestamp, passed through to menu requests
    pub time: u32,
}

/// Pointer motion at a time-axis position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMotion {
    pub display: DisplayId,
    pub x: f64,
    pub time: u32,
}

/// Notifications from the input machine.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SelectionChanged {
        start: f64,
        end: f64,
    },
    SelectionRemoved,
    /// Status text for the user
    MessageChanged(String),
    /// Secondary click inside the selection; the host offers to annotate or play it
    SelectionChosen {
        display: DisplayId,
        start: f64,
        end: f64,
        time: u32,
    },
    /// Secondary click on an annotation; the host offers to delete it
    AnnotationChosen {
        display: DisplayId,
        id: AnnotationId,
        time: u32,
    },
}

/// Turns pointer gestures into store mutations and selection changes.
#[derive(Debug)]
pub struct InputStateMachine {
    mode: InputMode,
    selection: Option<(f64, f64)>,
    time_format: String,
    listeners: Listeners<InputEvent>,
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl InputStateMachine {
    /// Create a machine using the default message time format.
    pub fn new() -> Self {
        Self::with_time_format(DEFAULT_TIME_FORMAT)
    }

    /// Create a machine formatting status messages with a `chrono` format.
    pub fn with_time_format(format: impl Into<String>) -> Self {
        Self {
            mode: InputMode::Viewing,
            selection: None,
            time_format: format.into(),
            listeners: Listeners::new(),
        }
    }

    /// Register a listener for selection, message and menu events.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Current gesture.
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    /// The global selection as ordered `(start, end)`.
    pub fn selection(&self) -> Option<(f64, f64)> {
        self.selection
    }

    /// Replace the selection and tell listeners.
    pub fn set_selection(&mut self, selection: Option<(f64, f64)>) {
        self.selection = selection;
        match selection {
            Some((start, end)) => self
                .listeners
                .emit(&InputEvent::SelectionChanged { start, end }),
            None => self.listeners.emit(&InputEvent::SelectionRemoved),
        }
    }

    /// Send a status message to listeners.
    pub fn set_message(&mut self, message: String) {
        self.listeners.emit(&InputEvent::MessageChanged(message));
    }

    /// Abandon any gesture in progress without touching the store.
    pub fn reset(&mut self) {
        if !self.mode.is_viewing() {
            log::debug!("Abandoned {} gesture", self.mode.name());
        }
        self.mode = InputMode::Viewing;
    }

    /// Handle a button press: start a gesture or open a context menu.
    pub fn button_down(&mut self, store: &mut AnnotationStore, press: PointerPress) -> Result<()> {
        // A gesture in progress cannot be interrupted by another press.
        if !self.mode.is_viewing() {
            return Ok(());
        }

        match press.button {
            PointerButton::Primary => self.begin_gesture(store, press),
            PointerButton::Secondary => {
                self.choose(store, press);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Handle a button release: finish the gesture with the primary button.
    pub fn button_up(&mut self, store: &mut AnnotationStore, press: PointerPress) -> Result<()> {
        if self.mode.is_viewing() || press.button != PointerButton::Primary {
            return Ok(());
        }

        let result = self.apply(store, press.x);
        log::debug!("Finished {} gesture at {}", self.mode.name(), press.x);
        self.mode = InputMode::Viewing;
        result
    }

    /// Handle pointer motion: update the gesture or report the time under the pointer.
    pub fn pointer_move(
        &mut self,
        store: &mut AnnotationStore,
        motion: PointerMotion,
    ) -> Result<()> {
        if self.mode.is_viewing() {
            log::trace!("Pointer at {} on display {:?}", motion.x, motion.display);
            let message = format_timestamp(motion.x, &self.time_format);
            self.set_message(message);
            return Ok(());
        }

        let result = self.apply(store, motion.x);
        if result.is_err() {
            // The edited annotation vanished under the gesture.
            self.mode = InputMode::Viewing;
        }
        result
    }

    fn begin_gesture(&mut self, store: &mut AnnotationStore, press: PointerPress) -> Result<()> {
        let x = press.x;
        let Some(&id) = store.find_annotation(x).first() else {
            let (left, right) = neighbor_limits(store, x, None);
            self.mode = InputMode::selecting(x, left, right);
            log::debug!("Selecting from {x}");
            return Ok(());
        };

        let info = store.get_annotation(id)?;
        let (left, right) = neighbor_limits(store, x, Some(id));

        self.mode = if info.start + press.border_offset > x {
            InputMode::resizing(id, Edge::Left, x - info.start, info.end, left)
        } else if info.end - press.border_offset < x {
            InputMode::resizing(id, Edge::Right, x - info.end, info.start, right)
        } else {
            InputMode::dragging(id, info.end - info.start, x - info.start, left, right)
        };
        log::debug!("Started {} annotation {id} at {x}", self.mode.name());
        self.set_selection(None);
        Ok(())
    }

    fn choose(&mut self, store: &AnnotationStore, press: PointerPress) {
        let x = press.x;
        if let Some((start, end)) = self.selection {
            if start < x && x < end {
                self.listeners.emit(&InputEvent::SelectionChosen {
                    display: press.display,
                    start,
                    end,
                    time: press.time,
                });
                return;
            }
        }

        if let Some(&id) = store.find_annotation(x).first() {
            self.listeners.emit(&InputEvent::AnnotationChosen {
                display: press.display,
                id,
                time: press.time,
            });
        }
    }

    /// Apply the pointer position to whatever the current mode edits.
    fn apply(&mut self, store: &mut AnnotationStore, x: f64) -> Result<()> {
        let Some((start, end)) = self.mode.bounds_at(x) else {
            return Ok(());
        };

        let message = format_range(start, end, &self.time_format);
        self.set_message(message);

        match self.mode.target() {
            Some(id) => store.update_annotation(id, start, end),
            None if start == end => {
                self.set_selection(None);
                Ok(())
            }
            None => {
                self.set_selection(Some((start, end)));
                Ok(())
            }
        }
    }
}

/// Bounds of the nearest annotations left and right of `x`.
fn neighbor_limits(
    store: &AnnotationStore,
    x: f64,
    exclude: Option<AnnotationId>,
) -> (Option<f64>, Option<f64>) {
    let (left, right) = store.find_boundings(x, exclude);
    (left.map(|b| b.bound), right.map(|b| b.bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DISPLAY: DisplayId = DisplayId(0);

    fn press(button: PointerButton, x: f64, border_offset: f64) -> PointerPress {
        PointerPress {
            display: DISPLAY,
            button,
            x,
            border_offset,
            time: 0,
        }
    }

    fn primary(x: f64) -> PointerPress {
        press(PointerButton::Primary, x, 1.0)
    }

    fn motion(x: f64) -> PointerMotion {
        PointerMotion {
            display: DISPLAY,
            x,
            time: 0,
        }
    }

    fn recording_machine() -> (InputStateMachine, Rc<RefCell<Vec<InputEvent>>>) {
        let mut machine = InputStateMachine::with_time_format("%s");
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        machine.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        (machine, events)
    }

    fn bounds(store: &AnnotationStore, id: AnnotationId) -> (f64, f64) {
        let info = store.get_annotation(id).unwrap();
        (info.start, info.end)
    }

    #[test]
    fn test_interior_click_drags_edge_click_resizes() {
        let mut store = AnnotationStore::new();
        store.add_annotation("work", 100.0, 200.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine
            .button_down(&mut store, press(PointerButton::Primary, 150.0, 5.0))
            .unwrap();
        assert!(matches!(machine.mode(), InputMode::Dragging { .. }));
        machine.button_up(&mut store, primary(150.0)).unwrap();
        assert!(machine.mode().is_viewing());

        machine
            .button_down(&mut store, press(PointerButton::Primary, 102.0, 5.0))
            .unwrap();
        assert!(matches!(
            machine.mode(),
            InputMode::Resizing {
                edge: Edge::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_right_edge_click_resizes_right() {
        let mut store = AnnotationStore::new();
        store.add_annotation("work", 100.0, 200.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine
            .button_down(&mut store, press(PointerButton::Primary, 198.0, 5.0))
            .unwrap();
        assert!(matches!(
            machine.mode(),
            InputMode::Resizing {
                edge: Edge::Right,
                ..
            }
        ));
    }

    #[test]
    fn test_narrow_annotation_prefers_left_edge() {
        let mut store = AnnotationStore::new();
        store.add_annotation("blip", 100.0, 104.0).unwrap();
        let mut machine = InputStateMachine::new();

        // Within 5 of both edges.
        machine
            .button_down(&mut store, press(PointerButton::Primary, 102.0, 5.0))
            .unwrap();
        assert!(matches!(
            machine.mode(),
            InputMode::Resizing {
                edge: Edge::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_select_publishes_ordered_selection() {
        let mut store = AnnotationStore::new();
        let (mut machine, events) = recording_machine();

        machine.button_down(&mut store, primary(50.0)).unwrap();
        assert!(matches!(machine.mode(), InputMode::Selecting { .. }));
        machine.pointer_move(&mut store, motion(40.0)).unwrap();
        machine.button_up(&mut store, primary(30.0)).unwrap();

        assert_eq!(machine.selection(), Some((30.0, 50.0)));
        assert!(machine.mode().is_viewing());
        assert_eq!(
            events.borrow().last(),
            Some(&InputEvent::SelectionChanged {
                start: 30.0,
                end: 50.0
            })
        );
        assert!(events
            .borrow()
            .contains(&InputEvent::MessageChanged("40 - 50".to_string())));
        assert!(store.is_empty());
    }

    #[test]
    fn test_selection_clamped_to_neighbors() {
        let mut store = AnnotationStore::new();
        store.add_annotation("a", 0.0, 10.0).unwrap();
        store.add_annotation("a", 20.0, 30.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(15.0)).unwrap();
        machine.pointer_move(&mut store, motion(100.0)).unwrap();
        assert_eq!(machine.selection(), Some((15.0, 20.0)));
        machine.button_up(&mut store, primary(-100.0)).unwrap();
        assert_eq!(machine.selection(), Some((10.0, 15.0)));
    }

    #[test]
    fn test_zero_width_selection_clears() {
        let mut store = AnnotationStore::new();
        let (mut machine, events) = recording_machine();
        machine.set_selection(Some((1.0, 2.0)));

        machine.button_down(&mut store, primary(50.0)).unwrap();
        machine.button_up(&mut store, primary(50.0)).unwrap();

        assert_eq!(machine.selection(), None);
        assert_eq!(events.borrow().last(), Some(&InputEvent::SelectionRemoved));
    }

    #[test]
    fn test_drag_clamps_at_right_neighbor() {
        let mut store = AnnotationStore::new();
        let a = store.add_annotation("work", 0.0, 10.0).unwrap();
        store.add_annotation("work", 20.0, 30.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(5.0)).unwrap();
        machine.pointer_move(&mut store, motion(12.0)).unwrap();
        assert_eq!(bounds(&store, a), (7.0, 17.0));

        machine.pointer_move(&mut store, motion(500.0)).unwrap();
        assert_eq!(bounds(&store, a), (10.0, 20.0));

        machine.button_up(&mut store, primary(1000.0)).unwrap();
        let (_, end) = bounds(&store, a);
        assert!(end <= 20.0);
    }

    #[test]
    fn test_drag_clamps_at_left_neighbor() {
        let mut store = AnnotationStore::new();
        store.add_annotation("work", 0.0, 10.0).unwrap();
        let b = store.add_annotation("work", 20.0, 30.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(22.0)).unwrap();
        machine.button_up(&mut store, primary(-50.0)).unwrap();
        assert_eq!(bounds(&store, b), (10.0, 20.0));
    }

    #[test]
    fn test_resize_right_edge_is_unbounded_without_neighbor() {
        let mut store = AnnotationStore::new();
        let a = store.add_annotation("work", 0.0, 10.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(10.0)).unwrap();
        assert!(matches!(
            machine.mode(),
            InputMode::Resizing {
                edge: Edge::Right,
                limits,
                ..
            } if limits.right.is_none()
        ));
        machine.button_up(&mut store, primary(1e6)).unwrap();
        assert_eq!(bounds(&store, a), (0.0, 1e6));
    }

    #[test]
    fn test_resize_right_edge_stops_at_neighbor() {
        let mut store = AnnotationStore::new();
        let a = store.add_annotation("a", 0.0, 10.0).unwrap();
        let b = store.add_annotation("a", 20.0, 30.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(9.5)).unwrap();
        assert!(matches!(
            machine.mode(),
            InputMode::Resizing {
                edge: Edge::Right,
                ..
            }
        ));
        machine.pointer_move(&mut store, motion(15.5)).unwrap();
        assert_eq!(bounds(&store, a), (0.0, 16.0));

        machine.button_up(&mut store, primary(500.0)).unwrap();
        assert_eq!(bounds(&store, a), (0.0, 20.0));
        assert_eq!(bounds(&store, b), (20.0, 30.0));
    }

    #[test]
    fn test_resize_cannot_invert_annotation() {
        let mut store = AnnotationStore::new();
        let a = store.add_annotation("work", 100.0, 200.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(200.0)).unwrap();
        machine.button_up(&mut store, primary(0.0)).unwrap();
        assert_eq!(bounds(&store, a), (100.0, 100.0));

        machine.button_down(&mut store, primary(100.0)).unwrap();
        assert!(matches!(
            machine.mode(),
            InputMode::Resizing {
                edge: Edge::Left,
                ..
            }
        ));
        machine.button_up(&mut store, primary(500.0)).unwrap();
        let (start, end) = bounds(&store, a);
        assert!(start <= end);
    }

    #[test]
    fn test_resize_left_edge_stops_at_neighbor() {
        let mut store = AnnotationStore::new();
        store.add_annotation("a", 0.0, 10.0).unwrap();
        let b = store.add_annotation("a", 20.0, 30.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(20.5)).unwrap();
        machine.button_up(&mut store, primary(-40.0)).unwrap();
        assert_eq!(bounds(&store, b), (10.0, 30.0));
    }

    #[test]
    fn test_drag_clears_selection() {
        let mut store = AnnotationStore::new();
        store.add_annotation("work", 100.0, 200.0).unwrap();
        let (mut machine, events) = recording_machine();
        machine.set_selection(Some((10.0, 20.0)));
        events.borrow_mut().clear();

        machine.button_down(&mut store, primary(150.0)).unwrap();
        assert_eq!(machine.selection(), None);
        assert_eq!(*events.borrow(), vec![InputEvent::SelectionRemoved]);
    }

    #[test]
    fn test_gesture_cannot_be_interrupted() {
        let mut store = AnnotationStore::new();
        let a = store.add_annotation("work", 100.0, 200.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(150.0)).unwrap();
        let before = *machine.mode();

        machine
            .button_down(&mut store, press(PointerButton::Secondary, 10.0, 1.0))
            .unwrap();
        machine.button_down(&mut store, primary(10.0)).unwrap();
        machine
            .button_up(&mut store, press(PointerButton::Secondary, 10.0, 1.0))
            .unwrap();
        assert_eq!(*machine.mode(), before);
        assert_eq!(bounds(&store, a), (100.0, 200.0));

        machine.button_up(&mut store, primary(160.0)).unwrap();
        assert!(machine.mode().is_viewing());
        assert_eq!(bounds(&store, a), (110.0, 210.0));
    }

    #[test]
    fn test_secondary_release_does_not_end_selecting() {
        let mut store = AnnotationStore::new();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(50.0)).unwrap();
        machine
            .button_up(&mut store, press(PointerButton::Secondary, 70.0, 1.0))
            .unwrap();
        assert!(matches!(machine.mode(), InputMode::Selecting { .. }));
        assert_eq!(machine.selection(), None);

        machine.button_up(&mut store, primary(70.0)).unwrap();
        assert!(machine.mode().is_viewing());
        assert_eq!(machine.selection(), Some((50.0, 70.0)));
    }

    #[test]
    fn test_secondary_click_inside_selection() {
        let mut store = AnnotationStore::new();
        let (mut machine, events) = recording_machine();
        machine.set_selection(Some((10.0, 20.0)));
        events.borrow_mut().clear();

        let mut click = press(PointerButton::Secondary, 15.0, 1.0);
        click.time = 42;
        machine.button_down(&mut store, click).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![InputEvent::SelectionChosen {
                display: DISPLAY,
                start: 10.0,
                end: 20.0,
                time: 42
            }]
        );
        assert!(machine.mode().is_viewing());
    }

    #[test]
    fn test_secondary_click_on_annotation() {
        let mut store = AnnotationStore::new();
        let id = store.add_annotation("work", 100.0, 200.0).unwrap();
        let (mut machine, events) = recording_machine();
        // Selection edge is not inside the selection.
        machine.set_selection(Some((150.0, 160.0)));
        events.borrow_mut().clear();

        machine
            .button_down(&mut store, press(PointerButton::Secondary, 150.0, 1.0))
            .unwrap();
        assert_eq!(
            *events.borrow(),
            vec![InputEvent::AnnotationChosen {
                display: DISPLAY,
                id,
                time: 0
            }]
        );
    }

    #[test]
    fn test_secondary_click_on_nothing() {
        let mut store = AnnotationStore::new();
        let (mut machine, events) = recording_machine();
        machine
            .button_down(&mut store, press(PointerButton::Secondary, 5.0, 1.0))
            .unwrap();
        machine
            .button_down(&mut store, press(PointerButton::Middle, 5.0, 1.0))
            .unwrap();
        assert!(events.borrow().is_empty());
        assert!(machine.mode().is_viewing());
    }

    #[test]
    fn test_move_while_viewing_reports_time() {
        let mut store = AnnotationStore::new();
        let (mut machine, events) = recording_machine();
        machine.pointer_move(&mut store, motion(1234.0)).unwrap();
        assert_eq!(
            *events.borrow(),
            vec![InputEvent::MessageChanged("1234".to_string())]
        );
    }

    #[test]
    fn test_overlap_picks_first_id() {
        let mut store = AnnotationStore::new();
        let first = store.add_annotation("a", 0.0, 100.0).unwrap();
        store.add_annotation("b", 40.0, 60.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(50.0)).unwrap();
        assert_eq!(machine.mode().target(), Some(first));
    }

    #[test]
    fn test_vanished_annotation_ends_gesture() {
        let mut store = AnnotationStore::new();
        let a = store.add_annotation("work", 100.0, 200.0).unwrap();
        let mut machine = InputStateMachine::new();

        machine.button_down(&mut store, primary(150.0)).unwrap();
        store.remove_annotation(a).unwrap();
        assert!(machine.pointer_move(&mut store, motion(160.0)).is_err());
        assert!(machine.mode().is_viewing());
    }

    #[test]
    fn test_button_codes() {
        assert_eq!(PointerButton::from_code(1), PointerButton::Primary);
        assert_eq!(PointerButton::from_code(2), PointerButton::Middle);
        assert_eq!(PointerButton::from_code(3), PointerButton::Secondary);
        assert_eq!(PointerButton::from_code(8), PointerButton::Other(8));
    }
}
