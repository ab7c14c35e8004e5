// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangular ROI selection by pointer drag.
//!
//! `RoiSelector` sits between a display surface and the image it shows. The
//! host forwards pointer events in surface coordinates; on release the two
//! drag endpoints are mapped to image coordinates through a caller-supplied
//! [`CoordinateMapper`] and normalized into a [`Roi`].
//!
//! While a drag is in progress the selector draws a dashed rectangle on the
//! surface. It does NOT draw the committed ROI: hosts that want it visible
//! draw it themselves (the canvas does, see `ui::canvas`).

use crate::models::config::OverlayStyle;
use crate::models::roi::{ImagePoint, Roi, RoiRejection};

/// Maps a surface point to image pixel coordinates.
///
/// Must be pure and synchronous. Returns `None` when the point lies outside
/// the rendered image (e.g. in letterbox padding).
pub trait CoordinateMapper {
    fn map_to_image(&self, point: egui::Pos2) -> Option<ImagePoint>;
}

impl<F> CoordinateMapper for F
where
    F: Fn(egui::Pos2) -> Option<ImagePoint>,
{
    fn map_to_image(&self, point: egui::Pos2) -> Option<ImagePoint> {
        self(point)
    }
}

/// The drawable region the selector is bound to.
pub trait DisplaySurface {
    /// Schedule a repaint of the surface.
    fn request_repaint(&mut self);

    /// Whether there is content (an image) to draw against.
    fn has_content(&self) -> bool;

    /// Draw a dashed rectangle outline in surface coordinates.
    fn draw_dashed_rect(&mut self, rect: egui::Rect, style: &OverlayStyle);
}

/// Pointer input in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        pos: egui::Pos2,
        button: egui::PointerButton,
    },
    Move {
        pos: egui::Pos2,
    },
    Release {
        pos: egui::Pos2,
        button: egui::PointerButton,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { start: egui::Pos2, end: egui::Pos2 },
}

type RoiCallback = Box<dyn FnMut(Option<Roi>)>;

/// Interaction controller for drawing one rectangular ROI.
pub struct RoiSelector<S, M> {
    surface: S,
    mapper: M,
    style: OverlayStyle,
    active: bool,
    drag: DragState,
    committed: Option<Roi>,
    subscribers: Vec<RoiCallback>,
}

impl<S: DisplaySurface, M: CoordinateMapper> RoiSelector<S, M> {
    /// Bind a new, inactive selector to a surface and a mapping function.
    pub fn new(surface: S, mapper: M) -> Self {
        Self {
            surface,
            mapper,
            style: OverlayStyle::default(),
            active: false,
            drag: DragState::Idle,
            committed: None,
            subscribers: Vec::new(),
        }
    }

    /// Use a custom style for the drag overlay.
    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Register a change callback.
    ///
    /// Called with `Some(roi)` when a drag commits a new ROI, and with `None`
    /// both after a drag that produced nothing (the committed ROI is then
    /// unchanged) and after [`clear`](Self::clear). The payload alone does
    /// not tell the two apart; callers that care track their own clears.
    pub fn subscribe(&mut self, callback: impl FnMut(Option<Roi>) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Enable or disable pointer interception.
    ///
    /// Always cancels a drag in progress; the committed ROI is kept.
    pub fn set_active(&mut self, on: bool) {
        if self.is_dragging() {
            log::debug!("ROI drag cancelled");
        }
        self.active = on;
        self.drag = DragState::Idle;
        self.surface.request_repaint();
    }

    /// Discard the committed ROI and notify subscribers.
    pub fn clear(&mut self) {
        self.committed = None;
        self.surface.request_repaint();
        log::info!("ROI cleared");
        self.notify(None);
    }

    pub fn current_roi(&self) -> Option<Roi> {
        self.committed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Normalized rectangle of the drag in progress, in surface coordinates.
    pub fn drag_rect(&self) -> Option<egui::Rect> {
        match self.drag {
            DragState::Dragging { start, end } => Some(egui::Rect::from_two_pos(start, end)),
            DragState::Idle => None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Feed one pointer event. Returns `true` if the event was consumed and
    /// must not reach the surface's default handling.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        if !self.active {
            return false;
        }

        match (self.drag, event) {
            // A primary press always (re)starts a drag.
            (_, PointerEvent::Press { pos, button: egui::PointerButton::Primary }) => {
                self.drag = DragState::Dragging { start: pos, end: pos };
                self.surface.request_repaint();
                true
            }
            (DragState::Dragging { start, .. }, PointerEvent::Move { pos }) => {
                self.drag = DragState::Dragging { start, end: pos };
                self.surface.request_repaint();
                true
            }
            (DragState::Dragging { start, .. }, PointerEvent::Release { pos, .. }) => {
                self.drag = DragState::Idle;
                self.finish_drag(start, pos);
                true
            }
            _ => false,
        }
    }

    /// Draw the drag overlay. Call on every repaint of the surface, whether
    /// or not the selector is active.
    pub fn handle_repaint_request(&mut self) {
        if !self.surface.has_content() || !self.active {
            return;
        }
        if let Some(rect) = self.drag_rect() {
            self.surface.draw_dashed_rect(rect, &self.style);
        }
    }

    fn finish_drag(&mut self, start: egui::Pos2, end: egui::Pos2) {
        let payload = match self.build_roi(start, end) {
            Ok(roi) => {
                log::info!("ROI selected: {}", roi);
                self.committed = Some(roi);
                Some(roi)
            }
            Err(reason) => {
                log::debug!("ROI drag rejected: {}", reason);
                None
            }
        };
        self.surface.request_repaint();
        self.notify(payload);
    }

    fn build_roi(&self, start: egui::Pos2, end: egui::Pos2) -> Result<Roi, RoiRejection> {
        let p0 = self.mapper.map_to_image(start);
        let p1 = self.mapper.map_to_image(end);
        match (p0, p1) {
            (Some(a), Some(b)) => Roi::from_corners(a, b),
            _ => Err(RoiRejection::OutsideImage),
        }
    }

    fn notify(&mut self, payload: Option<Roi>) {
        for callback in self.subscribers.iter_mut() {
            callback(payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSurface {
        repaints: usize,
        empty: bool,
        drawn: Vec<egui::Rect>,
    }

    impl DisplaySurface for RecordingSurface {
        fn request_repaint(&mut self) {
            self.repaints += 1;
        }

        fn has_content(&self) -> bool {
            !self.empty
        }

        fn draw_dashed_rect(&mut self, rect: egui::Rect, _style: &OverlayStyle) {
            self.drawn.push(rect);
        }
    }

    /// Surface coordinates equal image coordinates; negative x is "outside".
    fn identity(p: egui::Pos2) -> Option<ImagePoint> {
        (p.x >= 0.0).then_some((p.x as i32, p.y as i32))
    }

    type Notifications = Rc<RefCell<Vec<Option<Roi>>>>;

    fn selector() -> (
        RoiSelector<RecordingSurface, fn(egui::Pos2) -> Option<ImagePoint>>,
        Notifications,
    ) {
        let mut selector = RoiSelector::new(
            RecordingSurface::default(),
            identity as fn(egui::Pos2) -> Option<ImagePoint>,
        );
        let seen = Notifications::default();
        let sink = seen.clone();
        selector.subscribe(move |roi| sink.borrow_mut().push(roi));
        selector.set_active(true);
        (selector, seen)
    }

    fn press(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Press {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
        }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move { pos: egui::pos2(x, y) }
    }

    fn release(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Release {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
        }
    }

    fn drag<S: DisplaySurface, M: CoordinateMapper>(
        selector: &mut RoiSelector<S, M>,
        from: (f32, f32),
        to: (f32, f32),
    ) {
        assert!(selector.handle_pointer_event(press(from.0, from.1)));
        assert!(selector.handle_pointer_event(moved(to.0, to.1)));
        assert!(selector.handle_pointer_event(release(to.0, to.1)));
    }

    #[test]
    fn test_drag_commits_roi() {
        let (mut selector, seen) = selector();
        drag(&mut selector, (10.0, 10.0), (50.0, 40.0));

        let expected = Roi::new(10, 10, 40, 30);
        assert_eq!(selector.current_roi(), expected);
        assert_eq!(*seen.borrow(), vec![expected]);
        assert!(!selector.is_dragging());
    }

    #[test]
    fn test_drag_is_order_independent() {
        let (mut forward, _) = selector();
        drag(&mut forward, (10.0, 10.0), (50.0, 40.0));
        let (mut backward, _) = selector();
        drag(&mut backward, (50.0, 40.0), (10.0, 10.0));

        assert_eq!(forward.current_roi(), backward.current_roi());
        assert_eq!(backward.current_roi(), Roi::new(10, 10, 40, 30));
    }

    #[test]
    fn test_degenerate_drag_keeps_previous_roi() {
        let (mut selector, seen) = selector();
        drag(&mut selector, (10.0, 10.0), (50.0, 40.0));
        let previous = selector.current_roi();

        // Zero width
        drag(&mut selector, (20.0, 20.0), (20.0, 60.0));
        assert_eq!(selector.current_roi(), previous);

        // Click without movement
        assert!(selector.handle_pointer_event(press(5.0, 5.0)));
        assert!(selector.handle_pointer_event(release(5.0, 5.0)));
        assert_eq!(selector.current_roi(), previous);

        assert_eq!(*seen.borrow(), vec![previous, None, None]);
    }

    #[test]
    fn test_drag_outside_image_keeps_previous_roi() {
        let (mut selector, seen) = selector();
        drag(&mut selector, (10.0, 10.0), (50.0, 40.0));
        let previous = selector.current_roi();

        drag(&mut selector, (-5.0, 10.0), (50.0, 40.0));
        assert_eq!(selector.current_roi(), previous);
        drag(&mut selector, (10.0, 10.0), (-50.0, 40.0));
        assert_eq!(selector.current_roi(), previous);

        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(seen.borrow()[1], None);
        assert_eq!(seen.borrow()[2], None);
    }

    #[test]
    fn test_clear_notifies_none() {
        let (mut selector, seen) = selector();
        drag(&mut selector, (10.0, 10.0), (50.0, 40.0));

        selector.clear();
        assert_eq!(selector.current_roi(), None);
        selector.clear();
        assert_eq!(selector.current_roi(), None);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(&seen[1..], &[None, None]);
    }

    #[test]
    fn test_inactive_selector_ignores_input() {
        let (mut selector, seen) = selector();
        selector.set_active(false);

        assert!(!selector.handle_pointer_event(press(10.0, 10.0)));
        assert!(!selector.handle_pointer_event(moved(50.0, 40.0)));
        assert!(!selector.handle_pointer_event(release(50.0, 40.0)));
        assert!(!selector.is_dragging());
        assert_eq!(selector.current_roi(), None);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_deactivate_cancels_drag() {
        let (mut selector, seen) = selector();
        drag(&mut selector, (10.0, 10.0), (50.0, 40.0));
        let committed = selector.current_roi();

        assert!(selector.handle_pointer_event(press(0.0, 0.0)));
        assert!(selector.handle_pointer_event(moved(90.0, 90.0)));
        selector.set_active(false);
        assert!(!selector.is_dragging());
        assert_eq!(selector.current_roi(), committed);

        // Re-activating does not resurrect the cancelled drag
        selector.set_active(true);
        assert!(!selector.handle_pointer_event(release(90.0, 90.0)));
        assert_eq!(selector.current_roi(), committed);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unrelated_events_pass_through() {
        let (mut selector, _) = selector();

        // Move and release without a press
        assert!(!selector.handle_pointer_event(moved(10.0, 10.0)));
        assert!(!selector.handle_pointer_event(release(10.0, 10.0)));

        // Secondary button does not start a drag
        let secondary = PointerEvent::Press {
            pos: egui::pos2(10.0, 10.0),
            button: egui::PointerButton::Secondary,
        };
        assert!(!selector.handle_pointer_event(secondary));
        assert!(!selector.is_dragging());
    }

    #[test]
    fn test_press_while_dragging_restarts_drag() {
        let (mut selector, seen) = selector();
        assert!(selector.handle_pointer_event(press(0.0, 0.0)));
        assert!(selector.handle_pointer_event(moved(90.0, 90.0)));

        assert!(selector.handle_pointer_event(press(10.0, 10.0)));
        assert_eq!(
            selector.drag_rect(),
            Some(egui::Rect::from_min_max(egui::pos2(10.0, 10.0), egui::pos2(10.0, 10.0)))
        );

        assert!(selector.handle_pointer_event(release(50.0, 40.0)));
        assert_eq!(selector.current_roi(), Roi::new(10, 10, 40, 30));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_any_button_release_ends_drag() {
        let (mut selector, seen) = selector();
        assert!(selector.handle_pointer_event(press(10.0, 10.0)));

        let secondary_release = PointerEvent::Release {
            pos: egui::pos2(50.0, 40.0),
            button: egui::PointerButton::Secondary,
        };
        assert!(selector.handle_pointer_event(secondary_release));
        assert!(!selector.is_dragging());
        assert_eq!(selector.current_roi(), Roi::new(10, 10, 40, 30));
        assert_eq!(*seen.borrow(), vec![Roi::new(10, 10, 40, 30)]);
    }

    #[test]
    fn test_repaint_draws_normalized_drag_rect() {
        let (mut selector, _) = selector();
        selector.handle_repaint_request();
        assert!(selector.surface().drawn.is_empty());

        selector.handle_pointer_event(press(50.0, 40.0));
        selector.handle_pointer_event(moved(10.0, 10.0));
        selector.handle_repaint_request();

        let expected = egui::Rect::from_min_max(egui::pos2(10.0, 10.0), egui::pos2(50.0, 40.0));
        assert_eq!(selector.surface().drawn, vec![expected]);
        assert_eq!(selector.drag_rect(), Some(expected));

        // Nothing after release; the committed ROI is the host's to draw
        selector.handle_pointer_event(release(10.0, 10.0));
        selector.handle_repaint_request();
        assert_eq!(selector.surface().drawn.len(), 1);
    }

    #[test]
    fn test_repaint_skipped_without_content() {
        let (mut selector, _) = selector();
        selector.surface_mut().empty = true;
        selector.handle_pointer_event(press(0.0, 0.0));
        selector.handle_pointer_event(moved(20.0, 20.0));
        selector.handle_repaint_request();
        assert!(selector.surface().drawn.is_empty());
    }

    #[test]
    fn test_state_changes_request_repaint() {
        let (mut selector, _) = selector();
        let base = selector.surface().repaints;

        drag(&mut selector, (10.0, 10.0), (50.0, 40.0));
        assert_eq!(selector.surface().repaints, base + 3);

        selector.clear();
        selector.set_active(false);
        assert_eq!(selector.surface().repaints, base + 5);
    }

    #[test]
    fn test_closure_mapper() {
        let offset = 100;
        let mapper = move |p: egui::Pos2| Some((p.x as i32 + offset, p.y as i32 + offset));
        let mut selector = RoiSelector::new(RecordingSurface::default(), mapper);
        selector.set_active(true);
        drag(&mut selector, (0.0, 0.0), (10.0, 20.0));
        assert_eq!(selector.current_roi(), Roi::new(100, 100, 10, 20));
    }
}
