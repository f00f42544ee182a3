//! Toast lifecycle, stacking and reflow.
//!
//! One [`NotificationManager`] serves one anchor and keeps a record list
//! per parent surface, ordered by arrival. A toast slides in from off
//! screen, rests at its stacking offset, and fades out when its lifetime
//! expires; removing one re-targets the reflow animation of everything
//! that arrived after it. Records own their animations, so dropping a
//! record stops its motion with it.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use super::anchor::{Anchor, DEFAULT_MARGIN, DEFAULT_SPACING};
use crate::anim::{Easing, FloatAnim, PointAnim};

/// Identifier for a parent surface toasts are shown over.
pub type SurfaceId = Uuid;
/// Identifier for a single toast.
pub type ToastId = Uuid;

/// How long the slide-in runs.
pub const SLIDE_DURATION: Duration = Duration::from_millis(200);
/// How long a reflow (drop) runs.
pub const DROP_DURATION: Duration = Duration::from_millis(200);
/// Default time a toast stays up before fading.
pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(1500);
/// The fade-out runs for the toast's lifetime shortened by this much.
const FADE_REDUCTION: Duration = Duration::from_millis(500);

/// Default card size used when the creator does not measure content.
const DEFAULT_SIZE: Size = Size::new(304.0, 64.0);

/// Visual flavour of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastKind {
    Information,
    Success,
    Warning,
    Error,
    Custom,
}

/// A toast notification to be shown over a surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    /// Card size used for placement.
    pub size: Size,
    /// Time until fade-out begins; `None` keeps the toast until dismissed.
    pub lifetime: Option<Duration>,
    /// Whether the card shows a close button.
    pub closable: bool,
}

impl Toast {
    /// Create a toast with the default size and lifetime.
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            size: DEFAULT_SIZE,
            lifetime: Some(DEFAULT_LIFETIME),
            closable: true,
        }
    }

    /// Set the card size.
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the time before fade-out begins.
    pub fn lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Keep the toast until it is dismissed by hand.
    pub fn sticky(mut self) -> Self {
        self.lifetime = None;
        self
    }

    /// Show or hide the close button.
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }
}

/// A live toast with its current position and animation state.
#[derive(Debug, Clone)]
pub struct ToastRecord {
    pub toast: Toast,
    /// Current top-left position within the parent surface.
    pub position: Point,
    slide: Option<PointAnim>,
    drop: Option<PointAnim>,
    fade: Option<FloatAnim>,
    deadline: Option<Instant>,
}

impl ToastRecord {
    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self, now: Instant) -> f64 {
        self.fade.map_or(1.0, |fade| fade.sample(now))
    }

    /// Whether the fade-out has begun.
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn position_at(&self, now: Instant) -> Point {
        if let Some(drop) = self.drop {
            drop.sample(now)
        } else if let Some(slide) = self.slide {
            slide.sample(now)
        } else {
            self.position
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SurfaceToasts {
    size: Size,
    records: Vec<ToastRecord>,
}

/// Stacks and animates toasts at one anchor, per parent surface.
#[derive(Debug, Clone)]
pub struct NotificationManager {
    anchor: Anchor,
    /// Gap between a toast and the parent edge.
    pub margin: f64,
    /// Gap between stacked toasts.
    pub spacing: f64,
    surfaces: HashMap<SurfaceId, SurfaceToasts>,
}

impl NotificationManager {
    /// Create a manager for `anchor`.
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            margin: DEFAULT_MARGIN,
            spacing: DEFAULT_SPACING,
            surfaces: HashMap::new(),
        }
    }

    /// The anchor this manager places toasts at.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Show `toast` over `surface`, sliding it in from off screen.
    ///
    /// The surface is registered on first use and its size refreshed on
    /// every add. Adding a toast that is already shown changes nothing.
    pub fn add(&mut self, surface: SurfaceId, parent_size: Size, toast: Toast, now: Instant) -> ToastId {
        let anchor = self.anchor;
        let (margin, spacing) = (self.margin, self.spacing);
        let state = self.surfaces.entry(surface).or_default();
        state.size = parent_size;

        let id = toast.id;
        if state.records.iter().any(|r| r.toast.id == id) {
            return id;
        }

        let stacked = if anchor.stacks() {
            state
                .records
                .iter()
                .map(|r| r.toast.size.height + spacing)
                .sum()
        } else {
            0.0
        };
        let rest = anchor.rest_position(parent_size, toast.size, stacked, margin);
        let start = anchor.slide_start(parent_size, toast.size, rest, spacing);
        let deadline = toast.lifetime.map(|lifetime| now + lifetime);

        log::debug!("toast '{}' added at {anchor}", toast.title);
        state.records.push(ToastRecord {
            toast,
            // Placed at the start point right away, so there is no jump
            // when the slide begins.
            position: start,
            slide: Some(PointAnim::new(start, rest, SLIDE_DURATION, Easing::OutCubic, now)),
            drop: None,
            fade: None,
            deadline,
        });
        id
    }

    /// Close toast `id` on `surface` and reflow the rest.
    ///
    /// Toasts after the removed one get a reflow animation from where they
    /// are now to their recomputed rest; earlier toasts keep their rests
    /// and whatever motion is still in flight. Unknown ids are ignored.
    pub fn remove(&mut self, surface: SurfaceId, id: ToastId, now: Instant) {
        let anchor = self.anchor;
        let (margin, spacing) = (self.margin, self.spacing);
        let Some(state) = self.surfaces.get_mut(&surface) else {
            return;
        };
        let Some(index) = state.records.iter().position(|r| r.toast.id == id) else {
            return;
        };
        state.records.remove(index);

        let mut stacked = if anchor.stacks() {
            state.records[..index]
                .iter()
                .map(|r| r.toast.size.height + spacing)
                .sum()
        } else {
            0.0
        };
        for record in state.records.iter_mut().skip(index) {
            let rest = anchor.rest_position(state.size, record.toast.size, stacked, margin);
            if anchor.stacks() {
                stacked += record.toast.size.height + spacing;
            }
            let here = record.position_at(now);
            record.position = here;
            record.slide = None;
            record.drop = Some(PointAnim::new(here, rest, DROP_DURATION, Easing::Linear, now));
        }
    }

    /// Rest position of toast `id` on `surface`, recomputed from the
    /// current arrival order, with an optional parent-size override.
    pub fn modal_position(
        &self,
        surface: SurfaceId,
        id: ToastId,
        parent_size: Option<Size>,
    ) -> Option<Point> {
        let state = self.surfaces.get(&surface)?;
        let index = state.records.iter().position(|r| r.toast.id == id)?;
        let parent = parent_size.unwrap_or(state.size);
        let stacked = if self.anchor.stacks() {
            state.records[..index]
                .iter()
                .map(|r| r.toast.size.height + self.spacing)
                .sum()
        } else {
            0.0
        };
        let size = state.records[index].toast.size;
        Some(self.anchor.rest_position(parent, size, stacked, self.margin))
    }

    /// Off-screen point toast `id` would slide in from.
    pub fn slide_start_pos(&self, surface: SurfaceId, id: ToastId) -> Option<Point> {
        let rest = self.modal_position(surface, id, None)?;
        let state = self.surfaces.get(&surface)?;
        let record = state.records.iter().find(|r| r.toast.id == id)?;
        Some(
            self.anchor
                .slide_start(state.size, record.toast.size, rest, self.spacing),
        )
    }

    /// Move every toast on `surface` to its rest for the new size, without
    /// animating.
    pub fn parent_resized(&mut self, surface: SurfaceId, new_size: Size) {
        let anchor = self.anchor;
        let (margin, spacing) = (self.margin, self.spacing);
        let Some(state) = self.surfaces.get_mut(&surface) else {
            return;
        };
        state.size = new_size;
        let mut stacked = 0.0;
        for record in &mut state.records {
            let rest = anchor.rest_position(new_size, record.toast.size, stacked, margin);
            if anchor.stacks() {
                stacked += record.toast.size.height + spacing;
            }
            record.position = rest;
            record.slide = None;
            record.drop = None;
        }
    }

    /// Drop all bookkeeping for a surface that is going away.
    pub fn remove_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    /// Advance animations and lifetimes; returns the toasts that finished
    /// fading and were closed.
    pub fn tick(&mut self, now: Instant) -> Vec<(SurfaceId, ToastId)> {
        let mut closed = Vec::new();
        for (&surface, state) in self.surfaces.iter_mut() {
            for record in &mut state.records {
                if let Some(drop) = record.drop {
                    record.position = drop.sample(now);
                    if drop.is_finished(now) {
                        record.drop = None;
                    }
                } else if let Some(slide) = record.slide {
                    record.position = slide.sample(now);
                    if slide.is_finished(now) {
                        record.slide = None;
                    }
                }

                if record.fade.is_none() {
                    if let Some(deadline) = record.deadline {
                        if now >= deadline {
                            let lifetime = record.toast.lifetime.unwrap_or_default();
                            let duration = lifetime.saturating_sub(FADE_REDUCTION);
                            record.fade =
                                Some(FloatAnim::new(1.0, 0.0, duration, Easing::Linear, now));
                        }
                    }
                }
                if let Some(fade) = record.fade {
                    if fade.is_finished(now) {
                        closed.push((surface, record.toast.id));
                    }
                }
            }
        }
        for &(surface, id) in &closed {
            self.remove(surface, id, now);
        }
        closed
    }

    /// Live records on `surface`, in arrival order.
    pub fn records(&self, surface: SurfaceId) -> &[ToastRecord] {
        self.surfaces
            .get(&surface)
            .map(|state| state.records.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live toasts on `surface`.
    pub fn toast_count(&self, surface: SurfaceId) -> usize {
        self.records(surface).len()
    }
}

/// Errors from the toast registry.
#[derive(Debug, Error)]
pub enum ToastError {
    #[error("`{0}` is not a recognized anchor position")]
    InvalidAnchor(String),
}

/// Creates and owns one [`NotificationManager`] per anchor.
#[derive(Debug, Clone, Default)]
pub struct ToastRegistry {
    managers: HashMap<Anchor, NotificationManager>,
}

impl ToastRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager for the anchor named `position`, created on first use.
    ///
    /// An unknown name fails and registers nothing.
    pub fn make(&mut self, position: &str) -> Result<&mut NotificationManager, ToastError> {
        let anchor = Anchor::from_name(position)
            .ok_or_else(|| ToastError::InvalidAnchor(position.to_string()))?;
        Ok(self.manager(anchor))
    }

    /// Manager for `anchor`, created on first use.
    pub fn manager(&mut self, anchor: Anchor) -> &mut NotificationManager {
        self.managers
            .entry(anchor)
            .or_insert_with(|| NotificationManager::new(anchor))
    }

    /// Manager for `anchor`, if one has been created.
    pub fn get(&self, anchor: Anchor) -> Option<&NotificationManager> {
        self.managers.get(&anchor)
    }

    /// Managers created so far.
    pub fn managers(&self) -> impl Iterator<Item = &NotificationManager> {
        self.managers.values()
    }

    /// Tell every manager about a parent surface's new size.
    pub fn parent_resized(&mut self, surface: SurfaceId, new_size: Size) {
        for manager in self.managers.values_mut() {
            manager.parent_resized(surface, new_size);
        }
    }

    /// Drop all bookkeeping for a surface that is going away.
    pub fn remove_surface(&mut self, surface: SurfaceId) {
        for manager in self.managers.values_mut() {
            manager.remove_surface(surface);
        }
    }

    /// Advance every manager; returns closed toasts with their anchors.
    pub fn tick(&mut self, now: Instant) -> Vec<(Anchor, SurfaceId, ToastId)> {
        let mut closed = Vec::new();
        for (&anchor, manager) in &mut self.managers {
            for (surface, id) in manager.tick(now) {
                closed.push((anchor, surface, id));
            }
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: Size = Size::new(800.0, 600.0);

    fn toast(height: f64) -> Toast {
        Toast::new(ToastKind::Information, "Info", "message").size(Size::new(304.0, height))
    }

    fn settle(manager: &mut NotificationManager, now: Instant) {
        manager.tick(now + Duration::from_millis(300));
    }

    #[test]
    fn test_add_starts_at_slide_start() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();

        let id = manager.add(surface, PARENT, toast(40.0), t0);

        let record = &manager.records(surface)[0];
        assert_eq!(record.toast.id, id);
        // Off the right edge, already at its rest height.
        assert_eq!(record.position, Point::new(800.0, 24.0));
        assert_eq!(manager.slide_start_pos(surface, id), Some(Point::new(800.0, 24.0)));
    }

    #[test]
    fn test_stacking_matches_arrival_order() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();

        for height in [40.0, 60.0, 30.0] {
            manager.add(surface, PARENT, toast(height), t0);
        }
        settle(&mut manager, t0);

        let positions: Vec<Point> = manager
            .records(surface)
            .iter()
            .map(|r| r.position)
            .collect();
        let x = 800.0 - 304.0 - 24.0;
        assert_eq!(
            positions,
            vec![
                Point::new(x, 24.0),
                Point::new(x, 24.0 + 40.0 + 16.0),
                Point::new(x, 24.0 + 40.0 + 16.0 + 60.0 + 16.0),
            ]
        );
    }

    #[test]
    fn test_reflow_after_remove() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();

        let first = manager.add(surface, PARENT, toast(40.0), t0);
        manager.add(surface, PARENT, toast(60.0), t0);
        manager.add(surface, PARENT, toast(30.0), t0);
        settle(&mut manager, t0);

        let t1 = t0 + Duration::from_millis(400);
        manager.remove(surface, first, t1);
        settle(&mut manager, t1);

        // Everything after the removed toast shifts up by its height and
        // spacing.
        let positions: Vec<Point> = manager
            .records(surface)
            .iter()
            .map(|r| r.position)
            .collect();
        let x = 800.0 - 304.0 - 24.0;
        assert_eq!(
            positions,
            vec![Point::new(x, 24.0), Point::new(x, 24.0 + 60.0 + 16.0)]
        );
    }

    #[test]
    fn test_reflow_is_animated() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();

        let first = manager.add(surface, PARENT, toast(40.0), t0);
        let second = manager.add(surface, PARENT, toast(60.0), t0);
        settle(&mut manager, t0);

        let t1 = t0 + Duration::from_millis(400);
        manager.remove(surface, first, t1);
        // Halfway through the linear drop the toast is halfway up.
        manager.tick(t1 + Duration::from_millis(100));

        let record = manager
            .records(surface)
            .iter()
            .find(|r| r.toast.id == second)
            .unwrap();
        let from = 24.0 + 40.0 + 16.0;
        let to = 24.0;
        assert!((record.position.y - (from + to) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_later_keeps_earlier_slide_running() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();

        let first = manager.add(surface, PARENT, toast(40.0), t0);
        let second = manager.add(surface, PARENT, toast(60.0), t0);

        // Remove the newer toast while both are still sliding in.
        manager.remove(surface, second, t0 + Duration::from_millis(100));
        manager.tick(t0 + Duration::from_millis(150));

        let records = manager.records(surface);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].toast.id, first);
        // The first toast's rest did not move, so its cubic-out slide
        // keeps running instead of being restarted as a drop.
        let rest_x = 800.0 - 304.0 - 24.0;
        let eased = 1.0 - (1.0 - 0.75f64).powi(3);
        let expected_x = 800.0 + (rest_x - 800.0) * eased;
        assert!((records[0].position.x - expected_x).abs() < 1e-9);
        assert_eq!(records[0].position.y, 24.0);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut manager = NotificationManager::new(Anchor::TopLeft);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        let toast = toast(40.0);

        manager.add(surface, PARENT, toast.clone(), t0);
        manager.add(surface, PARENT, toast, t0);

        assert_eq!(manager.toast_count(surface), 1);
    }

    #[test]
    fn test_remove_missing_is_a_no_op() {
        let mut manager = NotificationManager::new(Anchor::TopLeft);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        manager.add(surface, PARENT, toast(40.0), t0);

        manager.remove(surface, Uuid::new_v4(), t0);
        manager.remove(Uuid::new_v4(), Uuid::new_v4(), t0);

        assert_eq!(manager.toast_count(surface), 1);
    }

    #[test]
    fn test_modal_position_accepts_size_override() {
        let mut manager = NotificationManager::new(Anchor::BottomRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        let id = manager.add(surface, PARENT, toast(40.0), t0);

        let narrow = manager.modal_position(surface, id, Some(Size::new(400.0, 300.0)));

        assert_eq!(
            narrow,
            Some(Point::new(400.0 - 304.0 - 24.0, 300.0 - 40.0 - 24.0))
        );
    }

    #[test]
    fn test_parent_resized_jumps_to_new_rest() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        manager.add(surface, PARENT, toast(40.0), t0);
        settle(&mut manager, t0);

        manager.parent_resized(surface, Size::new(1000.0, 700.0));

        // No animation: the new rest applies immediately.
        let record = &manager.records(surface)[0];
        assert_eq!(record.position, Point::new(1000.0 - 304.0 - 24.0, 24.0));
    }

    #[test]
    fn test_lifetime_fade_closes_toast() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        let id = manager.add(
            surface,
            PARENT,
            toast(40.0).lifetime(Duration::from_millis(1000)),
            t0,
        );

        // Deadline reached: the fade starts but nothing closes yet.
        assert!(manager.tick(t0 + Duration::from_millis(1000)).is_empty());
        let record = &manager.records(surface)[0];
        assert!(record.is_fading());

        // Fade runs for lifetime minus half a second.
        let mid = record.opacity(t0 + Duration::from_millis(1250));
        assert!((mid - 0.5).abs() < 1e-9);

        let closed = manager.tick(t0 + Duration::from_millis(1600));
        assert_eq!(closed, vec![(surface, id)]);
        assert_eq!(manager.toast_count(surface), 0);
    }

    #[test]
    fn test_sticky_toast_never_fades() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        manager.add(surface, PARENT, toast(40.0).sticky(), t0);

        let closed = manager.tick(t0 + Duration::from_secs(3600));

        assert!(closed.is_empty());
        let record = &manager.records(surface)[0];
        assert_eq!(record.opacity(t0 + Duration::from_secs(3600)), 1.0);
    }

    #[test]
    fn test_short_lifetime_fades_immediately() {
        let mut manager = NotificationManager::new(Anchor::TopRight);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        let id = manager.add(
            surface,
            PARENT,
            toast(40.0).lifetime(Duration::from_millis(300)),
            t0,
        );

        // Lifetime under the fade reduction leaves a zero-length fade.
        let closed = manager.tick(t0 + Duration::from_millis(300));
        assert_eq!(closed, vec![(surface, id)]);
    }

    #[test]
    fn test_center_toasts_overlap() {
        let mut manager = NotificationManager::new(Anchor::CenterCenter);
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        manager.add(surface, PARENT, toast(40.0), t0);
        manager.add(surface, PARENT, toast(40.0), t0);
        settle(&mut manager, t0);

        let records = manager.records(surface);
        assert_eq!(records[0].position, records[1].position);
    }

    #[test]
    fn test_registry_make_unknown_fails_closed() {
        let mut registry = ToastRegistry::new();

        let err = registry.make("diagonal").unwrap_err();

        assert!(matches!(err, ToastError::InvalidAnchor(_)));
        assert_eq!(
            err.to_string(),
            "`diagonal` is not a recognized anchor position"
        );
        assert_eq!(registry.managers().count(), 0);
    }

    #[test]
    fn test_registry_reuses_managers() {
        let mut registry = ToastRegistry::new();

        registry.make("top-right").unwrap();
        registry.make("top-right").unwrap();
        let anchor = registry.make("top-right").unwrap().anchor();

        assert_eq!(anchor, Anchor::TopRight);
        assert_eq!(registry.managers().count(), 1);
    }

    #[test]
    fn test_registry_resize_reaches_every_manager() {
        let mut registry = ToastRegistry::new();
        let surface = Uuid::new_v4();
        let t0 = Instant::now();
        let top = registry.make("top-right").unwrap();
        let id = top.add(surface, PARENT, toast(40.0), t0);
        registry.manager(Anchor::BottomLeft).add(surface, PARENT, toast(40.0), t0);

        registry.parent_resized(surface, Size::new(400.0, 300.0));

        let top = registry.get(Anchor::TopRight).unwrap();
        assert_eq!(
            top.modal_position(surface, id, None),
            Some(Point::new(400.0 - 304.0 - 24.0, 24.0))
        );
        let bottom = registry.get(Anchor::BottomLeft).unwrap();
        assert_eq!(bottom.records(surface)[0].position.y, 300.0 - 40.0 - 24.0);
    }
}
