//! # Spatial Drag Controller
//!
//! Pointer state machine for thumbnail drags.
//!
//! ```text
//!             press                 travel >= threshold
//!   Idle ─────────────▶ Pressed ───────────────────────▶ Dragging ──┐
//!    ▲                    │   │                              │  move │
//!    │     release        │   │ ctrl at press                ◀───────┘
//!    ├────(Click)─────────┘   ▼                              │
//!    │                    Exporting ─── release ──▶ Idle     │
//!    └────────────── release (Drop) ────────────────────────┘
//! ```
//!
//! The controller only tracks gesture state and emits effects. It never
//! touches the store: a release hands back a [`Release`] outcome and the
//! session commits the move, applies the click or finishes the export.

use crate::config::EditorConfig;
use crate::effects::{DragPreview, Effect, EffectQueue, HighlightRole};
use crate::geometry::{resolve_drop, InsertionIndicator, PageLayout, Point};
use crate::selection::{Modifiers, Selection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pointer event normalized at the host boundary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.shift,
            ctrl: self.ctrl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    pub index: usize,
    pub origin: Point,
    /// Ctrl was held at press time on a non-empty document
    pub external: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub start_index: usize,
    pub target_index: Option<usize>,
    /// Insertion slot; starts at the source page's own slot
    pub drop_index: usize,
    pub insert_after: bool,
    pub indicator: Option<InsertionIndicator>,
    pub preview: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Pressed(Press),
    Dragging(DragSession),
    Exporting {
        index: usize,
        payload: Option<String>,
    },
}

/// What a pointer move asks of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    None,
    /// External drag promoted: export the selection for the window system
    BeginExternal { index: usize },
}

/// Outcome of a pointer release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Nothing,
    /// Released before the drag threshold
    Click { index: usize, modifiers: Modifiers },
    /// Move the selection to this insertion slot
    Drop { index: usize },
    ExternalFinished,
}

#[derive(Debug, Clone)]
pub struct DragController {
    threshold_sq: f64,
    ghost_offset: Point,
    external_alpha: f64,
    indicator_gap: f64,
    phase: DragPhase,
}

impl DragController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            threshold_sq: config.drag_threshold_sq,
            ghost_offset: config.ghost_offset,
            external_alpha: config.external_ghost_alpha,
            indicator_gap: config.indicator_gap,
            phase: DragPhase::Idle,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// A press is being tracked (dragging or not)
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    /// The pointer has crossed the threshold and a drag is in flight
    pub fn is_dragging(&self) -> bool {
        matches!(
            self.phase,
            DragPhase::Dragging(_) | DragPhase::Exporting { .. }
        )
    }

    /// Record a press on page `index`. Nothing happens yet.
    pub fn press(&mut self, index: usize, event: PointerEvent, page_count: usize) -> bool {
        if index >= page_count {
            self.phase = DragPhase::Idle;
            return false;
        }

        self.phase = DragPhase::Pressed(Press {
            index,
            origin: event.position(),
            external: event.ctrl,
        });
        true
    }

    pub fn on_move<L: PageLayout + ?Sized>(
        &mut self,
        event: PointerEvent,
        layout: &L,
        selection: &mut Selection,
        effects: &mut EffectQueue,
    ) -> DragStep {
        let pointer = event.position();

        match self.phase {
            DragPhase::Idle => DragStep::None,

            DragPhase::Exporting { .. } => {
                effects.push(Effect::PreviewMoved(pointer.offset(self.ghost_offset)));
                DragStep::None
            }

            DragPhase::Pressed(press) => {
                if pointer.distance_sq(press.origin) < self.threshold_sq {
                    return DragStep::None;
                }

                // Indices may have shifted since the press
                if press.index >= layout.page_count() {
                    debug!("Press index {} no longer valid", press.index);
                    self.phase = DragPhase::Idle;
                    return DragStep::None;
                }

                if press.external {
                    self.promote_external(press, pointer, selection, effects)
                } else {
                    self.promote(press, pointer, selection, effects);
                    self.track(pointer, layout, effects);
                    DragStep::None
                }
            }

            DragPhase::Dragging(_) => {
                self.track(pointer, layout, effects);
                DragStep::None
            }
        }
    }

    fn promote(
        &mut self,
        press: Press,
        pointer: Point,
        selection: &mut Selection,
        effects: &mut EffectQueue,
    ) {
        if selection.insert(press.index) {
            effects.push(Effect::SelectionChanged);
        }

        effects.push(Effect::Highlight {
            index: press.index,
            role: HighlightRole::Source,
            on: true,
        });

        let preview = pointer.offset(self.ghost_offset);
        effects.push(Effect::PreviewShown(DragPreview {
            index: press.index,
            position: preview,
            alpha: 1.0,
        }));

        debug!("Drag started from page {}", press.index);
        self.phase = DragPhase::Dragging(DragSession {
            start_index: press.index,
            target_index: Some(press.index),
            drop_index: press.index,
            insert_after: false,
            indicator: None,
            preview,
        });
    }

    fn promote_external(
        &mut self,
        press: Press,
        pointer: Point,
        selection: &mut Selection,
        effects: &mut EffectQueue,
    ) -> DragStep {
        let seeded = if selection.is_empty() {
            selection.apply_click(press.index, Modifiers::NONE)
        } else {
            selection.insert(press.index)
        };
        if seeded {
            effects.push(Effect::SelectionChanged);
        }

        effects.push(Effect::PreviewShown(DragPreview {
            index: press.index,
            position: pointer.offset(self.ghost_offset),
            alpha: self.external_alpha,
        }));

        debug!("External drag started from page {}", press.index);
        self.phase = DragPhase::Exporting {
            index: press.index,
            payload: None,
        };
        DragStep::BeginExternal { index: press.index }
    }

    /// Re-run hit-testing for the current pointer position
    fn track<L: PageLayout + ?Sized>(
        &mut self,
        pointer: Point,
        layout: &L,
        effects: &mut EffectQueue,
    ) {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return;
        };

        let preview = pointer.offset(self.ghost_offset);
        let Some(drop) = resolve_drop(layout, pointer) else {
            session.preview = preview;
            effects.push(Effect::PreviewMoved(preview));
            return;
        };

        if session.target_index != Some(drop.target) {
            if let Some(previous) = session.target_index {
                if previous != session.start_index {
                    effects.push(Effect::Highlight {
                        index: previous,
                        role: HighlightRole::Target,
                        on: false,
                    });
                }
            }
            if drop.target != session.start_index {
                effects.push(Effect::Highlight {
                    index: drop.target,
                    role: HighlightRole::Target,
                    on: true,
                });
            }
            session.target_index = Some(drop.target);
        }

        session.insert_after = drop.insert_after;
        session.drop_index = drop.drop_index();

        if let Some(rect) = layout.page_rect(drop.target) {
            let indicator =
                InsertionIndicator::beside(&rect, drop.insert_after, self.indicator_gap);
            if session.indicator != Some(indicator) {
                session.indicator = Some(indicator);
                effects.push(Effect::IndicatorMoved(indicator));
            }
        }

        session.preview = preview;
        effects.push(Effect::PreviewMoved(preview));
    }

    /// Attach the exported payload to the running external drag
    pub fn set_payload(&mut self, data: String) {
        if let DragPhase::Exporting { payload, .. } = &mut self.phase {
            *payload = Some(data);
        }
    }

    pub fn payload(&self) -> Option<&str> {
        match &self.phase {
            DragPhase::Exporting { payload, .. } => payload.as_deref(),
            _ => None,
        }
    }

    pub fn on_release(&mut self, event: PointerEvent, effects: &mut EffectQueue) -> Release {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => Release::Nothing,

            DragPhase::Pressed(press) => Release::Click {
                index: press.index,
                modifiers: event.modifiers(),
            },

            DragPhase::Dragging(session) => {
                Self::clear_session(&session, effects);
                Release::Drop {
                    index: session.drop_index,
                }
            }

            DragPhase::Exporting { .. } => {
                effects.push(Effect::PreviewHidden);
                Release::ExternalFinished
            }
        }
    }

    /// Abandon any gesture in progress, tearing down its visuals
    pub fn cancel(&mut self, effects: &mut EffectQueue) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(session) => Self::clear_session(&session, effects),
            DragPhase::Exporting { .. } => effects.push(Effect::PreviewHidden),
            DragPhase::Idle | DragPhase::Pressed(_) => {}
        }
    }

    fn clear_session(session: &DragSession, effects: &mut EffectQueue) {
        effects.push(Effect::Highlight {
            index: session.start_index,
            role: HighlightRole::Source,
            on: false,
        });
        if let Some(target) = session.target_index {
            if target != session.start_index {
                effects.push(Effect::Highlight {
                    index: target,
                    role: HighlightRole::Target,
                    on: false,
                });
            }
        }
        effects.push(Effect::IndicatorHidden);
        effects.push(Effect::PreviewHidden);
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
