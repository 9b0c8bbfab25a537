//! Draw engine state machine and its exclusively-owned drawing context.

use crate::config::{Action, ActionMap};
use crate::draw::{
    DrawStyle, DrawingSurface, FillColor, History, NamedColor, PALETTE, StrokeWidth,
};
use crate::input::{
    events::{EngineEvent, Key},
    modifiers::Modifiers,
    tool::Tool,
};
use crate::util::{self, Point};
use log::{debug, error, info, warn};
use thiserror::Error;

/// Interaction region of the running engine.
///
/// `Idle` waits for a pointer-down; the other variants are live gestures,
/// one per tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// No gesture in progress
    Idle,
    /// Freehand polyline: each pointer-move commits a segment
    Line,
    /// Rectangle gesture previewed until pointer-up
    Rect,
    /// Circle gesture previewed until pointer-up
    Circle,
    /// Ellipse gesture previewed until pointer-up
    Ellipse,
}

impl InteractionState {
    /// Gesture state entered on pointer-down for each tool.
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Line => InteractionState::Line,
            Tool::Rectangle => InteractionState::Rect,
            Tool::Circle => InteractionState::Circle,
            Tool::Ellipse => InteractionState::Ellipse,
        }
    }

    /// The tool whose gesture this state represents, if any.
    pub fn tool(self) -> Option<Tool> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Line => Some(Tool::Line),
            InteractionState::Rect => Some(Tool::Rectangle),
            InteractionState::Circle => Some(Tool::Circle),
            InteractionState::Ellipse => Some(Tool::Ellipse),
        }
    }

    pub fn is_idle(self) -> bool {
        self == InteractionState::Idle
    }
}

/// Visibility region of the running engine. Has no effect on drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }
}

/// The two orthogonal regions of the `running` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningState {
    pub visibility: Visibility,
    pub interaction: InteractionState,
}

/// Top-level engine lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting for the host to provide drawing surfaces
    Loading,
    /// Surfaces bound; drawing events are processed
    Running(RunningState),
    /// Terminal: surfaces could not be acquired
    Error(String),
}

/// Outcome of a handled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A region or the top-level state changed
    Transitioned,
    /// An in-state action ran (draw, context change, undo, resize)
    Applied,
    /// The current state has no reaction to the event
    Ignored,
}

/// Fatal engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("engine halted after a fatal error")]
    Halted,
}

/// Initial tool and style applied when the engine starts running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub tool: Tool,
    pub stroke_color: NamedColor,
    pub fill_color: FillColor,
    pub stroke_width: StrokeWidth,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            stroke_color: PALETTE[0],
            fill_color: FillColor::NoFill,
            stroke_width: StrokeWidth::default(),
        }
    }
}

/// Mutable drawing context, owned by a single [`DrawEngine`].
#[derive(Debug)]
pub struct EngineContext {
    /// Tool used by the next pointer-down
    pub tool: Tool,
    pub stroke_color: NamedColor,
    pub fill_color: FillColor,
    pub stroke_width: StrokeWidth,
    /// Surface-local start point of the current gesture
    pub anchor: Option<Point>,
    pub(crate) surface: Option<DrawingSurface>,
    pub(crate) history: History,
}

impl EngineContext {
    fn new(settings: &EngineSettings) -> Self {
        Self {
            tool: settings.tool,
            stroke_color: settings.stroke_color,
            fill_color: settings.fill_color,
            stroke_width: settings.stroke_width,
            anchor: None,
            surface: None,
            history: History::new(),
        }
    }

    /// Style for the next primitive drawn from this context.
    pub fn style(&self) -> DrawStyle {
        DrawStyle::new(self.stroke_color, self.fill_color, self.stroke_width)
    }

    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.surface.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

/// Event-driven drawing engine.
///
/// The host feeds every [`EngineEvent`] through [`DrawEngine::handle`] in
/// arrival order. Each event runs to completion before the next one; the
/// engine owns its surfaces and history outright.
pub struct DrawEngine {
    state: EngineState,
    pub(super) context: EngineContext,
    settings: EngineSettings,
    /// Keybinding action map for key lookup
    action_map: ActionMap,
    /// Whether the host should re-present the surfaces
    pub(super) needs_redraw: bool,
}

impl DrawEngine {
    /// Creates an engine in the `loading` state.
    pub fn new(settings: EngineSettings, action_map: ActionMap) -> Self {
        Self {
            state: EngineState::Loading,
            context: EngineContext::new(&settings),
            settings,
            action_map,
            needs_redraw: false,
        }
    }

    /// Processes one event.
    ///
    /// # Errors
    /// Returns [`EngineError::SurfaceUnavailable`] when surface acquisition
    /// fails, and [`EngineError::Halted`] for every event after that.
    pub fn handle(&mut self, event: EngineEvent) -> Result<Handled, EngineError> {
        let running = match &self.state {
            EngineState::Error(_) => return Err(EngineError::Halted),
            EngineState::Loading => return self.handle_loading(event),
            EngineState::Running(running) => *running,
        };

        let name = event.name();
        let handled = match event {
            EngineEvent::SurfaceReady(_) | EngineEvent::SurfaceUnavailable(_) => Handled::Ignored,
            EngineEvent::PointerDown(position) => self.on_pointer_down(position),
            EngineEvent::PointerMove(position) => self.on_pointer_move(position),
            EngineEvent::PointerUp(position) => self.on_pointer_up(position),
            EngineEvent::PointerLeave(_) => self.on_pointer_leave(),
            EngineEvent::Key { key, modifiers } => self.on_key(key, modifiers),
            EngineEvent::ChangeTool(tool) => self.change_tool(tool),
            EngineEvent::ChangeStrokeColor(color) => self.change_stroke_color(color),
            EngineEvent::ChangeFillColor(fill) => self.change_fill_color(fill),
            EngineEvent::ChangeStrokeWidth(width) => self.change_stroke_width(width),
            EngineEvent::ToggleVisibility => self.toggle_visibility(),
            EngineEvent::Undo => self.undo(),
            EngineEvent::Resize(viewport) => self.resize(viewport),
        };

        if handled == Handled::Ignored {
            debug!("Ignoring {} in {:?}", name, running.interaction);
        }
        Ok(handled)
    }

    fn handle_loading(&mut self, event: EngineEvent) -> Result<Handled, EngineError> {
        match event {
            EngineEvent::SurfaceReady(surface) => {
                self.start(surface);
                Ok(Handled::Transitioned)
            }
            EngineEvent::SurfaceUnavailable(reason) => {
                error!("Drawing surface unavailable: {}", reason);
                self.state = EngineState::Error(reason.clone());
                Err(EngineError::SurfaceUnavailable(reason))
            }
            other => {
                debug!("Ignoring {} while loading", other.name());
                Ok(Handled::Ignored)
            }
        }
    }

    /// `loading -> running`: binds the surface, resets the style, enters idle.
    fn start(&mut self, surface: DrawingSurface) {
        info!(
            "Drawing surface ready ({}x{})",
            surface.width(),
            surface.height()
        );
        self.context.surface = Some(surface);
        self.context.stroke_color = self.settings.stroke_color;
        self.context.fill_color = self.settings.fill_color;
        self.context.stroke_width = self.settings.stroke_width;
        self.state = EngineState::Running(RunningState {
            visibility: Visibility::Visible,
            interaction: InteractionState::Idle,
        });
        self.enter_idle();
    }

    /// Enters `idle`: snapshot the committed surface, then clear the preview.
    pub(super) fn enter_idle(&mut self) {
        self.context.anchor = None;
        self.set_interaction(InteractionState::Idle);

        let Some(surface) = self.context.surface.as_ref() else {
            return;
        };

        match surface.snapshot() {
            Ok(snapshot) => self.context.history.push(snapshot),
            Err(err) => warn!("Failed to capture snapshot: {}", err),
        }
        if let Err(err) = surface.clear_preview() {
            warn!("Failed to clear preview surface: {}", err);
        }
        self.needs_redraw = true;
    }

    pub(super) fn set_interaction(&mut self, interaction: InteractionState) {
        if let EngineState::Running(running) = &mut self.state {
            if running.interaction != interaction {
                debug!("Interaction {:?} -> {:?}", running.interaction, interaction);
            }
            running.interaction = interaction;
        }
    }

    pub(super) fn set_visibility(&mut self, visibility: Visibility) {
        if let EngineState::Running(running) = &mut self.state {
            running.visibility = visibility;
        }
    }

    /// Maps a device-space pointer position onto the bound surface.
    pub(super) fn map_pointer(&self, position: Point) -> Option<Point> {
        self.context
            .surface
            .as_ref()
            .map(|surface| util::to_surface_coords(position, &surface.geometry()))
    }

    /// Look up an action for the given key and modifiers.
    pub(super) fn find_action(&self, key: Key, modifiers: Modifiers) -> Option<Action> {
        let key_str = key.binding_name()?;
        for (binding, action) in &self.action_map {
            if binding.matches(&key_str, modifiers.ctrl, modifiers.shift, modifiers.alt) {
                return Some(*action);
            }
        }
        None
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Current interaction region, or `None` outside `running`.
    pub fn interaction(&self) -> Option<InteractionState> {
        match self.state {
            EngineState::Running(running) => Some(running.interaction),
            _ => None,
        }
    }

    /// Current visibility region, or `None` outside `running`.
    pub fn visibility(&self) -> Option<Visibility> {
        match self.state {
            EngineState::Running(running) => Some(running.visibility),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, EngineState::Running(_))
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, EngineState::Error(_))
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.context.surface.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.context.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.context.history.can_undo()
    }

    /// Returns and clears the redraw flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
