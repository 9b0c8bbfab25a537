//! JSON event scripts replayed against a headless engine.
//!
//! A script is a JSON array of steps tagged by `"event"`:
//!
//! ```json
//! [
//!   { "event": "tool", "tool": "rectangle" },
//!   { "event": "fill_color", "color": "Andes Sky" },
//!   { "event": "pointer_down", "x": 10, "y": 10 },
//!   { "event": "pointer_move", "x": 60, "y": 40 },
//!   { "event": "pointer_up", "x": 60, "y": 40 },
//!   { "event": "resize", "width": 1024, "height": 768 }
//! ]
//! ```
//!
//! Colors and widths are validated when the script is loaded.

use anyhow::Result;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::runtime::Handle;

use crate::app::Host;
use crate::config::Config;
use crate::draw::{DrawingSurface, FillColor, NamedColor, StrokeWidth, StrokeWidthError};
use crate::input::{DrawEngine, EngineEvent, Handled, Key, Modifiers, Tool};
use crate::resize::ViewportNotifier;
use crate::util::{self, Point, ScreenRect, Viewport};

/// Script loading and validation errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Step {step}: unknown stroke color '{color}'")]
    UnknownColor { step: usize, color: String },

    #[error("Step {step}: unknown fill color '{color}'")]
    UnknownFill { step: usize, color: String },

    #[error("Step {step}: {source}")]
    InvalidWidth {
        step: usize,
        #[source]
        source: StrokeWidthError,
    },
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Allocates surfaces; the display fields place them on screen
    SurfaceReady {
        width: u32,
        height: u32,
        #[serde(default)]
        left: Option<f64>,
        #[serde(default)]
        top: Option<f64>,
        #[serde(default)]
        display_width: Option<f64>,
        #[serde(default)]
        display_height: Option<f64>,
    },
    SurfaceUnavailable {
        reason: String,
    },
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    PointerLeave {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    Tool {
        tool: Tool,
    },
    StrokeColor {
        color: String,
    },
    FillColor {
        color: String,
    },
    StrokeWidth {
        width: u32,
    },
    ToggleVisibility,
    Undo,
    Resize {
        width: u32,
        height: u32,
    },
}

impl ScriptStep {
    /// Step name as written in scripts.
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::SurfaceReady { .. } => "surface_ready",
            ScriptStep::SurfaceUnavailable { .. } => "surface_unavailable",
            ScriptStep::PointerDown { .. } => "pointer_down",
            ScriptStep::PointerMove { .. } => "pointer_move",
            ScriptStep::PointerUp { .. } => "pointer_up",
            ScriptStep::PointerLeave { .. } => "pointer_leave",
            ScriptStep::Key { .. } => "key",
            ScriptStep::Tool { .. } => "tool",
            ScriptStep::StrokeColor { .. } => "stroke_color",
            ScriptStep::FillColor { .. } => "fill_color",
            ScriptStep::StrokeWidth { .. } => "stroke_width",
            ScriptStep::ToggleVisibility => "toggle_visibility",
            ScriptStep::Undo => "undo",
            ScriptStep::Resize { .. } => "resize",
        }
    }

    fn validate(&self, step: usize) -> Result<(), ScriptError> {
        match self {
            ScriptStep::StrokeColor { color } => resolve_stroke(step, color).map(|_| ()),
            ScriptStep::FillColor { color } => resolve_fill(step, color).map(|_| ()),
            ScriptStep::StrokeWidth { width } => resolve_width(step, *width).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Builds the engine event for this step.
    ///
    /// A `surface_ready` step whose surfaces cannot be allocated becomes a
    /// `SurfaceUnavailable` event carrying the allocation error.
    pub fn to_event(&self, step: usize) -> Result<EngineEvent, ScriptError> {
        let event = match self {
            ScriptStep::SurfaceReady {
                width,
                height,
                left,
                top,
                display_width,
                display_height,
            } => {
                let bounds = ScreenRect::new(
                    left.unwrap_or(0.0),
                    top.unwrap_or(0.0),
                    display_width.unwrap_or(*width as f64),
                    display_height.unwrap_or(*height as f64),
                );
                surface_event(Viewport::new(*width, *height), bounds)
            }
            ScriptStep::SurfaceUnavailable { reason } => {
                EngineEvent::SurfaceUnavailable(reason.clone())
            }
            ScriptStep::PointerDown { x, y } => EngineEvent::PointerDown(Point::new(*x, *y)),
            ScriptStep::PointerMove { x, y } => EngineEvent::PointerMove(Point::new(*x, *y)),
            ScriptStep::PointerUp { x, y } => EngineEvent::PointerUp(Point::new(*x, *y)),
            ScriptStep::PointerLeave { x, y } => EngineEvent::PointerLeave(Point::new(*x, *y)),
            ScriptStep::Key {
                key,
                ctrl,
                shift,
                alt,
            } => EngineEvent::Key {
                key: Key::from_name(key),
                modifiers: Modifiers {
                    shift: *shift,
                    ctrl: *ctrl,
                    alt: *alt,
                },
            },
            ScriptStep::Tool { tool } => EngineEvent::ChangeTool(*tool),
            ScriptStep::StrokeColor { color } => {
                EngineEvent::ChangeStrokeColor(resolve_stroke(step, color)?)
            }
            ScriptStep::FillColor { color } => {
                EngineEvent::ChangeFillColor(resolve_fill(step, color)?)
            }
            ScriptStep::StrokeWidth { width } => {
                EngineEvent::ChangeStrokeWidth(resolve_width(step, *width)?)
            }
            ScriptStep::ToggleVisibility => EngineEvent::ToggleVisibility,
            ScriptStep::Undo => EngineEvent::Undo,
            ScriptStep::Resize { width, height } => {
                EngineEvent::Resize(Viewport::new(*width, *height))
            }
        };
        Ok(event)
    }
}

fn resolve_stroke(step: usize, color: &str) -> Result<NamedColor, ScriptError> {
    util::name_to_color(color).ok_or_else(|| ScriptError::UnknownColor {
        step,
        color: color.to_string(),
    })
}

fn resolve_fill(step: usize, color: &str) -> Result<FillColor, ScriptError> {
    util::name_to_fill(color).ok_or_else(|| ScriptError::UnknownFill {
        step,
        color: color.to_string(),
    })
}

fn resolve_width(step: usize, width: u32) -> Result<StrokeWidth, ScriptError> {
    StrokeWidth::new(width).map_err(|source| ScriptError::InvalidWidth { step, source })
}

/// Allocates a surface pair for `viewport`, or reports why it could not.
pub fn surface_event(viewport: Viewport, bounds: ScreenRect) -> EngineEvent {
    match DrawingSurface::try_from(viewport) {
        Ok(mut surface) => {
            surface.set_bounds(bounds);
            EngineEvent::SurfaceReady(surface)
        }
        Err(err) => EngineEvent::SurfaceUnavailable(err.to_string()),
    }
}

/// A validated list of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    /// Reads and validates a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Parses and validates a script. Step numbers in errors are 1-based.
    pub fn from_json(source: &str) -> Result<Self, ScriptError> {
        let steps: Vec<ScriptStep> = serde_json::from_str(source)?;
        for (index, step) in steps.iter().enumerate() {
            step.validate(index + 1)?;
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Whether the script acquires its own surfaces before anything else.
    pub fn starts_with_surface(&self) -> bool {
        matches!(
            self.steps.first(),
            Some(ScriptStep::SurfaceReady { .. } | ScriptStep::SurfaceUnavailable { .. })
        )
    }
}

/// Counts of how the engine handled each replayed event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub transitioned: usize,
    pub applied: usize,
    pub ignored: usize,
}

impl ReplayStats {
    fn record(&mut self, handled: Handled) {
        match handled {
            Handled::Transitioned => self.transitioned += 1,
            Handled::Applied => self.applied += 1,
            Handled::Ignored => self.ignored += 1,
        }
    }
}

/// Final engine plus per-event statistics.
pub struct ReplayOutcome {
    pub engine: DrawEngine,
    pub stats: ReplayStats,
}

/// Replays `script` on a fresh engine configured from `config`.
///
/// When the script does not begin by acquiring surfaces, surfaces of
/// `viewport` are provided first. `resize` steps go through the viewport
/// notifier and the resize watcher while the engine is running.
///
/// # Errors
/// Fails on invalid keybindings, on a terminal engine error, or when a
/// forwarded resize never arrives.
pub async fn run(script: &Script, config: &Config, viewport: Viewport) -> Result<ReplayOutcome> {
    let engine = DrawEngine::new(config.engine_settings(), config.action_map()?);
    let mut host = Host::new(engine, ViewportNotifier::default(), Handle::current());
    let mut stats = ReplayStats::default();

    if !script.starts_with_surface() {
        debug!(
            "Script has no surface step, allocating {}x{}",
            viewport.width, viewport.height
        );
        let handled = host.dispatch(surface_event(viewport, ScreenRect::from_viewport(viewport)))?;
        stats.record(handled);
    }

    for (index, step) in script.steps().iter().enumerate() {
        let number = index + 1;
        let handled = match step {
            ScriptStep::Resize { width, height } if host.is_watching() => {
                host.publish_resize(Viewport::new(*width, *height)).await?
            }
            _ => {
                let event = step.to_event(number)?;
                host.dispatch(event).map_err(|err| {
                    anyhow::Error::new(err)
                        .context(format!("Step {} ({}) failed", number, step.name()))
                })?
            }
        };
        debug!("Step {} ({}): {:?}", number, step.name(), handled);
        stats.record(handled);
    }

    let engine = host.shutdown().await;
    info!(
        "Replayed {} step(s): {} transition(s), {} applied, {} ignored",
        script.steps().len(),
        stats.transitioned,
        stats.applied,
        stats.ignored
    );
    Ok(ReplayOutcome { engine, stats })
}
