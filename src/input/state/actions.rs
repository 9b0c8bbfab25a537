use crate::config::Action;
use crate::draw::{FillColor, NamedColor, StrokeWidth, surface::to_dimension};
use crate::input::{events::Key, modifiers::Modifiers, tool::Tool};
use crate::util::{ScreenRect, Viewport};
use log::{debug, info, warn};

use super::{DrawEngine, Handled, InteractionState};

impl DrawEngine {
    /// Processes a key press through the keybinding map.
    ///
    /// Unbound keys are ignored.
    pub(super) fn on_key(&mut self, key: Key, modifiers: Modifiers) -> Handled {
        match self.find_action(key, modifiers) {
            Some(action) => self.handle_action(action),
            None => Handled::Ignored,
        }
    }

    /// Runs a keybinding action.
    pub(super) fn handle_action(&mut self, action: Action) -> Handled {
        match action {
            Action::Undo => self.undo(),
            Action::ToggleVisibility => self.toggle_visibility(),
        }
    }

    fn is_idle(&self) -> bool {
        self.interaction() == Some(InteractionState::Idle)
    }

    /// Pops the newest snapshot and restores the committed surface from the one beneath.
    ///
    /// Only runs in `idle` and only when more than one snapshot exists.
    pub(super) fn undo(&mut self) -> Handled {
        if !self.is_idle() {
            return Handled::Ignored;
        }
        if !self.context.history.can_undo() {
            debug!("Nothing to undo ({} snapshot)", self.context.history.len());
            return Handled::Ignored;
        }

        self.context.history.pop();
        if let (Some(surface), Some(top)) = (
            self.context.surface.as_ref(),
            self.context.history.top(),
        ) {
            if let Err(err) = surface.restore(top) {
                warn!("Failed to restore snapshot on undo: {}", err);
            }
        }

        self.needs_redraw = true;
        debug!("Undo, {} snapshot(s) left", self.context.history.len());
        Handled::Applied
    }

    /// Flips the visibility region. Works in every interaction state.
    pub(super) fn toggle_visibility(&mut self) -> Handled {
        let Some(visibility) = self.visibility() else {
            return Handled::Ignored;
        };
        let next = visibility.toggled();
        self.set_visibility(next);
        self.needs_redraw = true;
        info!("Drawing {:?}", next);
        Handled::Transitioned
    }

    pub(super) fn change_tool(&mut self, tool: Tool) -> Handled {
        if !self.is_idle() {
            return Handled::Ignored;
        }
        self.context.tool = tool;
        debug!("Tool set to {}", tool.label());
        Handled::Applied
    }

    pub(super) fn change_stroke_color(&mut self, color: NamedColor) -> Handled {
        if !self.is_idle() {
            return Handled::Ignored;
        }
        self.context.stroke_color = color;
        debug!("Stroke color set to {} ({})", color.name, color.hex);
        Handled::Applied
    }

    pub(super) fn change_fill_color(&mut self, fill: FillColor) -> Handled {
        if !self.is_idle() {
            return Handled::Ignored;
        }
        self.context.fill_color = fill;
        debug!("Fill color set to {} ({})", fill.name(), fill.hex());
        Handled::Applied
    }

    pub(super) fn change_stroke_width(&mut self, width: StrokeWidth) -> Handled {
        if !self.is_idle() {
            return Handled::Ignored;
        }
        self.context.stroke_width = width;
        debug!("Stroke width set to {}px", width.get());
        Handled::Applied
    }

    /// Resizes both surfaces to the viewport and restores the latest snapshot.
    ///
    /// The interaction state is left as is; the preview stays blank until
    /// the next pointer-move repaints it.
    pub(super) fn resize(&mut self, viewport: Viewport) -> Handled {
        if viewport.is_empty() {
            warn!(
                "Ignoring resize to empty viewport {}x{}",
                viewport.width, viewport.height
            );
            return Handled::Ignored;
        }
        let Some(surface) = self.context.surface.as_mut() else {
            return Handled::Ignored;
        };

        let (width, height) = (to_dimension(viewport.width), to_dimension(viewport.height));
        if let Err(err) = surface.resize_to(width, height) {
            warn!(
                "Failed to resize surfaces to {}x{}: {}",
                viewport.width, viewport.height, err
            );
            return Handled::Ignored;
        }
        surface.set_bounds(ScreenRect::from_viewport(viewport));

        if let Some(top) = self.context.history.top() {
            if let Err(err) = surface.restore(top) {
                warn!("Failed to restore snapshot after resize: {}", err);
            }
        }

        self.needs_redraw = true;
        info!("Resized drawing to {}x{}", viewport.width, viewport.height);
        Handled::Applied
    }
}
