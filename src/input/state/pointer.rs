use crate::draw::{Layer, Shape};
use crate::util::Point;
use log::warn;

use super::{DrawEngine, Handled, InteractionState};

impl DrawEngine {
    /// Processes a pointer press.
    ///
    /// Only starts a gesture from `idle`: the mapped position becomes the
    /// anchor and the current tool selects the gesture state.
    pub(super) fn on_pointer_down(&mut self, position: Point) -> Handled {
        if self.interaction() != Some(InteractionState::Idle) {
            return Handled::Ignored;
        }
        let Some(point) = self.map_pointer(position) else {
            return Handled::Ignored;
        };

        self.context.anchor = Some(point);
        self.set_interaction(InteractionState::for_tool(self.context.tool));
        Handled::Transitioned
    }

    /// Processes pointer motion.
    ///
    /// - Line: commits a segment from the anchor and moves the anchor along
    /// - Rect/Circle/Ellipse: redraws the candidate shape on the preview only
    pub(super) fn on_pointer_move(&mut self, position: Point) -> Handled {
        let Some(interaction) = self.interaction() else {
            return Handled::Ignored;
        };
        let Some(tool) = interaction.tool() else {
            return Handled::Ignored;
        };
        let (Some(anchor), Some(point)) = (self.context.anchor, self.map_pointer(position)) else {
            return Handled::Ignored;
        };
        let Some(surface) = self.context.surface.as_ref() else {
            return Handled::Ignored;
        };
        let style = self.context.style();

        if interaction == InteractionState::Line {
            if let Err(err) = surface.draw_line(anchor, point, &style, Layer::Committed) {
                warn!("Failed to draw line segment: {}", err);
            }
            self.context.anchor = Some(point);
        } else {
            if let Err(err) = surface.clear_preview() {
                warn!("Failed to clear preview surface: {}", err);
            }
            let shape = Shape::for_tool(tool, anchor, point);
            if let Err(err) = surface.draw_shape(&shape, &style, Layer::Preview) {
                warn!("Failed to draw {} preview: {}", tool.label(), err);
            }
        }

        self.needs_redraw = true;
        Handled::Applied
    }

    /// Processes a pointer release.
    ///
    /// Shape gestures commit the final shape at the release position; the
    /// line gesture has already committed its segments. Both return to idle.
    pub(super) fn on_pointer_up(&mut self, position: Point) -> Handled {
        let Some(interaction) = self.interaction() else {
            return Handled::Ignored;
        };
        let Some(tool) = interaction.tool() else {
            return Handled::Ignored;
        };

        if interaction != InteractionState::Line {
            if let (Some(anchor), Some(point), Some(surface)) = (
                self.context.anchor,
                self.map_pointer(position),
                self.context.surface.as_ref(),
            ) {
                let shape = Shape::for_tool(tool, anchor, point);
                let style = self.context.style();
                if let Err(err) = surface.draw_shape(&shape, &style, Layer::Committed) {
                    warn!("Failed to commit {}: {}", tool.label(), err);
                }
            }
        }

        self.enter_idle();
        Handled::Transitioned
    }

    /// Pointer left the surface: ends the gesture without committing anything new.
    pub(super) fn on_pointer_leave(&mut self) -> Handled {
        match self.interaction() {
            Some(interaction) if !interaction.is_idle() => {
                self.enter_idle();
                Handled::Transitioned
            }
            _ => Handled::Ignored,
        }
    }
}
