//! Event handling and the drawing state machine.
//!
//! This module turns host events (pointer, keys, palette changes, resizes)
//! into drawing on the committed and preview surfaces. It holds the current
//! tool and style and runs the `loading -> running -> error` lifecycle with
//! its visibility and interaction regions.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{EngineEvent, Key, ResizeEvent};
pub use modifiers::Modifiers;
pub use state::{
    DrawEngine, EngineContext, EngineError, EngineSettings, EngineState, Handled,
    InteractionState, RunningState, Visibility,
};
pub use tool::Tool;
