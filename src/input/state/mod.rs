mod actions;
mod core;
mod pointer;

pub use core::{
    DrawEngine, EngineContext, EngineError, EngineSettings, EngineState, Handled,
    InteractionState, RunningState, Visibility,
};
