mod builder;
mod controller;
mod state;

pub use builder::CameraSurfaceEngineBuilder;
pub use controller::CameraSurfaceEngine;
pub use state::LifecycleState;
