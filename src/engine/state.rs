use std::fmt;

/// Surface lifecycle states.
///
/// The engine starts `Uninitialized`, enters `Created` when the surface
/// exists (whether or not hardware opened), `Active` once dimensions are
/// known and streaming was requested, and `Destroyed` when the surface goes
/// away. `Destroyed` back to `Created` is a legal re-entry: a surface can be
/// recreated, and mode selection survives the round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Created,
    Active,
    Destroyed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Created => "created",
            LifecycleState::Active => "active",
            LifecycleState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}
