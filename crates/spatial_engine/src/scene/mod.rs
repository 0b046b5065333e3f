//! Scene snapshots
//!
//! The host 3D toolkit owns the live scene. The engine only ever sees a
//! [`SceneSnapshot`]: an ordered, immutable copy of object transforms and
//! extents plus optional room bounds, rebuilt for every call.

mod object;
mod room;
mod snapshot;

pub use object::SceneObject;
pub use room::{room_shell, RoomShell};
pub use snapshot::SceneSnapshot;
