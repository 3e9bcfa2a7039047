pub mod controller;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod viewport;

pub use controller::{Action, Controller, FilenameEdit};
pub use input::{InputEvent, Modifiers, PointerButton};
pub use session::{Session, SessionError};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use viewport::Viewport;
