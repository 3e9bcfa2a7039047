//! Mind rendering: hit testing, frame painting, and the Vello backend.
//!
//! Painting goes through the [`Canvas`] trait so the frame walk stays
//! backend-neutral; [`SceneCanvas`] records into a `vello::Scene`.

pub mod canvas;
pub mod hit;
pub mod overlay;
pub mod paint;
pub mod scene;

pub use canvas::{Canvas, RenderError};
pub use hit::hit_test;
pub use overlay::{Channel, FilenameLabel, Overlay, SliderPanel};
pub use paint::{FrameView, paint_frame};
pub use scene::SceneCanvas;
