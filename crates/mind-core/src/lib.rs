pub mod config;
pub mod graph;
pub mod id;
pub mod layout;
pub mod model;
pub mod mutation;
pub mod persist;

pub use config::{ConfigError, EditorConfig, ZoomConfig};
pub use graph::{LinkToggle, MindMap, NodeList};
pub use id::NodeId;
pub use layout::{FixedMetrics, TextMeasure, WrappedLine, WrappedText};
pub use model::*;
pub use mutation::MapMutation;
pub use persist::PersistError;
