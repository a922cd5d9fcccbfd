mod component;
pub mod config;
pub mod connection;
pub mod error;
pub mod geometry;
pub mod grading;
pub mod history;
pub mod node;
pub mod notify;
mod render;
pub mod shortcuts;
pub mod state;
pub mod theme;
mod toast;
mod toolbar;
pub mod types;

pub use component::SequenceCanvas;
pub use config::CanvasConfig;
pub use error::{ConnectError, SubmitError};
pub use notify::{Notice, NoticeLog, Notifier};
pub use state::{CanvasFlags, PointerButton, SequenceCanvasState};
pub use types::{Connection, HistoryState, NodeData, Position, Quiz, Severity, Validity};
