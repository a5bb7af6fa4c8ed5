pub mod session;
pub mod world;

// Re-export the workspace crates under one roof
pub use webmap_common as common;
pub use webmap_logger as logger;
pub use webmap_render as render;
pub use webmap_server as server;
pub use webmap_upload as upload;

pub use logger::{log, LogSeverity};
pub use server::{Config, Credentials, WebMap};
