// Transcode planning - option engine plus the adapters that feed it

pub mod core;
pub mod hardware;
pub mod probe;

pub use self::core::*;
