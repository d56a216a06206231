//! Tablemark Application
//!
//! Headless driver that replays recorded editing scripts against an
//! annotation session and stores the result.

pub mod replay;
pub mod script;

pub use replay::Replay;
pub use script::{Script, ScriptError, ScriptStep};
