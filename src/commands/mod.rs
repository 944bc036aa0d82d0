//! Commands return result structs instead of printing directly; main.rs
//! formats them as human-readable text or JSON based on --json.

mod deploy;
mod init;

pub use deploy::*;
pub use init::*;
