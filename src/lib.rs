//! Shape Board Engine Library
//!
//! The engine behind a drag-and-drop polyomino toy: pieces with quarter-turn
//! rotation, a square board they are projected onto, and fixed challenges
//! whose target silhouette must be reproduced exactly.
//!
//! Hosts hold an [`EngineState`], send it [`Command`]s and read pieces,
//! board and challenge status back.

pub mod challenge;
pub mod config;
pub mod engine;
pub mod grid;
pub mod pattern;
pub mod pieces;
pub mod registry;
pub mod script;

pub use config::Config;
pub use engine::{Command, EngineError, EngineState};
