//! Snake on a wrap-around grid.
//!
//! The snake turns where the player pressed a key and every following
//! segment turns at that same cell, so the body traces the head's path.

pub mod error;
pub mod game;
pub mod grid;
pub mod shell;
pub mod snake;
pub mod spawner;
pub mod terminal;
