pub mod board;
pub mod error;
pub mod game;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod rules;
pub mod service;
pub mod square;
pub mod store;
pub mod wire;
