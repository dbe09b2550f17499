pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod prep;
pub mod terminal;
