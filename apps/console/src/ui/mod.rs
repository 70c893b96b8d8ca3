//! Terminal UI: the wizard loop, per-screen rendering, and line prompts.

pub mod app;
pub mod prompt;
pub mod view;

pub use app::ConsoleApp;
