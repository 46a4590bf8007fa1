// Library surface for headless/integration tests and reuse.
// Terminal setup, the App and rendering live in the binary.
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod countdown;
pub mod error;
pub mod game;
pub mod input;
pub mod keyboard;
pub mod language;
pub mod logging;
pub mod reducer;
pub mod runtime;
pub mod session;
pub mod status;
