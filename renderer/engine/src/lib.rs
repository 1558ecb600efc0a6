#[cfg(feature = "use-sdl")]
mod render;

#[cfg(feature = "use-sdl")]
pub use render::sdl::{SdlBackend, SdlBackendError};

mod lite;
pub use lite::{DummyRenderer, HeadlessBackend};

mod engine;
pub use crate::engine::Engine;
