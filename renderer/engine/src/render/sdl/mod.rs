pub use backend::{SdlBackend, SdlBackendError};
pub use canvas::CanvasRenderer;

mod backend;
mod canvas;
mod text;
