pub mod app;
pub mod globals;
pub mod wasm_api;

pub use app::App;
pub use globals::{Globals, globals, init_globals};
