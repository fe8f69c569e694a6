//! Sparta Winit
//!
//! The native backend of the Sparta toolkit. Each root widget gets a winit
//! window; every other widget is a clipped region of its root's software
//! framebuffer. Text is shaped and rasterized with `cosmic-text`, finished
//! frames are uploaded to the window surface with `wgpu`.
//!
//! ```no_run
//! use sparta_core::Config;
//! use sparta_ui::{MainWindow, Ui};
//! use sparta_winit::WinitBackend;
//!
//! let config = Config::default();
//! let backend = WinitBackend::new(&config).expect("no display");
//! let mut ui = Ui::builder().config(config).build(backend);
//! MainWindow::new(&mut ui, "main", "Hello").expect("window");
//! ui.run().expect("event loop");
//! ```

mod app;
mod backend;
mod desktop;
mod gpu;
pub mod keymap;
pub mod raster;
mod text;
mod window;

pub use app::Wake;
pub use backend::WinitBackend;
pub use window::RegionWindow;
