//! Sparta - a small cross-platform widget toolkit
//!
//! Sparta gives applications a handful of classic widgets driven by one
//! event loop:
//!
//! - **Widgets**: main windows, push buttons, selectable lists, scroll bars
//!   and free drawing canvases
//! - **Events**: close, command, configure, expose, key and mouse events
//!   with per-type handlers and modal input blocking
//! - **Properties**: a typed, string-named property registry shared by all
//!   widgets
//! - **Backends**: a pluggable windowing layer, with a winit/wgpu backend
//!   enabled by the `winit` feature
//!
//! # Quick Start
//!
//! ```no_run
//! use sparta::prelude::*;
//!
//! fn main() {
//!     let mut ui = sparta::init_or_exit(Config::from_env());
//!     let main = MainWindow::new(&mut ui, "main", "Hello").unwrap();
//!     let ok = Button::new(&mut ui, main, "ok", "Ok", Rect::new(10, 10, 70, 30)).unwrap();
//!     ok.set_value(&mut ui, 1);
//!
//!     ui.capture(main, EventType::Command, |ui, main, _event| {
//!         ui.close_window(main);
//!         true
//!     });
//!     ui.run().unwrap();
//! }
//! ```
//!
//! Without the `winit` feature, bring a [`Backend`] of your own and start
//! with [`init_with`].

// Re-export core types
pub use sparta_core as core;
pub use sparta_core::profiling::{ProfilingBackend, init_profiling};
pub use sparta_core::{Config, Point, Rect, Rgba};

pub use sparta_ui as ui;
pub use sparta_ui::{
    Backend, BackendError, Button, Canvas, ColorRole, CommandEvent, Event, EventSender,
    EventType, Key, KeyEvent, List, MainWindow, Modifiers, MouseButton, MouseEvent, Orientation,
    Property, PropertyError, Scroll, SendError, Shape, Ui, UiError, UiResult, Value, WidgetId,
    WidgetKind,
};

#[cfg(feature = "winit")]
pub use sparta_winit as winit;
#[cfg(feature = "winit")]
pub use sparta_winit::WinitBackend;

pub mod prelude {
    pub use sparta_core::{Config, Point, Rect, Rgba};
    pub use sparta_ui::{
        Button, Canvas, ColorRole, CommandEvent, Event, EventType, Key, List, MainWindow,
        Modifiers, MouseButton, Orientation, Property, Scroll, Shape, Ui, Value, WidgetId,
    };
}

/// Installs logging from `config` and builds a [`Ui`] over `backend`.
pub fn init_with(config: Config, backend: impl Backend + 'static) -> Ui {
    sparta_core::logging::init(&config.log_filter);
    Ui::builder().config(config).build(backend)
}

/// Installs logging and opens the winit backend.
#[cfg(feature = "winit")]
pub fn init(config: Config) -> Result<Ui, BackendError> {
    sparta_core::logging::init(&config.log_filter);
    let backend = WinitBackend::new(&config)?;
    Ok(Ui::builder().config(config).build(backend))
}

/// [`init`], logging the failure and exiting the process when no display
/// is available.
#[cfg(feature = "winit")]
pub fn init_or_exit(config: Config) -> Ui {
    match init(config) {
        Ok(ui) => ui,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
