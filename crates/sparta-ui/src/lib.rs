//! Sparta UI - widgets and event dispatch over a pluggable backend
//!
//! This crate holds everything of the toolkit that is not platform specific:
//! - The widget tree (a generational arena owned by [`Ui`])
//! - Event delivery with per-type handlers and modal input blocking
//! - The string-keyed property registry
//! - The five widget variants (main window, button, canvas, list, scroll)
//! - The [`Backend`] contract a windowing system implements
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sparta_ui::{Button, EventType, MainWindow, Ui};
//! use sparta_core::Rect;
//!
//! let mut ui = Ui::new(backend);
//! let window = MainWindow::new(&mut ui, "main", "Hello")?;
//! let ok = Button::new(&mut ui, window, "ok", "Ok", Rect::new(10, 10, 70, 30))?;
//!
//! ui.capture(window, EventType::Command, |ui, window, _event| {
//!     ui.close_window(window);
//!     true
//! });
//! ui.run()?;
//! ```

pub mod backend;
pub mod block;
pub mod color_cache;
pub mod error;
pub mod event;
pub mod keys;
pub mod property;
pub mod surface;
pub mod tree;
pub mod ui;
pub mod widget;
pub mod widgets;

pub use backend::{Backend, BackendError, BackendWindow, ColorRole, Drawable, NativeEvent, Units};
pub use color_cache::ColorCache;
pub use error::{PropertyError, SendError, UiError, UiResult};
pub use event::{
    CloseEvent, CommandEvent, ConfigureEvent, Event, EventType, ExposeEvent, KeyEvent, MouseEvent,
};
pub use keys::{Key, Modifiers, MouseButton};
pub use property::{Property, Value};
pub use surface::{Painter, Shape};
pub use ui::{EventSender, Ui, UiBuilder};
pub use widget::{WidgetId, WidgetKind};
pub use widgets::{Button, Canvas, List, MainWindow, Orientation, Scroll};
