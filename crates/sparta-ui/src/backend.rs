//! The contract every windowing backend implements.
//!
//! A [`Backend`] creates one [`BackendWindow`] per widget and turns native
//! notifications into [`NativeEvent`]s addressed to widgets. Everything
//! else (dispatch, property caching, the drawable guard, close cascades)
//! lives in the toolkit, so a backend stays a thin translation layer.

use std::sync::Arc;
use std::time::Duration;

use sparta_core::{Point, Rect, Rgba};

use crate::event::{KeyEvent, MouseEvent};
use crate::widget::{WidgetId, WidgetKind};

/// Character cell size in pixels, used by widgets for text layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Units {
    pub width: i32,
    pub height: i32,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            width: 6,
            height: 15,
        }
    }
}

/// Which of the two drawing colors a [`Drawable::set_color`] call changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Foreground,
    Background,
}

/// Window attributes the toolkit forwards when a widget property changes.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowProperty {
    /// Only honored for root windows.
    Caption(String),
    Geometry(Rect),
    Foreground(Rgba),
    Background(Rgba),
}

/// Everything a backend needs to allocate the window of a new widget.
#[derive(Debug, Clone)]
pub struct WindowRequest {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub parent: Option<WidgetId>,
    pub name: String,
    pub caption: String,
    /// Parent-relative for children, screen coordinates for roots.
    pub geometry: Rect,
    pub foreground: Rgba,
    pub background: Rgba,
}

/// Native notifications, already normalized and addressed.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// The window manager asked a root window to close.
    Close { target: WidgetId },
    Configure { target: WidgetId, rect: Rect },
    Expose { target: WidgetId, rect: Rect },
    Key { target: WidgetId, event: KeyEvent },
    Mouse { target: WidgetId, event: MouseEvent },
    /// The loop was woken by [`Backend::waker`]; carries no payload.
    Wake,
}

/// Interrupts a blocked [`Backend::wait_events`] from any thread.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Errors raised by backends.
#[derive(Debug, Clone)]
pub enum BackendError {
    /// The display connection or graphics device could not be opened.
    Init(String),
    /// A native window could not be created.
    Window(String),
    /// The presentation surface failed.
    Surface(String),
    /// The native event loop failed.
    EventLoop(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Init(msg) => write!(f, "Failed to initialize backend: {}", msg),
            BackendError::Window(msg) => write!(f, "Failed to create window: {}", msg),
            BackendError::Surface(msg) => write!(f, "Surface error: {}", msg),
            BackendError::EventLoop(msg) => write!(f, "Event loop error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Immediate-mode drawing. Coordinates are local to the widget.
///
/// The toolkit only forwards these calls while the window is drawable
/// (inside an expose, or between `draw(true)` and `draw(false)`).
pub trait Drawable {
    /// Changes a drawing color until the next expose resets it.
    fn set_color(&mut self, role: ColorRole, color: Rgba);

    /// Draws one line of text with the top-left of its first cell at `pos`.
    fn text(&mut self, pos: Point, text: &str);

    fn rectangle(&mut self, rect: Rect, fill: bool);

    /// Connected line segments through `points`.
    fn lines(&mut self, points: &[Point]);

    /// Elliptical arc inscribed in `rect`, starting at `angle1` and spanning
    /// `angle2`, both in radians counter-clockwise from three o'clock.
    /// Filled arcs are pie slices.
    fn arc(&mut self, rect: Rect, angle1: f64, angle2: f64, fill: bool);

    fn polygon(&mut self, points: &[Point], fill: bool);

    fn pixel(&mut self, pos: Point);
}

/// The native half of a widget.
pub trait BackendWindow: Drawable {
    /// Clears `rect` with the background and resets the drawing colors.
    fn begin_expose(&mut self, rect: Rect);

    fn end_expose(&mut self);

    /// Begins (`true`) or ends (`false`) a drawing session outside expose.
    fn draw(&mut self, begin: bool);

    /// Releases native resources. Called once, after the children's windows.
    fn close(&mut self);

    /// Applies a changed attribute. For geometry, returns the rectangle the
    /// backend actually applied when it does so synchronously; `None` means
    /// a [`NativeEvent::Configure`] will follow.
    fn set_property(&mut self, property: WindowProperty) -> Option<Rect>;

    /// Schedules an expose of the whole window. Pending updates coalesce.
    fn update(&mut self);

    fn focus(&mut self);
}

/// A windowing system.
pub trait Backend {
    fn name(&self) -> &str;

    /// Character cell size, read once when the `Ui` is built.
    fn units(&self) -> Units;

    fn new_window(
        &mut self,
        request: WindowRequest,
    ) -> Result<Box<dyn BackendWindow>, BackendError>;

    /// Blocks until native events arrive, the waker fires, or `timeout`
    /// elapses, then appends the normalized events to `out`.
    /// `Some(Duration::ZERO)` polls.
    fn wait_events(
        &mut self,
        out: &mut Vec<NativeEvent>,
        timeout: Option<Duration>,
    ) -> Result<(), BackendError>;

    fn waker(&self) -> Waker;

    /// Called once when the application terminates.
    fn quit(&mut self);
}
