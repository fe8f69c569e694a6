//! A recording backend for tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use sparta_core::{Point, Rect, Rgba};
use sparta_ui::backend::{
    Backend, BackendError, BackendWindow, ColorRole, Drawable, NativeEvent, Units, Waker,
    WindowProperty, WindowRequest,
};
use sparta_ui::{WidgetId, WidgetKind};

/// One call the toolkit made into the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    NewWindow {
        id: WidgetId,
        kind: WidgetKind,
        parent: Option<WidgetId>,
        name: String,
        geometry: Rect,
    },
    SetProperty {
        id: WidgetId,
        property: WindowProperty,
    },
    Close {
        id: WidgetId,
    },
    Update {
        id: WidgetId,
    },
    Focus {
        id: WidgetId,
    },
    BeginExpose {
        id: WidgetId,
        rect: Rect,
    },
    EndExpose {
        id: WidgetId,
    },
    Draw {
        id: WidgetId,
        begin: bool,
    },
    SetColor {
        id: WidgetId,
        role: ColorRole,
        color: Rgba,
    },
    Text {
        id: WidgetId,
        pos: Point,
        text: String,
    },
    Rectangle {
        id: WidgetId,
        rect: Rect,
        fill: bool,
    },
    Lines {
        id: WidgetId,
        points: Vec<Point>,
    },
    Arc {
        id: WidgetId,
        rect: Rect,
        angle1: f64,
        angle2: f64,
        fill: bool,
    },
    Polygon {
        id: WidgetId,
        points: Vec<Point>,
        fill: bool,
    },
    Pixel {
        id: WidgetId,
        pos: Point,
    },
    Quit,
}

impl BackendCall {
    /// The widget the call was made for, `None` for [`BackendCall::Quit`].
    pub fn widget(&self) -> Option<WidgetId> {
        match self {
            BackendCall::NewWindow { id, .. }
            | BackendCall::SetProperty { id, .. }
            | BackendCall::Close { id }
            | BackendCall::Update { id }
            | BackendCall::Focus { id }
            | BackendCall::BeginExpose { id, .. }
            | BackendCall::EndExpose { id }
            | BackendCall::Draw { id, .. }
            | BackendCall::SetColor { id, .. }
            | BackendCall::Text { id, .. }
            | BackendCall::Rectangle { id, .. }
            | BackendCall::Lines { id, .. }
            | BackendCall::Arc { id, .. }
            | BackendCall::Polygon { id, .. }
            | BackendCall::Pixel { id, .. } => Some(*id),
            BackendCall::Quit => None,
        }
    }
}

#[derive(Default)]
struct Inbox {
    events: VecDeque<NativeEvent>,
    woken: bool,
}

struct Shared {
    calls: Mutex<Vec<BackendCall>>,
    inbox: Mutex<Inbox>,
    arrived: Condvar,
    /// Geometry changes are confirmed synchronously when set.
    confirm_geometry: AtomicBool,
    wakes: AtomicUsize,
}

impl Shared {
    fn record(&self, call: BackendCall) {
        self.calls.lock().push(call);
    }

    fn confirms_geometry(&self) -> bool {
        self.confirm_geometry.load(Ordering::SeqCst)
    }

    fn wake(&self) {
        self.wakes.fetch_add(1, Ordering::SeqCst);
        let mut inbox = self.inbox.lock();
        inbox.woken = true;
        self.arrived.notify_all();
    }
}

/// A [`Backend`] that records calls instead of drawing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// The backend is moved into the `Ui`, so tests keep a [`MockHandle`]
/// sharing the same recording. The shared state sits behind
/// `parking_lot::Mutex` because handles and wakers cross threads.
pub struct MockBackend {
    shared: Arc<Shared>,
    units: Units,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                calls: Mutex::new(Vec::new()),
                inbox: Mutex::new(Inbox::default()),
                arrived: Condvar::new(),
                confirm_geometry: AtomicBool::new(true),
                wakes: AtomicUsize::new(0),
            }),
            units: Units::default(),
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Makes geometry changes wait for a scripted configure event instead
    /// of being confirmed synchronously.
    pub fn with_async_geometry(self) -> Self {
        self.shared.confirm_geometry.store(false, Ordering::SeqCst);
        self
    }

    pub fn handle(&self) -> MockHandle {
        MockHandle {
            shared: self.shared.clone(),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn units(&self) -> Units {
        self.units
    }

    fn new_window(
        &mut self,
        request: WindowRequest,
    ) -> Result<Box<dyn BackendWindow>, BackendError> {
        self.shared.record(BackendCall::NewWindow {
            id: request.id,
            kind: request.kind,
            parent: request.parent,
            name: request.name,
            geometry: request.geometry,
        });
        Ok(Box::new(MockWindow {
            id: request.id,
            shared: self.shared.clone(),
        }))
    }

    fn wait_events(
        &mut self,
        out: &mut Vec<NativeEvent>,
        timeout: Option<Duration>,
    ) -> Result<(), BackendError> {
        let mut inbox = self.shared.inbox.lock();
        if inbox.events.is_empty() && !inbox.woken {
            match timeout {
                Some(timeout) if timeout.is_zero() => {}
                Some(timeout) => {
                    self.shared.arrived.wait_for(&mut inbox, timeout);
                }
                None => {
                    while inbox.events.is_empty() && !inbox.woken {
                        self.shared.arrived.wait(&mut inbox);
                    }
                }
            }
        }
        if std::mem::take(&mut inbox.woken) {
            out.push(NativeEvent::Wake);
        }
        out.extend(inbox.events.drain(..));
        Ok(())
    }

    fn waker(&self) -> Waker {
        let shared = self.shared.clone();
        Arc::new(move || shared.wake())
    }

    fn quit(&mut self) {
        tracing::debug!("mock backend quit");
        self.shared.record(BackendCall::Quit);
    }
}

struct MockWindow {
    id: WidgetId,
    shared: Arc<Shared>,
}

impl Drawable for MockWindow {
    fn set_color(&mut self, role: ColorRole, color: Rgba) {
        self.shared.record(BackendCall::SetColor {
            id: self.id,
            role,
            color,
        });
    }

    fn text(&mut self, pos: Point, text: &str) {
        self.shared.record(BackendCall::Text {
            id: self.id,
            pos,
            text: text.to_string(),
        });
    }

    fn rectangle(&mut self, rect: Rect, fill: bool) {
        self.shared.record(BackendCall::Rectangle {
            id: self.id,
            rect,
            fill,
        });
    }

    fn lines(&mut self, points: &[Point]) {
        self.shared.record(BackendCall::Lines {
            id: self.id,
            points: points.to_vec(),
        });
    }

    fn arc(&mut self, rect: Rect, angle1: f64, angle2: f64, fill: bool) {
        self.shared.record(BackendCall::Arc {
            id: self.id,
            rect,
            angle1,
            angle2,
            fill,
        });
    }

    fn polygon(&mut self, points: &[Point], fill: bool) {
        self.shared.record(BackendCall::Polygon {
            id: self.id,
            points: points.to_vec(),
            fill,
        });
    }

    fn pixel(&mut self, pos: Point) {
        self.shared.record(BackendCall::Pixel { id: self.id, pos });
    }
}

impl BackendWindow for MockWindow {
    fn begin_expose(&mut self, rect: Rect) {
        self.shared.record(BackendCall::BeginExpose { id: self.id, rect });
    }

    fn end_expose(&mut self) {
        self.shared.record(BackendCall::EndExpose { id: self.id });
    }

    fn draw(&mut self, begin: bool) {
        self.shared.record(BackendCall::Draw { id: self.id, begin });
    }

    fn close(&mut self) {
        self.shared.record(BackendCall::Close { id: self.id });
    }

    fn set_property(&mut self, property: WindowProperty) -> Option<Rect> {
        let confirmed = match &property {
            WindowProperty::Geometry(rect) if self.shared.confirms_geometry() => Some(*rect),
            _ => None,
        };
        self.shared.record(BackendCall::SetProperty {
            id: self.id,
            property,
        });
        confirmed
    }

    fn update(&mut self) {
        self.shared.record(BackendCall::Update { id: self.id });
    }

    fn focus(&mut self) {
        self.shared.record(BackendCall::Focus { id: self.id });
    }
}

/// Test-side view of a [`MockBackend`]. Cheap to clone and `Send`.
#[derive(Clone)]
pub struct MockHandle {
    shared: Arc<Shared>,
}

impl MockHandle {
    /// Queues a native event for the next `wait_events` and wakes a blocked
    /// wait.
    pub fn push_event(&self, event: NativeEvent) {
        let mut inbox = self.shared.inbox.lock();
        inbox.events.push_back(event);
        self.shared.arrived.notify_all();
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.shared.calls.lock().clone()
    }

    /// Recorded calls made for one widget.
    pub fn calls_for(&self, id: impl Into<WidgetId>) -> Vec<BackendCall> {
        let id = id.into();
        self.shared
            .calls
            .lock()
            .iter()
            .filter(|c| c.widget() == Some(id))
            .cloned()
            .collect()
    }

    /// Count recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.shared.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// Widgets whose window was closed, in closing order.
    pub fn closed(&self) -> Vec<WidgetId> {
        self.shared
            .calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                BackendCall::Close { id } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.shared.calls.lock().clear();
    }

    pub fn set_confirm_geometry(&self, confirm: bool) {
        self.shared.confirm_geometry.store(confirm, Ordering::SeqCst);
    }

    /// How many times the backend's waker fired.
    pub fn wake_count(&self) -> usize {
        self.shared.wakes.load(Ordering::SeqCst)
    }
}
