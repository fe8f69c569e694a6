use sparta_ui::{BackendError, NativeEvent};
use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::desktop::Desktop;

/// User event sent through the event loop proxy to interrupt a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wake;

/// Handler for one pump of the event loop. Collects translated events into
/// `out`; the first native failure ends up in `error`.
pub(crate) struct Pump<'a> {
    pub desktop: &'a mut Desktop,
    pub out: &'a mut Vec<NativeEvent>,
    pub error: Option<BackendError>,
}

impl Pump<'_> {
    fn open_windows(&mut self, event_loop: &ActiveEventLoop) {
        if self.error.is_some() || !self.desktop.resumed {
            return;
        }
        if let Err(e) = self.desktop.create_pending(event_loop) {
            tracing::error!("failed to open window: {}", e);
            self.error = Some(e);
        }
    }
}

impl ApplicationHandler<Wake> for Pump<'_> {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        self.open_windows(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.desktop.resumed = true;
        self.open_windows(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.desktop.resumed = false;
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: Wake) {
        if self.out.last() != Some(&NativeEvent::Wake) {
            self.out.push(NativeEvent::Wake);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        self.desktop.translate(window_id, event, self.out);
    }
}
