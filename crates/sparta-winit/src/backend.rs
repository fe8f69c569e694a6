use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sparta_core::profiling::profile_function;
use sparta_core::Config;
use sparta_ui::backend::{
    Backend, BackendError, BackendWindow, NativeEvent, Units, Waker, WindowRequest,
};
use winit::event_loop::{EventLoop, EventLoopProxy};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

use crate::app::{Pump, Wake};
use crate::desktop::{Desktop, Region};
use crate::window::RegionWindow;

/// A [`Backend`] on top of winit: root widgets become native windows, the
/// rest are software-rendered regions presented through wgpu.
pub struct WinitBackend {
    event_loop: EventLoop<Wake>,
    proxy: Arc<Mutex<EventLoopProxy<Wake>>>,
    desktop: Rc<RefCell<Desktop>>,
    units: Units,
}

impl WinitBackend {
    /// Opens the display connection and loads fonts. Windows are opened on
    /// the first call to [`Backend::wait_events`].
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        profile_function!();
        let event_loop = EventLoop::<Wake>::with_user_event()
            .build()
            .map_err(|e| BackendError::Init(e.to_string()))?;
        let proxy = Arc::new(Mutex::new(event_loop.create_proxy()));

        let desktop = Desktop::new(config);
        let units = desktop.text.units();
        tracing::info!(
            "winit backend ready, character cell {}x{}",
            units.width,
            units.height
        );

        Ok(Self {
            event_loop,
            proxy,
            desktop: Rc::new(RefCell::new(desktop)),
            units,
        })
    }
}

impl Backend for WinitBackend {
    fn name(&self) -> &str {
        "winit"
    }

    fn units(&self) -> Units {
        self.units
    }

    fn new_window(
        &mut self,
        request: WindowRequest,
    ) -> Result<Box<dyn BackendWindow>, BackendError> {
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        let pen = desktop.pixel(request.foreground);
        let paper = desktop.pixel(request.background);

        let root = match request.parent {
            Some(parent) => desktop
                .regions
                .get(&parent)
                .map(|r| r.root)
                .ok_or_else(|| BackendError::Window(format!("parent {} has no window", parent)))?,
            None => request.id,
        };
        let region = Region {
            parent: request.parent,
            root,
            geometry: request.geometry,
            caption: request.caption,
            foreground: request.foreground,
            background: request.background,
            pen,
            paper,
            children: Vec::new(),
            dirty: true,
        };
        match request.parent {
            Some(parent) => desktop.insert_child(request.id, parent, region),
            None => desktop.insert_root(request.id, region),
        }
        tracing::trace!("new {} region `{}` for {}", request.kind, request.name, request.id);

        Ok(Box::new(RegionWindow {
            id: request.id,
            desktop: self.desktop.clone(),
        }))
    }

    fn wait_events(
        &mut self,
        out: &mut Vec<NativeEvent>,
        timeout: Option<Duration>,
    ) -> Result<(), BackendError> {
        profile_function!();
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        desktop.present()?;

        let mut pump = Pump {
            desktop,
            out,
            error: None,
        };
        let status = self.event_loop.pump_app_events(timeout, &mut pump);
        if let Some(e) = pump.error {
            return Err(e);
        }
        match status {
            PumpStatus::Continue => Ok(()),
            PumpStatus::Exit(code) => Err(BackendError::EventLoop(format!(
                "event loop exited with code {}",
                code
            ))),
        }
    }

    fn waker(&self) -> Waker {
        let proxy = self.proxy.clone();
        Arc::new(move || {
            if proxy.lock().send_event(Wake).is_err() {
                tracing::trace!("event loop closed, dropping wake-up");
            }
        })
    }

    fn quit(&mut self) {
        tracing::debug!("closing every native window");
        self.desktop.borrow_mut().shutdown();
    }
}
