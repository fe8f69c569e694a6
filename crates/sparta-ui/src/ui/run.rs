use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use sparta_core::profiling::{self, profile_function, profile_scope};

use super::{Injected, Ui};
use crate::backend::{NativeEvent, Waker};
use crate::error::{SendError, UiResult};
use crate::event::{CloseEvent, CommandEvent};
use crate::keys::MouseButton;
use crate::widget::WidgetId;

/// Sends commands to widgets from any thread.
///
/// Commands go through a bounded queue drained by the event loop, which is
/// woken on every send. The handler sees them with the `source` given here,
/// usually `None`.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<Injected>,
    waker: Waker,
}

impl EventSender {
    pub fn send(&self, dest: WidgetId, event: CommandEvent) -> Result<(), SendError> {
        match self.tx.try_send((dest, event)) {
            Ok(()) => {
                (self.waker)();
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(SendError::Full),
            Err(TrySendError::Disconnected(_)) => Err(SendError::Disconnected),
        }
    }
}

impl std::fmt::Debug for EventSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSender")
            .field("queued", &self.tx.len())
            .finish_non_exhaustive()
    }
}

impl Ui {
    /// A handle for injecting commands from other threads.
    pub fn event_sender(&self) -> EventSender {
        EventSender {
            tx: self.injected_tx.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Runs the event loop until the last window closes or [`Ui::quit`].
    pub fn run(&mut self) -> UiResult<()> {
        tracing::info!("entering event loop with {} widgets", self.widget_count());
        while self.step(None)? {}
        tracing::info!("event loop finished");
        Ok(())
    }

    /// One loop iteration: deliver queued commands, wait for native events
    /// (up to `timeout`, `None` blocks), dispatch them, deliver the commands
    /// they produced. Returns whether the loop should keep going.
    pub fn step(&mut self, timeout: Option<Duration>) -> UiResult<bool> {
        profiling::new_frame();
        profile_function!();

        self.deliver_commands();
        if !self.running {
            return Ok(false);
        }

        let timeout = if self.posted.is_empty() {
            timeout
        } else {
            Some(Duration::ZERO)
        };

        let mut events = std::mem::take(&mut self.native);
        let waited = self.backend.wait_events(&mut events, timeout);
        if let Err(e) = waited {
            self.native = events;
            return Err(e.into());
        }
        {
            profile_scope!("route_native");
            for event in events.drain(..) {
                self.route_native(event);
            }
        }
        self.native = events;

        self.deliver_commands();
        Ok(self.running)
    }

    /// Delivers commands posted on this thread, then those injected from
    /// others. Commands posted while delivering wait for the next pass.
    fn deliver_commands(&mut self) {
        profile_function!();
        let pending = self.posted.len();
        for _ in 0..pending {
            let Some((dest, event)) = self.posted.pop_front() else {
                break;
            };
            self.on_event(dest, event);
        }

        let injected: Vec<_> = self.injected_rx.try_iter().collect();
        for (dest, event) in injected {
            if !self.is_alive(dest) {
                tracing::warn!("dropping command {} for closed widget {}", event.value, dest);
                continue;
            }
            self.on_event(dest, event);
        }
    }

    fn route_native(&mut self, event: NativeEvent) {
        match event {
            NativeEvent::Close { target } => {
                if self.parent(target).is_none() {
                    self.on_event(target, CloseEvent);
                } else {
                    tracing::debug!("ignoring close request for child widget {}", target);
                }
            }
            NativeEvent::Configure { target, rect } => self.configure(target, rect),
            NativeEvent::Expose { target, rect } => self.expose(target, rect),
            NativeEvent::Key { target, event } => self.on_event(target, event),
            NativeEvent::Mouse { target, event } => {
                let press = event.button.is_press() && event.button != MouseButton::WHEEL;
                self.on_event(target, event);
                if press {
                    self.focus(target);
                }
            }
            NativeEvent::Wake => {}
        }
    }
}
