//! Test utilities for the Sparta toolkit.
//!
//! [`MockBackend`] implements the backend contract without a display. Every
//! call the toolkit makes into it is recorded as a [`BackendCall`], and
//! tests feed it native events through a [`MockHandle`], including from
//! other threads.
//!
//! # Example
//!
//! ```rust
//! use sparta_test_utils::{BackendCall, MockBackend};
//! use sparta_ui::{MainWindow, Ui};
//!
//! let backend = MockBackend::new();
//! let handle = backend.handle();
//! let mut ui = Ui::new(backend);
//!
//! let window = MainWindow::new(&mut ui, "main", "Test").unwrap();
//! assert_eq!(handle.count(|c| matches!(c, BackendCall::NewWindow { .. })), 1);
//!
//! ui.close_window(window);
//! assert_eq!(handle.closed(), vec![window.id()]);
//! assert!(!ui.is_running());
//! ```

mod mock_backend;

pub use mock_backend::*;
