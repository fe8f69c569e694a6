use sparta_core::Rect;

use crate::error::UiResult;
use crate::event::Event;
use crate::property::Property;
use crate::ui::Ui;
use crate::widget::{Behavior, WidgetId, WidgetKind};

super::widget_handle!(
    /// A top-level window. Closing it closes everything inside it.
    MainWindow
);

impl MainWindow {
    /// A window sized to the configured default number of text cells.
    pub fn new(ui: &mut Ui, name: &str, title: &str) -> UiResult<Self> {
        let (columns, rows) = ui.config().default_window_cells;
        let units = ui.units();
        let rect = Rect::new(0, 0, columns * units.width, rows * units.height);
        Self::with_geometry(ui, name, title, rect)
    }

    /// `rect` is in screen coordinates.
    pub fn with_geometry(ui: &mut Ui, name: &str, title: &str, rect: Rect) -> UiResult<Self> {
        ui.create_widget(WidgetKind::MainWindow, None, name, title, rect, Box::new(()))
            .map(Self)
    }
}

pub(crate) struct MainWindowBehavior;

impl Behavior for MainWindowBehavior {
    fn kind(&self) -> WidgetKind {
        WidgetKind::MainWindow
    }

    fn supports(&self, key: Property) -> bool {
        matches!(
            key,
            Property::Caption
                | Property::Childs
                | Property::Data
                | Property::Geometry
                | Property::Name
                | Property::Foreground
                | Property::Background
        )
    }

    fn on_event(&self, ui: &mut Ui, id: WidgetId, event: &Event) {
        match event {
            Event::Close(_) => {
                if ui.is_block() && !ui.is_blocker(id) {
                    tracing::debug!("close of {} refused while blocked", id);
                    return;
                }
                if ui.run_handler(id, event) {
                    return;
                }
                super::close_children(ui, id);
                ui.close_window(id);
            }
            Event::Configure(configure) => {
                super::store_geometry(ui, id, configure.rect);
                ui.run_handler(id, event);
            }
            _ => {
                ui.run_handler(id, event);
            }
        }
    }
}
