//! Two empty main windows.
//!
//! The loop ends once both are closed.
//!
//! Run with: cargo run --example empty

use sparta::prelude::*;

fn main() -> Result<(), sparta::UiError> {
    let mut ui = sparta::init_or_exit(Config::from_env());

    MainWindow::new(&mut ui, "one", "Window one")?;
    MainWindow::new(&mut ui, "two", "Window two")?;

    ui.run()
}
