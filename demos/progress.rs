//! A worker thread reports progress through `queue_update_draw`.
//!
//! Run with `cargo run --example progress`. Set `TRELLIS_LOG=debug` to write
//! a trace to `trellis.log`.

use std::thread;
use std::time::Duration;

use trellis_tui::dom::NodeData;
use trellis_tui::widgets::{Flex, FlexItem, ProgressBar, TextView};
use trellis_tui::{AppConfig, Application};

fn init_logging() {
    let Ok(filter) = tracing_subscriber::EnvFilter::try_from_env("TRELLIS_LOG") else { return };
    let Ok(file) = std::fs::File::create("trellis.log") else { return };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::sync::Mutex::new(file)).with_ansi(false).init();
}

fn main() -> trellis_tui::Result<()> {
    init_logging();

    let mut app = Application::new(AppConfig::new().with_title("progress"));
    let dom = app.dom_mut();
    let column = dom.insert_with(NodeData::new(Flex::column()).with_border(true).with_title("Download"));
    let bar = dom.insert(ProgressBar::new(200));
    let status = dom.insert(TextView::new().with_text("starting..."));
    dom.add_item(column, bar, FlexItem::fixed(1))?;
    dom.add_item(column, status, FlexItem::proportional(1))?;
    app.set_root(column, true)?;

    let handle = app.handle();
    thread::spawn(move || {
        for step in 1..=200u32 {
            thread::sleep(Duration::from_millis(25));
            let queued = handle.queue_update_draw(move |app| {
                let dom = app.dom_mut();
                if let Ok(bar) = dom.widget_mut::<ProgressBar>(bar) {
                    bar.set_value(step);
                }
                if let Ok(view) = dom.widget_mut::<TextView>(status) {
                    view.set_text(format!("chunk {step} of 200"));
                }
            });
            if !queued {
                return;
            }
        }
        handle.queue_update_draw(move |app| {
            if let Ok(view) = app.dom_mut().widget_mut::<TextView>(status) {
                view.set_text("done. press ctrl+c to quit");
            }
        });
    });

    app.run()
}
