//! Keyed pages switched with function keys.
//!
//! F1 to F3 bring a page to the front; Tab cycles focus inside it.

use trellis_tui::dom::{NodeData, NodeId};
use trellis_tui::event::Intent;
use trellis_tui::widgets::{Button, Flex, FlexItem, Panels, TextView};
use trellis_tui::{AppConfig, Application};

fn init_logging() {
    let Ok(filter) = tracing_subscriber::EnvFilter::try_from_env("TRELLIS_LOG") else { return };
    let Ok(file) = std::fs::File::create("trellis.log") else { return };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::sync::Mutex::new(file)).with_ansi(false).init();
}

fn page(app: &mut Application, title: &str, panels: NodeId, next: &str) -> trellis_tui::Result<NodeId> {
    let dom = app.dom_mut();
    let page = dom.insert_with(NodeData::new(Flex::column()).with_border(true).with_title(title));
    let body = dom.insert(TextView::new().with_text(format!("This is {title}.\nF1-F3 switch pages.")));
    let mut button = Button::new(format!("Go to {next}"));
    let next = next.to_string();
    button.set_selected_func(move |handle, ()| {
        handle.post(Intent::SwitchPanel { panels, key: next.clone() });
    });
    let button = dom.insert(button);
    dom.add_item(page, body, FlexItem::proportional(1))?;
    dom.add_item(page, button, FlexItem::fixed(1).with_focus(true))?;
    Ok(page)
}

fn main() -> trellis_tui::Result<()> {
    init_logging();

    let mut app = Application::new(AppConfig::new().with_title("panels").with_mouse(true));
    let panels = app.dom_mut().insert(Panels::new());
    let keys = ["one", "two", "three"];
    for (i, key) in keys.iter().enumerate() {
        let next = keys[(i + 1) % keys.len()];
        let node = page(&mut app, key, panels, next)?;
        app.dom_mut().add_panel(panels, *key, node, i == 0)?;
        app.bindings_mut().bind_spec(&format!("f{}", i + 1), Intent::SwitchPanel { panels, key: key.to_string() })?;
    }
    app.set_root(panels, true)?;
    app.run()
}
