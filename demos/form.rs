//! A form with fields, a dropdown and buttons. Escape cancels.

use std::sync::{Arc, Mutex};

use trellis_tui::dom::NodeData;
use trellis_tui::widgets::{accept_integer, CheckBox, DropDown, Flex, FlexItem, Form, InputField, TextView};
use trellis_tui::{AppConfig, Application};

fn init_logging() {
    let Ok(filter) = tracing_subscriber::EnvFilter::try_from_env("TRELLIS_LOG") else { return };
    let Ok(file) = std::fs::File::create("trellis.log") else { return };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::sync::Mutex::new(file)).with_ansi(false).init();
}

fn main() -> trellis_tui::Result<()> {
    init_logging();

    let mut app = Application::new(AppConfig::new().with_title("form").with_mouse(true));
    let summary = Arc::new(Mutex::new(None));

    let dom = app.dom_mut();
    let layout = dom.insert(Flex::column());
    let form = dom.insert_with(NodeData::new(Form::new()).with_border(true).with_title("Profile"));
    let name = dom.insert(InputField::new().with_label("Name     ").with_field_width(20));
    let age = dom.insert(InputField::new().with_label("Age      ").with_field_width(4).with_accept(accept_integer));
    let role = dom.insert(DropDown::new().with_label("Role     ").with_options(["developer", "designer", "manager"]));
    let news = dom.insert(CheckBox::new().with_label("Newsletter"));
    let status = dom.insert(TextView::new().with_text("Fill in the form."));
    for item in [name, age, role, news] {
        dom.add_form_item(form, item)?;
    }

    dom.add_button(form, "Save", move |handle, ()| {
        handle.queue_update_draw(move |app| {
            let dom = app.dom();
            let name = dom.widget::<InputField>(name).map(|f| f.text().to_string()).unwrap_or_default();
            let age = dom.widget::<InputField>(age).map(|f| f.text().to_string()).unwrap_or_default();
            let role = dom
                .widget::<DropDown>(role)
                .ok()
                .and_then(|d| d.current_option().map(|(_, text)| text.to_string()))
                .unwrap_or_else(|| "unset".into());
            let line = format!("Saved {name} ({age}), {role}");
            if let Ok(view) = app.dom_mut().widget_mut::<TextView>(status) {
                view.set_text(line);
            }
        });
    })?;
    let sink = Arc::clone(&summary);
    dom.add_button(form, "Quit", move |handle, ()| {
        *sink.lock().unwrap_or_else(|e| e.into_inner()) = Some("quit");
        handle.stop();
    })?;
    dom.widget_mut::<Form>(form)?.set_cancel_func(|handle, ()| handle.stop());

    dom.add_item(layout, form, FlexItem::proportional(1))?;
    dom.add_item(layout, status, FlexItem::fixed(1))?;
    app.set_root(layout, true)?;
    app.run()?;

    if let Some(how) = *summary.lock().unwrap_or_else(|e| e.into_inner()) {
        println!("left via {how}");
    }
    Ok(())
}
