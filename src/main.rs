// gio's futures are not send, so ours can't be either
#![allow(clippy::future_not_send)]

use backend::{colors, environment::Environment};
use gtk::{glib, prelude::*, Application, CssProvider};
use gtk4 as gtk;
use log::{debug, error, LevelFilter};
use simple_logger::SimpleLogger;

mod actions;
mod backend;
mod modules;
mod theme;

fn load_css(window: &impl IsA<gtk::Widget>, style: &theme::StyleSheet) {
    let css = match style.menu_css() {
        Ok(x) => x,
        Err(e) => {
            error!("Cannot build the stylesheet: {e:?}");
            return;
        }
    };

    let provider = CssProvider::new();
    provider.load_from_string(&css);
    gtk::style_context_add_provider_for_display(
        &window.display(),
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn create_window(app: &Application, environment: &Environment) {
    // launching the menu twice just brings it back
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    let palette = colors::load(environment.color_file.as_deref());
    let style = theme::render(&palette);

    let window = modules::menu::new(app, style, environment.is_hyprland);
    load_css(&window, &style);
    window.present();
}

fn main() -> glib::ExitCode {
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("Cannot initialize logger: {e}");
    }

    let environment = Environment::detect();
    debug!("Running with {environment:?}");

    let app = Application::builder()
        .application_id("me.rayzeq.PowerMenu")
        .build();
    app.connect_activate(move |app| create_window(app, &environment));

    app.run()
}
