use super::{confirm::confirm, init_surface};
use crate::{
    actions::{Action, ActionSpec, Dispatcher},
    backend::command::SystemExecutor,
    theme::{StyleSheet, MENU_CLASS},
};
use gtk::{
    glib::{self, clone},
    prelude::*,
    Align, Application, ApplicationWindow, Button, IconTheme, Image, Label, Orientation,
};
use gtk4 as gtk;
use std::rc::Rc;
use strum::IntoEnumIterator;

pub fn new(app: &Application, style: StyleSheet, is_hyprland: bool) -> ApplicationWindow {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("")
        .default_width(400)
        .default_height(150)
        .resizable(false)
        .decorated(false)
        .build();
    window.add_css_class(MENU_CLASS);
    init_surface(&window);

    let row = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(20)
        .margin_top(20)
        .margin_bottom(20)
        .margin_start(20)
        .margin_end(20)
        .halign(Align::Center)
        .build();

    let dispatcher = Rc::new(Dispatcher::new(SystemExecutor, is_hyprland));
    let icons = IconTheme::for_display(&WidgetExt::display(&window));
    for action in Action::iter() {
        let button = button(action.spec(), &icons);
        button.connect_clicked(clone!(
            #[strong]
            dispatcher,
            #[weak]
            window,
            #[weak]
            row,
            move |_| {
                let dispatcher = Rc::clone(&dispatcher);
                glib::spawn_future_local(async move {
                    // no other action while this one (or its dialog) is running
                    row.set_sensitive(false);
                    let outcome = dispatcher
                        .dispatch(action, |prompt| confirm(&window, &style, prompt))
                        .await;
                    row.set_sensitive(true);

                    if outcome.closes_menu() {
                        window.close();
                    }
                });
            }
        ));
        row.append(&button);
    }

    let main = gtk::Box::new(Orientation::Vertical, 0);
    main.append(&row);
    window.set_child(Some(&main));

    window
}

fn button(spec: ActionSpec, icons: &IconTheme) -> Button {
    let content = gtk::Box::new(Orientation::Horizontal, 8);
    content.set_halign(Align::Center);
    // a missing icon is not worth a "broken image" placeholder
    if icons.has_icon(spec.icon_name) {
        content.append(&Image::from_icon_name(spec.icon_name));
    }
    content.append(&Label::new(Some(spec.label)));

    Button::builder()
        .name(spec.action.to_string().to_lowercase())
        .css_classes(["action"])
        .child(&content)
        .has_frame(false)
        .can_focus(false)
        .focus_on_click(false)
        .width_request(120)
        .height_request(60)
        .build()
}
