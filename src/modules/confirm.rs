use super::init_surface;
use crate::{
    actions::{Prompt, Response},
    theme::{StyleSheet, CONFIRM_CLASS},
};
use futures::channel::oneshot;
use gtk::{glib, prelude::*, Align, Button, CssProvider, Label, Orientation, Window};
use gtk4 as gtk;
use log::error;
use std::{cell::Cell, rc::Rc};

type Sender = Rc<Cell<Option<oneshot::Sender<Response>>>>;

fn respond(sender: &Sender, response: Response) {
    if let Some(sender) = sender.take() {
        // the receiver only goes away with the dialog
        let _ = sender.send(response);
    }
}

/// Ask a yes/no question in a modal window above `parent`.
///
/// Closing the dialog any other way counts as `No`.
pub async fn confirm(
    parent: &impl IsA<gtk::Window>,
    style: &StyleSheet,
    prompt: Prompt,
) -> Response {
    let (sender, receiver) = oneshot::channel();
    let sender: Sender = Rc::new(Cell::new(Some(sender)));

    let window = Window::builder()
        .transient_for(parent)
        .modal(true)
        .decorated(false)
        .resizable(false)
        .title(prompt.title)
        .build();
    window.add_css_class(CONFIRM_CLASS);
    init_surface(&window);
    install_style(&window, style);

    let title = Label::builder()
        .label(prompt.title)
        .css_classes(["title"])
        .halign(Align::Start)
        .build();
    let message = Label::builder()
        .label(prompt.message)
        .css_classes(["message"])
        .halign(Align::Start)
        .build();

    let buttons = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(12)
        .halign(Align::End)
        .build();
    for (label, response) in [("No", Response::No), ("Yes", Response::Yes)] {
        let button = Button::with_label(label);
        button.connect_clicked(glib::clone!(
            #[strong]
            sender,
            #[weak]
            window,
            move |_| {
                respond(&sender, response);
                window.close();
            }
        ));
        buttons.append(&button);
    }

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(12)
        .margin_top(20)
        .margin_bottom(20)
        .margin_start(20)
        .margin_end(20)
        .build();
    content.append(&title);
    content.append(&message);
    content.append(&buttons);
    window.set_child(Some(&content));

    window.connect_close_request(glib::clone!(
        #[strong]
        sender,
        move |_| {
            respond(&sender, Response::No);
            glib::Propagation::Proceed
        }
    ));

    window.present();
    receiver.await.unwrap_or(Response::No)
}

/// The dialog's colors are only installed while the dialog exists.
fn install_style(window: &Window, style: &StyleSheet) {
    let css = match style.dialog_css() {
        Ok(x) => x,
        Err(e) => {
            error!("Cannot style confirmation dialog: {e:?}");
            return;
        }
    };

    let provider = CssProvider::new();
    provider.load_from_string(&css);
    gtk::style_context_add_provider_for_display(
        &WidgetExt::display(window),
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
    window.connect_destroy(move |window| {
        gtk::style_context_remove_provider_for_display(&WidgetExt::display(window), &provider);
    });
}
