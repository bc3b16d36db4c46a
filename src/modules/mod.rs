use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{KeyboardMode, Layer, LayerShell};

pub mod confirm;
pub mod menu;

/// Turn `window` into a centered overlay when the compositor supports layer shell.
///
/// A layer surface without anchors is centered by the compositor, which is the only
/// way to position a window on Wayland. Elsewhere, the window is left as a normal toplevel.
pub fn init_surface(window: &impl IsA<gtk::Window>) {
    if !gtk4_layer_shell::is_supported() {
        return;
    }

    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}
