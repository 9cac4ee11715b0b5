//! UI callbacks
//!
//! Forwards slider and key events from the window to the filter session and
//! pushes whatever the session returns back to the screen. Events arrive one
//! at a time on the UI thread, so the session sits behind a `RefCell`.

use crate::AppWindow;
use image::RgbImage;
use lomo_effect::FilterSession;
use slint::{ComponentHandle, Image, Rgb8Pixel, SharedPixelBuffer};
use std::{cell::RefCell, path::PathBuf, rc::Rc};

/// What a key press in the window asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Save,
    Quit,
    Reapply,
    Ignore,
}

impl KeyAction {
    pub fn from_text(text: &str) -> Self {
        match text {
            "s" => KeyAction::Save,
            "q" => KeyAction::Quit,
            "r" => KeyAction::Reapply,
            _ => KeyAction::Ignore,
        }
    }
}

/// Shared between the callbacks; the first fatal error stops the event loop
/// and is reported once the window is gone.
pub type FatalError = Rc<RefCell<Option<anyhow::Error>>>;

pub fn to_slint_image(image: &RgbImage) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(image.as_raw(), image.width(), image.height());
    Image::from_rgb8(buffer)
}

/// Connects the window callbacks to the session.
///
/// # Parameters
/// - `ui`: Reference to the application window
/// - `session`: The session owning the source and derived images
/// - `output`: Where the save key writes the displayed image
/// - `fatal`: Slot for an error that ends the run
pub fn init(
    ui: &AppWindow,
    session: Rc<RefCell<FilterSession>>,
    output: PathBuf,
    fatal: FatalError,
) {
    ui.set_frame(to_slint_image(session.borrow().display()));

    {
        let ui_weak = ui.as_weak();
        let session = session.clone();
        let fatal = fatal.clone();
        ui.on_steepness_changed(move |steepness| {
            let ui = ui_weak.unwrap();
            let mut session = session.borrow_mut();
            match session.set_steepness(steepness) {
                Ok(display) => ui.set_frame(to_slint_image(display)),
                Err(e) => stop(&fatal, anyhow::Error::new(e).context("color filter failed")),
            }
        });
    }

    {
        let ui_weak = ui.as_weak();
        let session = session.clone();
        let fatal = fatal.clone();
        ui.on_radius_changed(move |radius| {
            let ui = ui_weak.unwrap();
            let mut session = session.borrow_mut();
            match session.set_radius(radius) {
                Ok(display) => ui.set_frame(to_slint_image(display)),
                Err(e) => stop(&fatal, anyhow::Error::new(e).context("halo filter failed")),
            }
        });
    }

    let ui_weak = ui.as_weak();
    ui.on_key_pressed(move |text| match KeyAction::from_text(text.as_str()) {
        KeyAction::Reapply => {
            let ui = ui_weak.unwrap();
            let mut session = session.borrow_mut();
            match session.reapply_halo() {
                Ok(display) => ui.set_frame(to_slint_image(display)),
                Err(e) => stop(&fatal, anyhow::Error::new(e).context("halo filter failed")),
            }
        }
        KeyAction::Save => {
            if let Err(e) = session.borrow().save_display(&output) {
                stop(
                    &fatal,
                    anyhow::Error::new(e).context(format!("save {} failed", output.display())),
                );
                return;
            }
            log::info!("saved {}, quitting", output.display());
            _ = slint::quit_event_loop();
        }
        KeyAction::Quit => {
            log::info!("quit without saving");
            _ = slint::quit_event_loop();
        }
        KeyAction::Ignore => {}
    });
}

fn stop(fatal: &FatalError, err: anyhow::Error) {
    log::warn!("{err:#}");
    fatal.borrow_mut().get_or_insert(err);
    _ = slint::quit_event_loop();
}
