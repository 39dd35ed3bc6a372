#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Decorative behaviour for the landing page: pointer tilt, hover swing,
//! a simulated track player, and the photo glitch engine.
//!
//! The modules below are plain Rust driven by an explicit millisecond
//! clock so they can be tested on the host. The browser binding lives in
//! the wasm32-only `wasm` module.

pub mod config;
pub mod error;
pub mod photos;
pub mod player;
pub mod rng;
pub mod tilt;
pub mod timeline;

pub use config::GlitchConfig;
pub use error::PageError;
pub use photos::{GlitchEngine, GlitchKind, Photo, PhotoStyle};
pub use player::{format_time, parse_duration, Player, PlayerView, Track, TrackMark, Transport};
pub use tilt::{tilt_for, Tilt};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub use wasm::mount;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
    use web_sys::Document;

    use crate::error::PageError;

    mod dom;
    mod gallery;
    mod pointer;
    mod transport;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(PageError::NoDocument)?;
        if let Err(e) = mount(&document, None) {
            log::error!("page setup failed: {e}");
        }
        Ok(())
    }

    /// Wire every effect onto `document`. `seed` overrides `data-fx-seed` on `<body>`.
    pub fn mount(document: &Document, seed: Option<u64>) -> Result<(), PageError> {
        let window = web_sys::window().ok_or(PageError::NoDocument)?;
        let seed = seed
            .or_else(|| {
                document
                    .body()
                    .and_then(|b| b.get_attribute("data-fx-seed"))
                    .and_then(|s| s.trim().parse().ok())
            })
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        let start = dom::now();

        pointer::bind(document, &window)?;
        let player = transport::bind(document)?;
        let gallery = gallery::bind(document, seed, start)?;
        log::info!(
            "page mounted: {} tracks, {} photos, seed {seed}",
            player.track_count(),
            gallery.photo_count()
        );

        run_frames(move |now| {
            player.tick(now);
            gallery.frame(now);
        })
    }

    /// Call `on_frame` with the page clock on every animation frame.
    fn run_frames(mut on_frame: impl FnMut(u64) + 'static) -> Result<(), PageError> {
        // `f` holds the animation-frame closure so that it can request the
        // next frame for itself.
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            on_frame(dom::now());
            if let Some(cb) = f.borrow().as_ref() {
                if let Err(e) = request_frame(cb) {
                    log::error!("animation loop stopped: {e}");
                }
            }
        }) as Box<dyn FnMut()>));

        let first = g.borrow();
        let cb = first.as_ref().ok_or(PageError::NoDocument)?;
        request_frame(cb)?;
        Ok(())
    }

    fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<(), PageError> {
        web_sys::window()
            .ok_or(PageError::NoDocument)?
            .request_animation_frame(cb.as_ref().unchecked_ref())?;
        Ok(())
    }
}
