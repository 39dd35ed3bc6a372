use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlImageElement};

use super::dom;
use crate::config::GlitchConfig;
use crate::error::PageError;
use crate::photos::{GlitchEngine, PhotoStyle};

pub struct Gallery {
    engine: RefCell<GlitchEngine>,
    photos: Vec<HtmlImageElement>,
}

impl Gallery {
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Advance the engine to `now` and copy changed styles onto the page.
    pub fn frame(&self, now: u64) {
        let mut engine = self.engine.borrow_mut();
        engine.advance_to(now);
        for i in engine.take_dirty() {
            if let Err(e) = sync(&self.photos[i], engine.photos()[i].style()) {
                log::warn!("photo {i} style not applied: {e:?}");
            }
        }
    }
}

fn sync(el: &HtmlImageElement, style: &PhotoStyle) -> Result<(), JsValue> {
    let css = el.style();
    css.set_property("left", &style.left)?;
    css.set_property("top", &style.top)?;
    css.set_property("width", &style.width)?;
    css.set_property("transform", &style.transform)?;
    css.set_property("filter", &style.filter)?;
    css.set_property("opacity", &style.opacity)?;
    css.set_property("transition", &style.transition)?;
    css.set_property("clip-path", &style.clip_path)?;
    if let Some(src) = style.src {
        if !el.src().ends_with(src) {
            el.set_src(src);
        }
    }
    Ok(())
}

pub fn bind(doc: &Document, seed: u64, start: u64) -> Result<Rc<Gallery>, PageError> {
    let photos: Vec<HtmlImageElement> = dom::query_all(doc, ".photo")?;
    if photos.is_empty() {
        return Err(PageError::MissingElement(".photo"));
    }
    let engine = GlitchEngine::new(photos.len(), GlitchConfig::default(), seed, start);
    let gallery = Rc::new(Gallery {
        engine: RefCell::new(engine),
        photos,
    });
    // lay out the photos before the first frame
    gallery.frame(start);
    Ok(gallery)
}
