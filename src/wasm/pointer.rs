use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Window};

use super::dom;
use crate::error::PageError;
use crate::tilt::tilt_for;

/// Tilt `main` toward the cursor and swing links on hover.
pub fn bind(doc: &Document, window: &Window) -> Result<(), PageError> {
    let container: HtmlElement = dom::query(doc, "main")?;
    let win = window.clone();
    dom::on(doc, "mousemove", move |e: MouseEvent| {
        let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let tilt = tilt_for(f64::from(e.client_x()), f64::from(e.client_y()), w, h);
        if let Err(e) = container.style().set_property("transform", &tilt.css()) {
            log::warn!("tilt not applied: {e:?}");
        }
    })?;

    for link in dom::query_all::<Element>(doc, "a")? {
        let enter = link.clone();
        dom::on(&link, "mouseenter", move |_: Event| {
            enter.class_list().add_1("swing").ok();
        })?;
        let leave = link.clone();
        dom::on(&link, "mouseleave", move |_: Event| {
            leave.class_list().remove_1("swing").ok();
        })?;
    }
    Ok(())
}
