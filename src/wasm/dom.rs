use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast};
use web_sys::{Document, EventTarget};

use crate::error::PageError;

/// Page clock in whole milliseconds.
pub fn now() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now) as u64
}

pub fn query<T: JsCast>(doc: &Document, selector: &'static str) -> Result<T, PageError> {
    doc.query_selector(selector)?
        .ok_or(PageError::MissingElement(selector))?
        .dyn_into::<T>()
        .map_err(|_| PageError::MissingElement(selector))
}

pub fn by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, PageError> {
    doc.get_element_by_id(id)
        .ok_or(PageError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| PageError::MissingElement(id))
}

/// Every match of `selector`, in document order. Nodes of another type are skipped.
pub fn query_all<T: JsCast>(doc: &Document, selector: &'static str) -> Result<Vec<T>, PageError> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

/// Attach `handler` for the page lifetime.
pub fn on<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), PageError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
