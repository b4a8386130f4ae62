//! Thin capability layer over the DOM.
//!
//! Page behaviours are written against the small traits below instead of
//! concrete `web_sys` types, so their logic can run against fakes in tests.

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};
use crate::error::{Error, Result};

pub trait ClassList {
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, name: &str) -> bool;
    fn has_class(&self, name: &str) -> bool;
}

pub trait Styled {
    fn set_style(&self, property: &str, value: &str);
}

pub trait Attributes {
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn element_id(&self) -> String;
}

impl ClassList for Element {
    fn add_class(&self, name: &str) {
        let _ = self.class_list().add_1(name);
    }

    fn remove_class(&self, name: &str) {
        let _ = self.class_list().remove_1(name);
    }

    fn toggle_class(&self, name: &str) -> bool {
        self.class_list().toggle(name).unwrap_or(false)
    }

    fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }
}

impl Styled for Element {
    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }
}

impl Attributes for Element {
    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        let _ = self.set_attribute(name, value);
    }

    fn element_id(&self) -> String {
        self.id()
    }
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(Error::NoDocument)
}

pub fn window_and_document() -> Result<(Window, Document)> {
    let window = window()?;
    let document = window.document().ok_or(Error::NoDocument)?;
    Ok((window, document))
}

pub fn query(document: &Document, selector: &str) -> Result<Option<Element>> {
    Ok(document.query_selector(selector)?)
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_all_within(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

pub fn as_html(el: &Element) -> Option<&HtmlElement> {
    el.dyn_ref::<HtmlElement>()
}

/// Registers a listener that lives as long as the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn viewport_size(window: &Window) -> Result<(f64, f64)> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w, h))
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashMap};
    use super::*;

    #[derive(Default)]
    pub struct FakeElement {
        pub id: String,
        pub classes: RefCell<BTreeSet<String>>,
        pub styles: RefCell<HashMap<String, String>>,
        pub attrs: RefCell<HashMap<String, String>>,
    }

    impl FakeElement {
        pub fn with_id(id: &str) -> Self {
            Self {
                id: id.to_string(),
                ..Default::default()
            }
        }

        pub fn with_attr(self, name: &str, value: &str) -> Self {
            self.attrs.borrow_mut().insert(name.to_string(), value.to_string());
            self
        }

        pub fn style(&self, property: &str) -> Option<String> {
            self.styles.borrow().get(property).cloned()
        }
    }

    impl ClassList for FakeElement {
        fn add_class(&self, name: &str) {
            self.classes.borrow_mut().insert(name.to_string());
        }

        fn remove_class(&self, name: &str) {
            self.classes.borrow_mut().remove(name);
        }

        fn toggle_class(&self, name: &str) -> bool {
            let mut classes = self.classes.borrow_mut();
            if classes.remove(name) {
                false
            } else {
                classes.insert(name.to_string());
                true
            }
        }

        fn has_class(&self, name: &str) -> bool {
            self.classes.borrow().contains(name)
        }
    }

    impl Styled for FakeElement {
        fn set_style(&self, property: &str, value: &str) {
            self.styles.borrow_mut().insert(property.to_string(), value.to_string());
        }
    }

    impl Attributes for FakeElement {
        fn attr(&self, name: &str) -> Option<String> {
            self.attrs.borrow().get(name).cloned()
        }

        fn set_attr(&self, name: &str, value: &str) {
            self.attrs.borrow_mut().insert(name.to_string(), value.to_string());
        }

        fn element_id(&self) -> String {
            self.id.clone()
        }
    }
}
