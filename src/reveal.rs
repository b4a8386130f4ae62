use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};
use crate::constants::*;
use crate::dom::{self, Attributes, ClassList, Styled};
use crate::error::Result;

pub struct RevealGroup {
    pub selector: &'static str,
    /// Per-element transition delay step in seconds.
    pub stagger: Option<f64>,
    pub fade_up: bool,
}

pub const REVEAL_GROUPS: [RevealGroup; 6] = [
    RevealGroup {
        selector: ".principle-card",
        stagger: Some(0.1),
        fade_up: false,
    },
    RevealGroup {
        selector: ".symbol-card",
        stagger: Some(0.05),
        fade_up: true,
    },
    RevealGroup {
        selector: ".section-title, .section-title-cn, .section-label",
        stagger: None,
        fade_up: true,
    },
    RevealGroup {
        selector: ".philosophy-card",
        stagger: Some(0.1),
        fade_up: true,
    },
    RevealGroup {
        selector: ".stat",
        stagger: Some(0.1),
        fade_up: true,
    },
    RevealGroup {
        selector: ".step",
        stagger: Some(0.15),
        fade_up: true,
    },
];

pub fn transition_delay(index: usize, stagger: f64) -> String {
    let secs = (index as f64 * stagger * 1000.0).round() / 1000.0;
    format!("{}s", secs)
}

/// Tags an element of a group before it is observed.
pub fn prepare<E: Styled + Attributes>(el: &E, index: usize, group: &RevealGroup) {
    if group.fade_up {
        el.set_attr("data-aos", "fade-up");
    }
    if let Some(stagger) = group.stagger {
        el.set_style("transition-delay", &transition_delay(index, stagger));
    }
}

pub fn reveal<E: ClassList>(el: &E) {
    el.add_class(REVEAL_CLASS);
}

/// Builds an observer that calls `on_enter` for every entry that starts intersecting.
pub fn intersection_observer<F>(
    threshold: f64,
    root_margin: Option<&str>,
    mut on_enter: F,
) -> Result<IntersectionObserver>
where
    F: FnMut(Element, &IntersectionObserver) + 'static,
{
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    on_enter(entry.target(), &observer);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

pub fn init(document: &Document) -> Result<()> {
    let observer = intersection_observer(REVEAL_THRESHOLD, Some(REVEAL_ROOT_MARGIN), |target, _| {
        reveal(&target);
    })?;

    for group in REVEAL_GROUPS.iter() {
        for (index, el) in dom::query_all(document, group.selector)?.iter().enumerate() {
            prepare(el, index, group);
            observer.observe(el);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeElement;

    #[test]
    fn delays_are_staggered_and_rounded() {
        assert_eq!(transition_delay(0, 0.1), "0s");
        assert_eq!(transition_delay(3, 0.1), "0.3s");
        assert_eq!(transition_delay(3, 0.15), "0.45s");
        assert_eq!(transition_delay(7, 0.05), "0.35s");
    }

    #[test]
    fn principle_cards_get_delay_but_no_fade_attribute() {
        let card = FakeElement::default();
        prepare(&card, 2, &REVEAL_GROUPS[0]);
        assert_eq!(card.style("transition-delay").as_deref(), Some("0.2s"));
        assert_eq!(card.attr("data-aos"), None);
    }

    #[test]
    fn titles_fade_up_without_delay() {
        let title = FakeElement::default();
        prepare(&title, 4, &REVEAL_GROUPS[2]);
        assert_eq!(title.attr("data-aos").as_deref(), Some("fade-up"));
        assert_eq!(title.style("transition-delay"), None);
    }

    #[test]
    fn reveal_adds_animate_class() {
        let step = FakeElement::default();
        prepare(&step, 1, &REVEAL_GROUPS[5]);
        reveal(&step);
        assert!(step.has_class("aos-animate"));
        assert_eq!(step.style("transition-delay").as_deref(), Some("0.15s"));
    }
}
