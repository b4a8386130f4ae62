use std::rc::Rc;
use web_sys::Document;
use crate::dom::{self, Attributes, ClassList};
use crate::error::Result;

const ACTIVE: &str = "active";

/// Makes `buttons[clicked]` and the panel with id `<tab>-panel` the only active ones.
pub fn select_tab<E: ClassList + Attributes>(buttons: &[E], clicked: usize, panels: &[E]) {
    let panel_id = buttons
        .get(clicked)
        .and_then(|b| b.attr("data-tab"))
        .map(|tab| format!("{}-panel", tab));

    for (i, button) in buttons.iter().enumerate() {
        if i == clicked {
            button.add_class(ACTIVE);
        } else {
            button.remove_class(ACTIVE);
        }
    }

    for panel in panels {
        panel.remove_class(ACTIVE);
        if panel_id.as_deref() == Some(panel.element_id().as_str()) {
            panel.add_class(ACTIVE);
        }
    }
}

pub fn init(document: &Document) -> Result<()> {
    let buttons = Rc::new(dom::query_all(document, ".tab-btn")?);
    let panels = Rc::new(dom::query_all(document, ".tab-panel")?);

    for (index, button) in buttons.iter().enumerate() {
        let buttons = buttons.clone();
        let panels = panels.clone();
        dom::listen(button, "click", move |_: web_sys::Event| {
            select_tab(buttons.as_slice(), index, panels.as_slice());
        })?;
    }
    Ok(())
}
