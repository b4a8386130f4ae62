use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};
use crate::constants::*;
use crate::dom;
use crate::error::Result;
use crate::reveal::intersection_observer;

/// Reveals a string one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    pos: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }

    /// Types the next character and returns everything typed so far.
    pub fn advance(&mut self) -> Option<&str> {
        let next = self.text[self.pos..].chars().next()?;
        self.pos += next.len_utf8();
        Some(&self.text[..self.pos])
    }
}

fn type_step(el: Element, mut writer: Typewriter, step_ms: u32) {
    if let Some(typed) = writer.advance() {
        el.set_text_content(Some(typed));
        Timeout::new(step_ms, move || type_step(el, writer, step_ms)).forget();
    }
}

/// Clears the element and retypes `text` into it.
pub fn type_into(el: Element, text: String, step_ms: u32) {
    el.set_text_content(Some(""));
    type_step(el, Typewriter::new(text), step_ms);
}

/// Retypes the vision quote the first time it is half visible.
pub fn init(document: &Document, enabled: bool) -> Result<()> {
    if !enabled {
        return Ok(());
    }
    let quote = match dom::query(document, ".vision-quote")? {
        Some(q) => q,
        None => return Ok(()),
    };

    let observer = intersection_observer(TYPING_THRESHOLD, None, |target, observer| {
        let text = target.text_content().unwrap_or_default();
        observer.unobserve(&target);
        type_into(target, text, TYPING_STEP_MS);
    })?;
    observer.observe(&quote);
    Ok(())
}
