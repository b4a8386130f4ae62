use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, KeyboardEvent, MouseEvent, Window};
use crate::constants::*;
use crate::dom::{self, ClassList, Styled};
use crate::error::Result;

const KEYBOARD_NAV: &str = "keyboard-nav";

const BANNER: [(&str, &str); 4] = [
    (
        "%c To Infinite and Beyond ",
        concat!(
            "background: linear-gradient(135deg, #0a0a0f, #1a1a2e); color: #00d9ff; ",
            "font-size: 24px; font-weight: bold; padding: 20px 40px; border-radius: 8px;",
        ),
    ),
    (
        "%c A Universal Language for Interstellar Communication ",
        "color: #a855f7; font-size: 14px;",
    ),
    (
        "%c 致无限与永恒 - 一种用于星际交流的宇宙语言 ",
        "color: #ec4899; font-size: 12px;",
    ),
    ("%c 1 + 1 = 2 everywhere in the universe ", "color: #00d9ff; font-style: italic;"),
];

pub fn log_banner() {
    for (i, (text, style)) in BANNER.iter().enumerate() {
        if i == BANNER.len() - 1 {
            web_sys::console::log_1(&JsValue::from_str(""));
        }
        web_sys::console::log_2(&JsValue::from_str(text), &JsValue::from_str(style));
    }
}

// Card hover glow

pub fn glow_at(x: f64, y: f64) -> String {
    format!(
        "radial-gradient(circle at {}px {}px, rgba(0, 217, 255, 0.15) 0%, transparent 60%)",
        x, y
    )
}

pub fn init_hover_glow(document: &Document) -> Result<()> {
    for card in dom::query_all(document, HOVER_CARDS)? {
        let glow = match card.query_selector(".card-glow")? {
            Some(g) => g,
            None => continue,
        };

        let this = card.clone();
        let glow_move = glow.clone();
        dom::listen(&card, "mousemove", move |e: MouseEvent| {
            let rect = this.get_bounding_client_rect();
            let x = e.client_x() as f64 - rect.left();
            let y = e.client_y() as f64 - rect.top();
            glow_move.set_style("background", &glow_at(x, y));
        })?;

        dom::listen(&card, "mouseleave", move |_: MouseEvent| {
            glow.set_style("background", GLOW_RESTING);
        })?;
    }
    Ok(())
}

// Binary stream

/// Cycles through the fixed binary sequences.
#[derive(Debug, Default)]
pub struct BinaryStream {
    index: usize,
}

impl BinaryStream {
    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % BINARY_SEQUENCES.len();
        BINARY_SEQUENCES[self.index]
    }
}

pub fn init_binary_stream(document: &Document) -> Result<()> {
    let span = match dom::query(document, ".binary-stream span")? {
        Some(s) => s,
        None => return Ok(()),
    };

    let mut stream = BinaryStream::default();
    let interval = Interval::new(BINARY_STREAM_INTERVAL_MS, move || {
        span.set_style("opacity", "0");
        let next = stream.advance();
        let span = span.clone();
        Timeout::new(BINARY_STREAM_FADE_MS, move || {
            span.set_text_content(Some(next));
            span.set_style("opacity", BINARY_STREAM_OPACITY);
        })
        .forget();
    });
    // Runs for the lifetime of the page.
    interval.forget();
    Ok(())
}

// Page fade-in

pub fn conceal<E: Styled>(body: &E) {
    body.set_style("opacity", "0");
    body.set_style("transition", "opacity 0.5s ease");
}

pub fn unveil<E: Styled>(body: &E) {
    body.set_style("opacity", "1");
}

/// Hides the body as early as possible so the fade-in starts from blank.
pub fn hide_page(document: &Document) {
    if let Some(body) = document.body() {
        conceal(&Element::from(body));
    }
}

/// Fades the body in shortly after `load`.
pub fn init_page_reveal(window: &Window, document: &Document) -> Result<()> {
    let body: Element = match document.body() {
        Some(b) => b.into(),
        None => return Ok(()),
    };
    // no-op unless the body was missing when the module started
    conceal(&body);

    let show = move || {
        let body = body.clone();
        Timeout::new(PAGE_REVEAL_DELAY_MS, move || unveil(&body)).forget();
    };

    if document.ready_state() == "complete" {
        show();
        Ok(())
    } else {
        dom::listen(window, "load", move |_: web_sys::Event| show())
    }
}

// Keyboard navigation marker

pub fn marks_keyboard_nav(key: &str) -> bool {
    key == "Tab"
}

pub fn init_keyboard_nav(document: &Document) -> Result<()> {
    let body = match document.body() {
        Some(b) => b,
        None => return Ok(()),
    };

    let body_key = body.clone();
    dom::listen(document, "keydown", move |e: KeyboardEvent| {
        if marks_keyboard_nav(&e.key()) {
            body_key.add_class(KEYBOARD_NAV);
        }
    })?;
    dom::listen(document, "mousedown", move |_: MouseEvent| {
        body.remove_class(KEYBOARD_NAV);
    })
}
