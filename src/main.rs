mod canvas;
mod config;
mod constants;
mod dom;
mod effects;
mod error;
mod frame_loop;
mod nav;
mod parallax;
mod reveal;
mod starfield;
mod tabs;
mod typing;

use config::SiteConfig;
use error::Result;

fn report(behaviour: &str, result: Result<()>) {
    if let Err(e) = result {
        web_sys::console::error_1(&format!("{}: {}", behaviour, e).into());
    }
}

/// Wires every page behaviour. A failure in one never blocks the others.
fn start() {
    let (window, document) = match dom::window_and_document() {
        Ok(pair) => pair,
        Err(e) => {
            web_sys::console::error_1(&format!("startup: {}", e).into());
            return;
        }
    };
    let config = SiteConfig::load(&document);

    match canvas::attach(&config.starfield) {
        Ok(Some(render_loop)) => report(
            "starfield",
            dom::listen(&window, "pagehide", move |e: web_sys::PageTransitionEvent| {
                // a page kept in the back/forward cache comes back animating
                if !e.persisted() {
                    render_loop.stop();
                }
            }),
        ),
        Ok(None) => {}
        Err(e) => web_sys::console::error_1(&format!("starfield: {}", e).into()),
    }

    report("page reveal", effects::init_page_reveal(&window, &document));
    report("navigation", nav::init(&window, &document, config.mobile_breakpoint));
    report("tabs", tabs::init(&document));
    report("scroll reveal", reveal::init(&document));
    report("parallax", parallax::init(&window, &document));
    report("hover glow", effects::init_hover_glow(&document));
    report("typing", typing::init(&document, config.typing_effect));
    report("binary stream", effects::init_binary_stream(&document));
    report("keyboard nav", effects::init_keyboard_nav(&document));
}

fn main() {
    console_error_panic_hook::set_once();

    let document = match dom::document() {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::error_1(&format!("startup: {}", e).into());
            return;
        }
    };
    effects::hide_page(&document);
    effects::log_banner();

    if document.ready_state() == "loading" {
        report(
            "startup",
            dom::listen(&document, "DOMContentLoaded", |_: web_sys::Event| start()),
        );
    } else {
        start();
    }
}
