use web_sys::{Document, Window};
use crate::constants::*;
use crate::dom::{self, Styled};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct HeroFrame {
    pub transform: String,
    pub opacity: String,
}

/// Hero content drifts down and fades while the hero is still on screen.
pub fn hero_frame(scroll_y: f64, viewport_h: f64) -> Option<HeroFrame> {
    if scroll_y >= viewport_h {
        return None;
    }
    Some(HeroFrame {
        transform: format!("translateY({}px)", scroll_y * HERO_PARALLAX_FACTOR),
        opacity: (1.0 - scroll_y / HERO_FADE_DISTANCE).to_string(),
    })
}

/// Rotation for the planet system as it crosses the viewport.
pub fn planet_rotation(viewport_h: f64, rect_top: f64, rect_height: f64) -> Option<String> {
    let progress = (viewport_h - rect_top) / (viewport_h + rect_height);
    if (0.0..=1.0).contains(&progress) {
        Some(format!("rotate({}deg)", progress * PLANET_MAX_ROTATION))
    } else {
        None
    }
}

pub fn apply_hero<E: Styled>(content: &E, frame: &HeroFrame) {
    content.set_style("transform", &frame.transform);
    content.set_style("opacity", &frame.opacity);
}

pub fn init(window: &Window, document: &Document) -> Result<()> {
    let hero = dom::query(document, ".hero")?;
    let hero_content = dom::query(document, ".hero-content")?;

    if let (Some(_), Some(content)) = (hero, hero_content) {
        let w = window.clone();
        dom::listen(window, "scroll", move |_: web_sys::Event| {
            let scroll_y = w.page_y_offset().unwrap_or(0.0);
            let (_, viewport_h) = dom::viewport_size(&w).unwrap_or((0.0, 0.0));
            if let Some(frame) = hero_frame(scroll_y, viewport_h) {
                apply_hero(&content, &frame);
            }
        })?;
    }

    if let Some(planets) = dom::query(document, ".planet-system")? {
        let w = window.clone();
        dom::listen(window, "scroll", move |_: web_sys::Event| {
            let rect = planets.get_bounding_client_rect();
            let (_, viewport_h) = dom::viewport_size(&w).unwrap_or((0.0, 0.0));
            if let Some(rotation) = planet_rotation(viewport_h, rect.top(), rect.height()) {
                planets.set_style("transform", &rotation);
            }
        })?;
    }
    Ok(())
}
