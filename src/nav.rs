use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};
use crate::constants::*;
use crate::dom::{self, Attributes, ClassList, Styled};
use crate::error::Result;

const ACTIVE: &str = "active";
const SCROLLED: &str = "scrolled";

const BARS_OPEN: [(&str, &str); 3] = [
    ("transform", "rotate(-45deg) translate(-6px, 6px)"),
    ("opacity", "0"),
    ("transform", "rotate(45deg) translate(-6px, -6px)"),
];
const BARS_CLOSED: [(&str, &str); 3] = [
    ("transform", "none"),
    ("opacity", "1"),
    ("transform", "none"),
];

pub fn set_bars<E: Styled>(bars: &[E], open: bool) {
    let styles = if open { BARS_OPEN } else { BARS_CLOSED };
    for (bar, (property, value)) in bars.iter().zip(styles) {
        bar.set_style(property, value);
    }
}

/// Flips the mobile menu. Returns whether it is now open.
pub fn toggle_menu<E: ClassList + Styled>(menu: &E, hamburger: &E, bars: &[E]) -> bool {
    menu.toggle_class(ACTIVE);
    hamburger.toggle_class(ACTIVE);
    let open = hamburger.has_class(ACTIVE);
    set_bars(bars, open);
    open
}

pub fn close_menu<E: ClassList + Styled>(menu: &E, hamburger: &E, bars: &[E]) {
    menu.remove_class(ACTIVE);
    hamburger.remove_class(ACTIVE);
    set_bars(bars, false);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Mobile dropdown parent: open or close its submenu instead of navigating.
    ToggleDropdown,
    Activate,
}

pub fn link_action(viewport_w: f64, breakpoint: f64, parent_is_dropdown: bool) -> LinkAction {
    if viewport_w <= breakpoint && parent_is_dropdown {
        LinkAction::ToggleDropdown
    } else {
        LinkAction::Activate
    }
}

pub fn activate_link<E: ClassList>(links: &[E], index: usize) {
    for link in links {
        link.remove_class(ACTIVE);
    }
    if let Some(link) = links.get(index) {
        link.add_class(ACTIVE);
    }
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAV_SCROLLED_OFFSET
}

/// Scroll offset that lands a section just below the fixed navbar.
pub fn scroll_top_for(target_offset_top: f64, nav_height: f64) -> f64 {
    target_offset_top - nav_height
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section under the scroll position; the later one wins on overlap.
pub fn active_section(scroll_y: f64, nav_height: f64, sections: &[SectionBox]) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.top - nav_height - SECTION_ACTIVE_MARGIN;
            scroll_y >= top && scroll_y < top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

pub fn highlight_link<E: ClassList + Attributes>(links: &[E], section_id: &str) {
    let href = format!("#{}", section_id);
    for link in links {
        link.remove_class(ACTIVE);
        if link.attr("href").as_deref() == Some(href.as_str()) {
            link.add_class(ACTIVE);
        }
    }
}

fn offset_top(el: &Element) -> f64 {
    dom::as_html(el).map(|h| h.offset_top() as f64).unwrap_or(0.0)
}

fn offset_height(el: &Element) -> f64 {
    dom::as_html(el).map(|h| h.offset_height() as f64).unwrap_or(0.0)
}

struct Menu {
    menu: Element,
    hamburger: Element,
    bars: Vec<Element>,
}

pub fn init(window: &Window, document: &Document, breakpoint: f64) -> Result<()> {
    let links = Rc::new(dom::query_all(document, ".nav-link")?);
    let dropdowns = Rc::new(dom::query_all(document, ".dropdown")?);
    let navbar = dom::query(document, ".navbar")?;

    let menu = match (dom::query(document, ".nav-menu")?, dom::query(document, ".hamburger")?) {
        (Some(menu), Some(hamburger)) => {
            let bars = dom::query_all_within(&hamburger, ".bar")?;
            Some(Rc::new(Menu { menu, hamburger, bars }))
        }
        _ => None,
    };

    if let Some(m) = &menu {
        let m_click = m.clone();
        dom::listen(&m.hamburger, "click", move |_: web_sys::Event| {
            toggle_menu(&m_click.menu, &m_click.hamburger, &m_click.bars);
        })?;
    }

    bind_links(window, &links, menu.clone(), breakpoint)?;
    bind_anchors(window, document, navbar.clone())?;

    if let Some(navbar) = navbar {
        bind_scroll(window, document, navbar, links.clone())?;
    }

    if let Some(m) = menu {
        let timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let w = window.clone();
        dom::listen(window, "resize", move |_: web_sys::Event| {
            let m = m.clone();
            let dropdowns = dropdowns.clone();
            let w = w.clone();
            // Replacing the pending timeout cancels it.
            *timer.borrow_mut() = Some(Timeout::new(NAV_RESIZE_DEBOUNCE_MS, move || {
                let (width, _) = dom::viewport_size(&w).unwrap_or((0.0, 0.0));
                if width > breakpoint {
                    close_menu(&m.menu, &m.hamburger, &m.bars);
                    for d in dropdowns.iter() {
                        d.remove_class(ACTIVE);
                    }
                }
            }));
        })?;
    }

    Ok(())
}

fn bind_links(
    window: &Window,
    links: &Rc<Vec<Element>>,
    menu: Option<Rc<Menu>>,
    breakpoint: f64,
) -> Result<()> {
    for (index, link) in links.iter().enumerate() {
        let all = links.clone();
        let menu = menu.clone();
        let w = window.clone();
        let parent = link.parent_element();
        dom::listen(link, "click", move |e: web_sys::Event| {
            let (width, _) = dom::viewport_size(&w).unwrap_or((0.0, 0.0));
            let dropdown = parent.as_ref().filter(|p| p.has_class("dropdown"));
            if link_action(width, breakpoint, dropdown.is_some()) == LinkAction::ToggleDropdown {
                e.prevent_default();
                if let Some(d) = dropdown {
                    d.toggle_class(ACTIVE);
                }
                return;
            }

            if let Some(m) = &menu {
                if m.menu.has_class(ACTIVE) {
                    close_menu(&m.menu, &m.hamburger, &m.bars);
                }
            }
            activate_link(all.as_slice(), index);
        })?;
    }
    Ok(())
}

fn bind_anchors(window: &Window, document: &Document, navbar: Option<Element>) -> Result<()> {
    for anchor in dom::query_all(document, "a[href^=\"#\"]")? {
        let w = window.clone();
        let doc = document.clone();
        let navbar = navbar.clone();
        let this = anchor.clone();
        dom::listen(&anchor, "click", move |e: web_sys::Event| {
            let href = this.attr("href").unwrap_or_default();
            if href == "#" {
                e.prevent_default();
                return;
            }
            let target = match doc.query_selector(&href) {
                Ok(Some(t)) => t,
                _ => return,
            };
            e.prevent_default();
            let nav_height = navbar.as_ref().map(offset_height).unwrap_or(0.0);
            let opts = ScrollToOptions::new();
            opts.set_top(scroll_top_for(offset_top(&target), nav_height));
            opts.set_behavior(ScrollBehavior::Smooth);
            w.scroll_to_with_scroll_to_options(&opts);
        })?;
    }
    Ok(())
}

fn bind_scroll(
    window: &Window,
    document: &Document,
    navbar: Element,
    links: Rc<Vec<Element>>,
) -> Result<()> {
    let sections = dom::query_all(document, "section[id]")?;
    let w = window.clone();
    dom::listen(window, "scroll", move |_: web_sys::Event| {
        let scroll_y = w.page_y_offset().unwrap_or(0.0);
        if navbar_scrolled(scroll_y) {
            navbar.add_class(SCROLLED);
        } else {
            navbar.remove_class(SCROLLED);
        }

        let boxes: Vec<SectionBox> = sections
            .iter()
            .map(|s| SectionBox {
                id: s.id(),
                top: offset_top(s),
                height: offset_height(s),
            })
            .collect();
        if let Some(id) = active_section(scroll_y, offset_height(&navbar), &boxes) {
            highlight_link(links.as_slice(), id);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeElement;

    fn bars() -> Vec<FakeElement> {
        (0..3).map(|_| FakeElement::default()).collect()
    }

    #[test]
    fn hamburger_toggle_opens_then_closes() {
        let menu = FakeElement::default();
        let burger = FakeElement::default();
        let bars = bars();

        assert!(toggle_menu(&menu, &burger, &bars));
        assert!(menu.has_class("active"));
        assert_eq!(
            bars[0].style("transform").as_deref(),
            Some("rotate(-45deg) translate(-6px, 6px)")
        );
        assert_eq!(bars[1].style("opacity").as_deref(), Some("0"));
        assert_eq!(
            bars[2].style("transform").as_deref(),
            Some("rotate(45deg) translate(-6px, -6px)")
        );

        assert!(!toggle_menu(&menu, &burger, &bars));
        assert!(!menu.has_class("active"));
        assert!(!burger.has_class("active"));
        assert_eq!(bars[0].style("transform").as_deref(), Some("none"));
        assert_eq!(bars[1].style("opacity").as_deref(), Some("1"));
        assert_eq!(bars[2].style("transform").as_deref(), Some("none"));
    }

    #[test]
    fn missing_bars_are_tolerated() {
        let menu = FakeElement::default();
        let burger = FakeElement::default();
        let one = vec![FakeElement::default()];
        toggle_menu(&menu, &burger, &one);
        close_menu(&menu, &burger, &[]);
        assert_eq!(
            one[0].style("transform").as_deref(),
            Some("rotate(-45deg) translate(-6px, 6px)")
        );
    }

    #[test]
    fn dropdown_links_toggle_only_on_narrow_viewports() {
        assert_eq!(link_action(768.0, 768.0, true), LinkAction::ToggleDropdown);
        assert_eq!(link_action(500.0, 768.0, false), LinkAction::Activate);
        assert_eq!(link_action(1024.0, 768.0, true), LinkAction::Activate);
    }

    #[test]
    fn activating_a_link_clears_the_others() {
        let links: Vec<FakeElement> = (0..3).map(|_| FakeElement::default()).collect();
        links[0].add_class("active");
        activate_link(&links, 2);
        assert!(!links[0].has_class("active"));
        assert!(!links[1].has_class("active"));
        assert!(links[2].has_class("active"));
    }

    #[test]
    fn navbar_scrolled_past_threshold() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
        assert_eq!(scroll_top_for(1200.0, 80.0), 1120.0);
    }

    #[test]
    fn active_section_uses_navbar_and_margin_offset() {
        let section = |id: &str, top: f64, height: f64| SectionBox {
            id: id.into(),
            top,
            height,
        };
        let sections = vec![
            section("home", 0.0, 800.0),
            section("about", 800.0, 600.0),
            section("codebook", 1400.0, 900.0),
        ];
        // about spans [620, 1220) with an 80px navbar
        assert_eq!(active_section(619.0, 80.0, &sections), Some("home"));
        assert_eq!(active_section(620.0, 80.0, &sections), Some("about"));
        assert_eq!(active_section(1300.0, 80.0, &sections), Some("codebook"));
        assert_eq!(active_section(5000.0, 80.0, &sections), None);
    }

    #[test]
    fn highlight_matches_href() {
        let links = vec![
            FakeElement::default().with_attr("href", "#home"),
            FakeElement::default().with_attr("href", "#about"),
            FakeElement::default(),
        ];
        links[0].add_class("active");
        highlight_link(&links, "about");
        assert!(!links[0].has_class("active"));
        assert!(links[1].has_class("active"));
        assert!(!links[2].has_class("active"));
    }
}
