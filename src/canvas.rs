use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window};
use crate::config::StarfieldConfig;
use crate::dom;
use crate::error::{Error, Result};
use crate::frame_loop::RenderLoop;
use crate::starfield::{Painter, StarColor, Starfield};

const SURFACE_STYLE: [(&str, &str); 7] = [
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
    ("display", "block"),
];

/// Where the starfield finds its container and gets a drawing surface from.
pub trait SurfaceHost {
    type Container;
    type Surface: Painter;

    fn find_container(&self, id: &str) -> Option<Self::Container>;
    fn create_surface(&self, container: &Self::Container) -> Result<Self::Surface>;
    fn viewport(&self) -> Result<(f64, f64)>;
    fn resize_surface(&self, surface: &Self::Surface, w: u32, h: u32);
}

pub struct Mounted<S> {
    pub surface: S,
    pub starfield: Starfield,
}

/// Creates the surface inside the container and seeds the starfield.
/// A missing container is not an error: nothing is created.
pub fn mount<H: SurfaceHost>(
    host: &H,
    config: &StarfieldConfig,
    rng: fastrand::Rng,
) -> Result<Option<Mounted<H::Surface>>> {
    let container = match host.find_container(&config.container_id) {
        Some(c) => c,
        None => return Ok(None),
    };

    let surface = host.create_surface(&container)?;
    let mut starfield = Starfield::new(config, rng);
    fit_to_viewport(host, &surface, &mut starfield)?;
    Ok(Some(Mounted { surface, starfield }))
}

/// Matches the surface to the viewport and regenerates the ambient stars.
pub fn fit_to_viewport<H: SurfaceHost>(
    host: &H,
    surface: &H::Surface,
    starfield: &mut Starfield,
) -> Result<()> {
    let (w, h) = host.viewport()?;
    let w = w.max(0.0) as u32;
    let h = h.max(0.0) as u32;
    host.resize_surface(surface, w, h);
    starfield.resize(w as f64, h as f64);
    Ok(())
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Painter for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: StarColor, alpha: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(&color.rgba(alpha));
        self.ctx.fill();
    }

    fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: StarColor, alpha: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        if let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius) {
            let _ = gradient.add_color_stop(0.0_f32, &color.rgba(alpha));
            let _ = gradient.add_color_stop(1.0_f32, &color.rgba(0.0));
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill();
        }
    }

    fn stroke_trail(&mut self, head: (f64, f64), tail: (f64, f64), alpha: f64, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(head.0, head.1);
        self.ctx.line_to(tail.0, tail.1);
        let gradient = self.ctx.create_linear_gradient(head.0, head.1, tail.0, tail.1);
        let _ = gradient.add_color_stop(0.0_f32, &StarColor::White.rgba(alpha));
        let _ = gradient.add_color_stop(1.0_f32, &StarColor::White.rgba(0.0));
        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }
}

#[derive(Clone)]
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    pub fn new() -> Result<Self> {
        let window = dom::window()?;
        let document = window.document().ok_or(Error::NoDocument)?;
        Ok(Self { window, document })
    }
}

impl SurfaceHost for DomHost {
    type Container = Element;
    type Surface = CanvasSurface;

    fn find_container(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_surface(&self, container: &Element) -> Result<CanvasSurface> {
        let canvas: HtmlCanvasElement = self.document.create_element("canvas")?.unchecked_into();
        let style = canvas.style();
        for (property, value) in SURFACE_STYLE {
            style.set_property(property, value)?;
        }
        container.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(Error::NoContext)?
            .dyn_into()
            .map_err(|_| Error::NoContext)?;
        Ok(CanvasSurface { canvas, ctx })
    }

    fn viewport(&self) -> Result<(f64, f64)> {
        dom::viewport_size(&self.window)
    }

    fn resize_surface(&self, surface: &CanvasSurface, w: u32, h: u32) {
        surface.canvas.set_width(w);
        surface.canvas.set_height(h);
    }
}

struct Scene {
    surface: CanvasSurface,
    starfield: Starfield,
}

/// Mounts the starfield into its container, follows window resizes and
/// starts the frame loop. Returns `None` when the page has no container.
pub fn attach(config: &StarfieldConfig) -> Result<Option<RenderLoop>> {
    let host = DomHost::new()?;
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;

    let rng = fastrand::Rng::with_seed(seed);
    let Mounted { surface, starfield } = match mount(&host, config, rng)? {
        Some(m) => m,
        None => {
            web_sys::console::log_1(
                &format!("starfield: no #{} container, skipping", config.container_id).into(),
            );
            return Ok(None);
        }
    };

    let (w, h) = starfield.size();
    web_sys::console::log_1(
        &format!("starfield: {}x{} with {} stars", w, h, starfield.stars().len()).into(),
    );

    let scene = Rc::new(RefCell::new(Scene { surface, starfield }));

    let scene_resize = scene.clone();
    let host_resize = host.clone();
    dom::listen(&host.window, "resize", move |_: web_sys::Event| {
        let mut s = scene_resize.borrow_mut();
        let Scene { surface, starfield } = &mut *s;
        if let Err(e) = fit_to_viewport(&host_resize, surface, starfield) {
            web_sys::console::error_1(&format!("starfield resize: {}", e).into());
        }
    })?;

    let render_loop = RenderLoop::start(move |_timestamp| {
        let mut s = scene.borrow_mut();
        let Scene { surface, starfield } = &mut *s;
        starfield.tick(surface);
    })?;

    Ok(Some(render_loop))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use super::*;
    use crate::starfield::tests::{Op, RecordingPainter};

    struct FakeHost {
        container: Option<&'static str>,
        viewport: Cell<(f64, f64)>,
        surfaces: Cell<usize>,
        last_size: Cell<(u32, u32)>,
    }

    impl FakeHost {
        fn new(container: Option<&'static str>, w: f64, h: f64) -> Self {
            Self {
                container,
                viewport: Cell::new((w, h)),
                surfaces: Cell::new(0),
                last_size: Cell::new((0, 0)),
            }
        }
    }

    impl SurfaceHost for FakeHost {
        type Container = String;
        type Surface = RecordingPainter;

        fn find_container(&self, id: &str) -> Option<String> {
            self.container.filter(|c| *c == id).map(str::to_string)
        }

        fn create_surface(&self, _container: &String) -> Result<RecordingPainter> {
            self.surfaces.set(self.surfaces.get() + 1);
            Ok(RecordingPainter::default())
        }

        fn viewport(&self) -> Result<(f64, f64)> {
            Ok(self.viewport.get())
        }

        fn resize_surface(&self, _surface: &RecordingPainter, w: u32, h: u32) {
            self.last_size.set((w, h));
        }
    }

    fn rng() -> fastrand::Rng {
        fastrand::Rng::with_seed(5)
    }

    #[test]
    fn missing_container_is_a_silent_no_op() {
        let host = FakeHost::new(None, 1024.0, 768.0);
        let mounted = mount(&host, &StarfieldConfig::default(), rng()).unwrap();

        assert!(mounted.is_none());
        assert_eq!(host.surfaces.get(), 0);
        assert_eq!(host.last_size.get(), (0, 0));
    }

    #[test]
    fn container_with_other_id_is_not_used() {
        let host = FakeHost::new(Some("hero"), 1024.0, 768.0);
        assert!(mount(&host, &StarfieldConfig::default(), rng()).unwrap().is_none());
        assert_eq!(host.surfaces.get(), 0);
    }

    #[test]
    fn mount_sizes_surface_to_viewport() {
        let host = FakeHost::new(Some("starfield"), 1024.7, 768.2);
        let mounted = mount(&host, &StarfieldConfig::default(), rng()).unwrap().unwrap();

        assert_eq!(host.surfaces.get(), 1);
        assert_eq!(host.last_size.get(), (1024, 768));
        assert_eq!(mounted.starfield.size(), (1024.0, 768.0));
        assert_eq!(mounted.starfield.stars().len(), 262);
    }

    #[test]
    fn refit_follows_new_viewport() {
        let host = FakeHost::new(Some("starfield"), 600.0, 500.0);
        let Mounted { mut surface, mut starfield } =
            mount(&host, &StarfieldConfig::default(), rng()).unwrap().unwrap();
        assert_eq!(starfield.stars().len(), 100);

        host.viewport.set((300.0, 200.0));
        fit_to_viewport(&host, &surface, &mut starfield).unwrap();
        assert_eq!(host.last_size.get(), (300, 200));
        assert_eq!(starfield.stars().len(), 20);
        assert_eq!(host.surfaces.get(), 1);

        starfield.tick(&mut surface);
        assert_eq!(surface.ops[0], Op::Clear(300.0, 200.0));
    }
}
