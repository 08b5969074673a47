use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram};

use super::gl::{link_program, MeshBuffers, UniformLocations};
use crate::animation::{FrameClock, TIME_UNIFORM};
use crate::error::{BeamsError, Result};
use crate::scene::{clamp_pixel_ratio, BACKGROUND};
use crate::shader::{UniformValue, BUILTIN_UNIFORMS};
use crate::BeamField;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct RenderState {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    uniforms: UniformLocations,
    mesh: MeshBuffers,
    field: BeamField,
    clock: FrameClock,
}

impl RenderState {
    /// Upload every material uniform. Only `time` and the matrices change
    /// after this, so it runs once at mount.
    fn upload_static_uniforms(&self) {
        self.gl.use_program(Some(&self.program));
        for (name, value) in &self.field.program.uniforms {
            self.uniforms.set(&self.gl, name, value);
        }
    }

    fn frame(&mut self, now_ms: f64) {
        let delta = self.clock.tick(now_ms);
        let time = self.field.tick(delta);

        let (width, height) = (self.canvas.width() as i32, self.canvas.height() as i32);
        let gl = &self.gl;
        gl.viewport(0, 0, width, height);
        gl.clear_color(BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let m = self.field.rig.matrices(aspect);
        let builtins = [
            ("modelMatrix", UniformValue::Mat4(m.model)),
            ("viewMatrix", UniformValue::Mat4(m.view)),
            ("modelViewMatrix", UniformValue::Mat4(m.model_view)),
            ("projectionMatrix", UniformValue::Mat4(m.projection)),
            ("normalMatrix", UniformValue::Mat3(m.normal)),
            ("cameraPosition", UniformValue::Vec3(self.field.rig.camera.position)),
        ];
        for (name, value) in &builtins {
            self.uniforms.set(gl, name, value);
        }
        self.uniforms.set(gl, TIME_UNIFORM, &UniformValue::Float(time));

        gl.bind_vertex_array(Some(&self.mesh.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.mesh.index_count, GL::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);
    }

    fn release(&self) {
        self.mesh.delete(&self.gl);
        self.gl.delete_program(Some(&self.program));
    }
}

/// Size the drawing buffer to the window, at a pixel ratio of 1 to 2.
fn fit_canvas(canvas: &HtmlCanvasElement) {
    let Some(win) = window() else { return };
    let css = |v: std::result::Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    let dpr = clamp_pixel_ratio(win.device_pixel_ratio());
    let w = css(win.inner_width()) * dpr;
    let h = css(win.inner_height()) * dpr;
    canvas.set_width(w.max(1.0) as u32);
    canvas.set_height(h.max(1.0) as u32);
}

struct Mount {
    state: Rc<RefCell<RenderState>>,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    resize: Closure<dyn FnMut()>,
}

/// Handle to a mounted beam field. Freeing it from JS unmounts the field.
#[wasm_bindgen]
pub struct BeamsHandle {
    mount: Option<Mount>,
}

#[wasm_bindgen]
impl BeamsHandle {
    /// Current value of the shader's time uniform.
    pub fn time(&self) -> f32 {
        self.mount
            .as_ref()
            .and_then(|m| m.state.borrow().field.program.time())
            .unwrap_or(0.0)
    }

    /// Stop the loop and free every GL object.
    pub fn unmount(mut self) {
        self.stop();
    }
}

impl Drop for BeamsHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl BeamsHandle {
    fn stop(&mut self) {
        let Some(mount) = self.mount.take() else { return };
        mount.running.set(false);
        if let Some(win) = window() {
            if let Some(id) = mount.frame_id.take() {
                let _ = win.cancel_animation_frame(id);
            }
            let _ = win.remove_event_listener_with_callback(
                "resize",
                mount.resize.as_ref().unchecked_ref(),
            );
        }
        // Drop the frame closure to break its self-reference.
        mount.frame.borrow_mut().take();
        mount.state.borrow().release();
        log::info!("beam field unmounted");
    }
}

pub fn start(canvas: HtmlCanvasElement, field: BeamField) -> Result<BeamsHandle> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or(BeamsError::WebGlUnavailable)?
        .dyn_into()
        .map_err(|_| BeamsError::WebGlUnavailable)?;
    let win = window().ok_or_else(|| BeamsError::Dom("no window".into()))?;

    let sources = field.program.build_sources()?;
    let program = link_program(&gl, &sources)?;
    let uniforms = UniformLocations::resolve(
        &gl,
        &program,
        BUILTIN_UNIFORMS
            .iter()
            .copied()
            .chain(field.program.uniforms.keys().map(String::as_str)),
    );
    let mesh = MeshBuffers::upload(&gl, &field.geometry)?;

    gl.enable(GL::DEPTH_TEST);
    gl.enable(GL::CULL_FACE);
    gl.cull_face(GL::BACK);

    fit_canvas(&canvas);
    let resize = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || fit_canvas(&canvas)) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

    log::info!(
        "beam field mounted: {} strips, {} vertices, {} triangles, {} active uniforms",
        field.geometry.count(),
        field.geometry.vertex_count(),
        field.geometry.triangle_count(),
        uniforms.count()
    );

    let state = Rc::new(RefCell::new(RenderState {
        gl,
        canvas,
        program,
        uniforms,
        mesh,
        field,
        clock: FrameClock::new(),
    }));
    state.borrow().upload_static_uniforms();
    let running = Rc::new(Cell::new(true));
    let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    // `f` holds the animation-frame closure so it can reschedule itself.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    {
        let state = state.clone();
        let running = running.clone();
        let frame_id = frame_id.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if !running.get() {
                return;
            }
            state.borrow_mut().frame(now);

            let Some(win) = window() else { return };
            if let Some(cb) = f.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(err) => log::error!("failed to schedule frame: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }

    if let Some(cb) = g.borrow().as_ref() {
        frame_id.set(Some(win.request_animation_frame(cb.as_ref().unchecked_ref())?));
    }

    Ok(BeamsHandle {
        mount: Some(Mount {
            state,
            frame: g,
            frame_id,
            running,
            resize,
        }),
    })
}
