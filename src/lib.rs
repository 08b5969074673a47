#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Noise-displaced beam field rendered with WebGL2.
//!
//! The geometry, shader composition, noise and animation modules are plain
//! Rust and build on any target; only `wasm` touches the browser.

pub mod animation;
pub mod color;
pub mod config;
pub mod displacement;
pub mod error;
pub mod geometry;
pub mod noise;
pub mod scene;
pub mod shader;

pub use animation::{AnimationDriver, FrameClock};
pub use config::BeamsConfig;
pub use error::{BeamsError, Result};
pub use geometry::{build_plane_stack, PlaneStack};
pub use noise::NoiseField;
pub use shader::{compose_displacement_shader, BaseMaterial, ComposeConfig, ShaderProgram};

/// Everything built once at mount, before any GL object exists.
#[derive(Clone, Debug)]
pub struct BeamField {
    pub config: BeamsConfig,
    pub rig: scene::SceneRig,
    pub geometry: PlaneStack,
    pub program: ShaderProgram,
    pub driver: AnimationDriver,
}

impl BeamField {
    pub fn new(config: BeamsConfig) -> Result<Self> {
        config.validate()?;
        let rig = scene::SceneRig::new(config.rotation, config.light()?);
        let geometry = PlaneStack::build(
            config.beam_number,
            config.beam_width,
            config.beam_height,
            config::STRIP_SPACING,
            config::HEIGHT_SEGMENTS,
        );
        let program = compose_displacement_shader(
            BaseMaterial::Standard,
            &shader::beam_compose_config(&config, &rig),
        );
        program.check_uniforms()?;
        Ok(Self {
            config,
            rig,
            geometry,
            program,
            driver: AnimationDriver::default(),
        })
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self, delta_secs: f32) -> f32 {
        self.driver.advance(&mut self.program, delta_secs)
    }
}

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::{BeamField, BeamsConfig, BeamsError};

    mod gl;
    mod render;

    pub use render::BeamsHandle;

    /// Canvas the page provides for the background.
    const CANVAS_ID: &str = "c";
    /// JSON config attribute on the canvas.
    const CONFIG_ATTRIBUTE: &str = "data-beams";

    thread_local! {
        static AUTO_MOUNT: RefCell<Option<BeamsHandle>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id(CANVAS_ID) else {
            log::info!("no #{CANVAS_ID} canvas, waiting for mount()");
            return Ok(());
        };
        let canvas = element.dyn_into::<web_sys::HtmlCanvasElement>()?;
        let json = canvas.get_attribute(CONFIG_ATTRIBUTE).unwrap_or_default();

        match mount(canvas, Some(json)) {
            Ok(handle) => AUTO_MOUNT.with(|slot| *slot.borrow_mut() = Some(handle)),
            // Decoration only: the page stays usable without it.
            Err(err) => log::warn!("beam background not mounted: {err:?}"),
        }
        Ok(())
    }

    /// Mount the beam field on `canvas`. `config` is optional JSON.
    #[wasm_bindgen]
    pub fn mount(
        canvas: web_sys::HtmlCanvasElement,
        config: Option<String>,
    ) -> Result<BeamsHandle, JsValue> {
        let config = BeamsConfig::from_json(config.as_deref().unwrap_or(""))?;
        let field = BeamField::new(config)?;
        Ok(render::start(canvas, field)?)
    }

    /// Stop the automatically mounted field, if any.
    #[wasm_bindgen]
    pub fn unmount_auto() {
        AUTO_MOUNT.with(|slot| {
            if let Some(handle) = slot.borrow_mut().take() {
                handle.unmount();
            }
        });
    }

    impl From<JsValue> for BeamsError {
        fn from(value: JsValue) -> Self {
            BeamsError::Dom(format!("{value:?}"))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, unmount_auto, BeamsHandle};

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
