#![cfg(target_arch = "wasm32")]

use beams_wasm::shader::{compose_displacement_shader, BaseMaterial};
use beams_wasm::BeamField;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::WebGl2RenderingContext as GL;

wasm_bindgen_test_configure!(run_in_browser);

fn test_context() -> GL {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas
        .get_context("webgl2")
        .unwrap()
        .expect("WebGL2 not supported")
        .dyn_into::<GL>()
        .unwrap()
}

fn compiles(gl: &GL, kind: u32, source: &str) -> Result<(), String> {
    let shader = gl.create_shader(kind).unwrap();
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(())
    } else {
        Err(gl.get_shader_info_log(&shader).unwrap_or_default())
    }
}

#[wasm_bindgen_test]
fn beam_program_compiles_on_every_base() {
    let gl = test_context();
    let field = BeamField::new(Default::default()).unwrap();
    let cfg = beams_wasm::shader::beam_compose_config(&field.config, &field.rig);
    for base in [
        BaseMaterial::Standard,
        BaseMaterial::Physical,
        BaseMaterial::Lambert,
        BaseMaterial::Basic,
    ] {
        let sources = compose_displacement_shader(base, &cfg).build_sources().unwrap();
        compiles(&gl, GL::VERTEX_SHADER, &sources.vertex).unwrap();
        compiles(&gl, GL::FRAGMENT_SHADER, &sources.fragment).unwrap();
    }
}

#[wasm_bindgen_test]
fn mount_and_unmount() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();

    let handle = beams_wasm::mount(canvas, Some(r#"{"beamNumber": 3}"#.to_string())).unwrap();
    assert_eq!(handle.time(), 0.0);
    handle.unmount();
}

#[wasm_bindgen_test]
fn oversized_beam_count_is_refused_without_aborting() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    let result = beams_wasm::mount(canvas, Some(r#"{"beamNumber": 4000000000}"#.to_string()));
    assert!(result.is_err());
}
