use std::collections::BTreeMap;

use js_sys::{Float32Array, Uint32Array};
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::{BeamsError, Result};
use crate::geometry::{PlaneStack, StripVertex};
use crate::shader::{ShaderSources, UniformValue};

pub fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let stage = if kind == GL::VERTEX_SHADER { "vertex" } else { "fragment" };
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| BeamsError::Dom(format!("unable to create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(BeamsError::ShaderCompile { stage, log })
    }
}

pub fn link_program(gl: &GL, sources: &ShaderSources) -> Result<WebGlProgram> {
    let vert = compile_shader(gl, GL::VERTEX_SHADER, &sources.vertex)?;
    let frag = compile_shader(gl, GL::FRAGMENT_SHADER, &sources.fragment)?;
    let program = gl
        .create_program()
        .ok_or_else(|| BeamsError::Dom("unable to create program".into()))?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    gl.link_program(&program);

    // Shaders are owned by the program once linked.
    gl.delete_shader(Some(&vert));
    gl.delete_shader(Some(&frag));

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(BeamsError::ProgramLink(log))
    }
}

/// GPU copy of a [`PlaneStack`]: one interleaved vertex buffer and one index
/// buffer behind a vertex array.
pub struct MeshBuffers {
    pub vao: WebGlVertexArrayObject,
    pub vertices: WebGlBuffer,
    pub indices: WebGlBuffer,
    pub index_count: i32,
}

impl MeshBuffers {
    pub fn upload(gl: &GL, stack: &PlaneStack) -> Result<Self> {
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| BeamsError::Dom("unable to create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));

        let interleaved = stack.interleaved();
        let floats: &[f32] = bytemuck::cast_slice(&interleaved);
        let vertices = gl
            .create_buffer()
            .ok_or_else(|| BeamsError::Dom("unable to create vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        gl.buffer_data_with_array_buffer_view(
            GL::ARRAY_BUFFER,
            &Float32Array::from(floats),
            GL::STATIC_DRAW,
        );

        let stride = std::mem::size_of::<StripVertex>() as i32;
        let float = std::mem::size_of::<f32>() as i32;
        // Locations match the layout qualifiers in the vertex prefix.
        for (location, size, offset) in [(0u32, 3, 0), (1, 3, 3 * float), (2, 2, 6 * float)] {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, stride, offset);
        }

        let indices = gl
            .create_buffer()
            .ok_or_else(|| BeamsError::Dom("unable to create index buffer".into()))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        gl.buffer_data_with_array_buffer_view(
            GL::ELEMENT_ARRAY_BUFFER,
            &Uint32Array::from(stack.indices()),
            GL::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);
        Ok(Self {
            vao,
            vertices,
            indices,
            index_count: stack.indices().len() as i32,
        })
    }

    pub fn delete(&self, gl: &GL) {
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_buffer(Some(&self.vertices));
        gl.delete_buffer(Some(&self.indices));
    }
}

/// Uniform locations of a linked program, looked up once.
///
/// Names the linker optimised away have no entry and are skipped on write.
pub struct UniformLocations {
    locations: BTreeMap<String, WebGlUniformLocation>,
}

impl UniformLocations {
    pub fn resolve<'a>(
        gl: &GL,
        program: &WebGlProgram,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let locations = names
            .into_iter()
            .filter_map(|name| {
                gl.get_uniform_location(program, name)
                    .map(|location| (name.to_string(), location))
            })
            .collect();
        Self { locations }
    }

    pub fn count(&self) -> usize {
        self.locations.len()
    }

    /// Write one uniform to the program currently in use.
    pub fn set(&self, gl: &GL, name: &str, value: &UniformValue) {
        let Some(location) = self.locations.get(name) else {
            return;
        };
        let location = Some(location);
        match value {
            UniformValue::Float(v) => gl.uniform1f(location, *v),
            UniformValue::Int(v) => gl.uniform1i(location, *v),
            UniformValue::Vec2(v) => gl.uniform2f(location, v.x, v.y),
            UniformValue::Vec3(v) => gl.uniform3f(location, v.x, v.y, v.z),
            UniformValue::Mat3(m) => {
                gl.uniform_matrix3fv_with_f32_array(location, false, &m.to_cols_array())
            }
            UniformValue::Mat4(m) => {
                gl.uniform_matrix4fv_with_f32_array(location, false, &m.to_cols_array())
            }
        }
    }
}
