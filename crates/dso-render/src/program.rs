use glam::Mat4;
use glow::HasContext;
use thiserror::Error;

use dso_core::settings::Color;

use crate::shaders;

/// Why the renderer could not reach its ready state. All variants are
/// permanent for the lifetime of the surface; there is no retry.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("system does not support the OpenGL shading language")]
    UnsupportedContext,
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("shader program linking failed: {0}")]
    ProgramLink(String),
    #[error("shader attribute `{0}` not found")]
    MissingAttribute(&'static str),
    #[error("shader uniform `{0}` not found")]
    MissingUniform(&'static str),
    #[error("GPU resource allocation failed: {0}")]
    Resource(String),
}

/// The single flat-color pipeline every scope element is drawn with.
pub struct FlatProgram {
    program: glow::Program,
    pub attr_vertex: u32,
    loc_matrix: glow::UniformLocation,
    loc_colour: glow::UniformLocation,
}

impl FlatProgram {
    /// Compile and link, picking the desktop or ES source pair by context
    /// capability.
    pub fn compile(gl: &glow::Context) -> Result<Self, RendererError> {
        let version = gl.version();
        if version.major < 2 {
            return Err(RendererError::UnsupportedContext);
        }
        let (vert_src, frag_src) = if version.is_embedded {
            (shaders::FLAT_VERTEX_ES, shaders::FLAT_FRAGMENT_ES)
        } else {
            (shaders::FLAT_VERTEX, shaders::FLAT_FRAGMENT)
        };

        unsafe {
            let program = gl.create_program().map_err(RendererError::Resource)?;

            let vert = compile_shader(gl, glow::VERTEX_SHADER, vert_src)?;
            let frag = match compile_shader(gl, glow::FRAGMENT_SHADER, frag_src) {
                Ok(frag) => frag,
                Err(e) => {
                    gl.delete_shader(vert);
                    return Err(e);
                }
            };

            gl.attach_shader(program, vert);
            gl.attach_shader(program, frag);
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            gl.delete_shader(vert);
            gl.delete_shader(frag);
            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(RendererError::ProgramLink(log));
            }

            let attr_vertex = gl
                .get_attrib_location(program, "vertex")
                .ok_or(RendererError::MissingAttribute("vertex"))?;
            let loc_matrix = gl
                .get_uniform_location(program, "matrix")
                .ok_or(RendererError::MissingUniform("matrix"))?;
            let loc_colour = gl
                .get_uniform_location(program, "colour")
                .ok_or(RendererError::MissingUniform("colour"))?;

            Ok(Self {
                program,
                attr_vertex,
                loc_matrix,
                loc_colour,
            })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(None) }
    }

    pub fn set_matrix(&self, gl: &glow::Context, matrix: &Mat4) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(&self.loc_matrix), false, &matrix.to_cols_array());
        }
    }

    pub fn set_colour(&self, gl: &glow::Context, colour: Color) {
        unsafe {
            gl.uniform_4_f32(
                Some(&self.loc_colour),
                colour[0],
                colour[1],
                colour[2],
                colour[3],
            );
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) }
    }
}

fn compile_shader(
    gl: &glow::Context,
    kind: u32,
    source: &str,
) -> Result<glow::Shader, RendererError> {
    unsafe {
        let shader = gl.create_shader(kind).map_err(RendererError::Resource)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(RendererError::ShaderCompile(log));
        }
        Ok(shader)
    }
}
