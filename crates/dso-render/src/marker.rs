use glow::HasContext;

use dso_core::cursor::marker_vertices;
use dso_core::settings::{ScopeSettings, ViewSettings};

use crate::cast_vertices;
use crate::program::{FlatProgram, RendererError};

/// Vertices per cursor in the marker buffer. Every shape writes exactly this
/// many so cursor index times four addresses its quad.
const VERTICES_PER_CURSOR: usize = 4;

/// The marker vertex buffer: one fixed-size quad region per cursor, rewritten
/// in place whenever a cursor moves or changes shape.
pub struct MarkerBuffers {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    cursor_count: usize,
}

impl MarkerBuffers {
    pub fn new(
        gl: &glow::Context,
        program: &FlatProgram,
        cursor_count: usize,
    ) -> Result<Self, RendererError> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(RendererError::Resource)?;
            let vbo = gl.create_buffer().map_err(RendererError::Resource)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_size(
                glow::ARRAY_BUFFER,
                (cursor_count * VERTICES_PER_CURSOR * 2 * std::mem::size_of::<f32>()) as i32,
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(program.attr_vertex);
            gl.vertex_attrib_pointer_f32(
                program.attr_vertex,
                2,
                glow::FLOAT,
                false,
                2 * std::mem::size_of::<f32>() as i32,
                0,
            );
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                vao,
                vbo,
                cursor_count,
            })
        }
    }

    /// Regenerate every cursor quad and rewrite the buffer. Quads are laid
    /// out in marker-set order: the global pair first, then voltage channel
    /// cursors, then spectrum channel cursors.
    pub fn update(&mut self, gl: &glow::Context, scope: &ScopeSettings) {
        let count = scope.cursor_count();
        let mut vertices: Vec<[f32; 2]> = Vec::with_capacity(count * VERTICES_PER_CURSOR);
        for index in 0..count {
            vertices.extend_from_slice(&marker_vertices(scope.cursor(index)));
        }

        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            if count == self.cursor_count {
                gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, cast_vertices(&vertices));
            } else {
                // Channel count changed under us; reallocate once.
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    cast_vertices(&vertices),
                    glow::STATIC_DRAW,
                );
                self.cursor_count = count;
            }
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    /// Draw every active cursor as a line loop, with triple line width on the
    /// selected one. The global pair is always drawn; channel cursors only
    /// while their channel is in use.
    pub fn draw(
        &self,
        gl: &glow::Context,
        program: &FlatProgram,
        scope: &ScopeSettings,
        view: &ViewSettings,
        selected_cursor: usize,
    ) {
        let emphasis = |index: usize| if index == selected_cursor { 3.0 } else { 1.0 };

        unsafe {
            gl.bind_vertex_array(Some(self.vao));

            program.set_colour(gl, view.screen.markers);
            gl.line_width(emphasis(0));
            gl.draw_arrays(glow::LINE_LOOP, 0, VERTICES_PER_CURSOR as i32);

            let mut index = 1;
            for channel in 0..scope.voltage.len() {
                if scope.voltage[channel].used {
                    let colour = view
                        .screen
                        .voltage
                        .get(channel)
                        .copied()
                        .unwrap_or(view.screen.markers);
                    program.set_colour(gl, colour);
                    gl.line_width(emphasis(index));
                    gl.draw_arrays(
                        glow::LINE_LOOP,
                        (index * VERTICES_PER_CURSOR) as i32,
                        VERTICES_PER_CURSOR as i32,
                    );
                }
                index += 1;
            }
            for channel in 0..scope.spectrum.len() {
                if scope.spectrum[channel].used {
                    let colour = view
                        .screen
                        .spectrum
                        .get(channel)
                        .copied()
                        .unwrap_or(view.screen.markers);
                    program.set_colour(gl, colour);
                    gl.line_width(emphasis(index));
                    gl.draw_arrays(
                        glow::LINE_LOOP,
                        (index * VERTICES_PER_CURSOR) as i32,
                        VERTICES_PER_CURSOR as i32,
                    );
                }
                index += 1;
            }

            gl.line_width(1.0);
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}
