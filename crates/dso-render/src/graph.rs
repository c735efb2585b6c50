use glow::HasContext;

use dso_core::snapshot::CaptureSnapshot;

use crate::cast_vertices;
use crate::program::FlatProgram;

/// GPU buffers for one channel's trace inside one history slot. Buffers are
/// created lazily on the first write and then rewritten in place; they only
/// reallocate when a frame outgrows the previous capacity.
#[derive(Default)]
struct ChannelTrace {
    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    capacity: usize,
    vertex_count: i32,
}

impl ChannelTrace {
    fn write(&mut self, gl: &glow::Context, program: &FlatProgram, points: &[[f32; 2]]) {
        if points.is_empty() {
            self.vertex_count = 0;
            return;
        }

        unsafe {
            if self.vbo.is_none() {
                match (gl.create_vertex_array(), gl.create_buffer()) {
                    (Ok(vao), Ok(vbo)) => {
                        gl.bind_vertex_array(Some(vao));
                        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                        gl.enable_vertex_attrib_array(program.attr_vertex);
                        gl.vertex_attrib_pointer_f32(
                            program.attr_vertex,
                            2,
                            glow::FLOAT,
                            false,
                            2 * std::mem::size_of::<f32>() as i32,
                            0,
                        );
                        self.vao = Some(vao);
                        self.vbo = Some(vbo);
                    }
                    (vao, vbo) => {
                        log::error!("failed to allocate trace buffers: {vao:?} {vbo:?}");
                        self.vertex_count = 0;
                        return;
                    }
                }
            } else {
                gl.bind_vertex_array(self.vao);
                gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
            }

            let bytes = cast_vertices(points);
            if bytes.len() > self.capacity {
                gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::DYNAMIC_DRAW);
                self.capacity = bytes.len();
            } else {
                gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, bytes);
            }
            self.vertex_count = points.len() as i32;

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn draw(&self, gl: &glow::Context, mode: u32) {
        if self.vertex_count == 0 {
            return;
        }
        if let Some(vao) = self.vao {
            unsafe {
                gl.bind_vertex_array(Some(vao));
                gl.draw_arrays(mode, 0, self.vertex_count);
                gl.bind_vertex_array(None);
            }
        }
    }

    fn destroy(&self, gl: &glow::Context) {
        unsafe {
            if let Some(vao) = self.vao {
                gl.delete_vertex_array(vao);
            }
            if let Some(vbo) = self.vbo {
                gl.delete_buffer(vbo);
            }
        }
    }
}

/// All trace buffers of one retained history frame: a voltage and a spectrum
/// trace per channel.
#[derive(Default)]
pub struct TraceGraph {
    voltage: Vec<ChannelTrace>,
    spectrum: Vec<ChannelTrace>,
}

impl TraceGraph {
    /// Rewrite this slot's buffers from a freshly arrived snapshot. Channels
    /// missing from the snapshot draw nothing this round.
    pub fn write(&mut self, gl: &glow::Context, program: &FlatProgram, snapshot: &CaptureSnapshot) {
        let channels = snapshot.channel_count();
        self.voltage.resize_with(channels, ChannelTrace::default);
        self.spectrum.resize_with(channels, ChannelTrace::default);

        for channel in 0..channels {
            match snapshot.channel(channel) {
                Some(traces) => {
                    self.voltage[channel].write(gl, program, &traces.voltage);
                    self.spectrum[channel].write(gl, program, &traces.spectrum);
                }
                None => {
                    self.voltage[channel].vertex_count = 0;
                    self.spectrum[channel].vertex_count = 0;
                }
            }
        }
    }

    pub fn draw_voltage(&self, gl: &glow::Context, channel: usize, mode: u32) {
        if let Some(trace) = self.voltage.get(channel) {
            trace.draw(gl, mode);
        }
    }

    pub fn draw_spectrum(&self, gl: &glow::Context, channel: usize, mode: u32) {
        if let Some(trace) = self.spectrum.get(channel) {
            trace.draw(gl, mode);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        for trace in self.voltage.iter().chain(self.spectrum.iter()) {
            trace.destroy(gl);
        }
    }
}
