use glow::HasContext;

use dso_core::settings::ScreenColors;
use dso_core::view::{DIVS_SUB, DIVS_TIME, DIVS_VOLTAGE};

use crate::cast_vertices;
use crate::program::{FlatProgram, RendererError};

/// Vertex counts of the three fixed grid regions. Computed once at
/// initialization; grid geometry depends only on the division constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDrawCounts {
    /// Dot grid, drawn as points.
    pub dots: i32,
    /// Axis lines plus tick dashes, drawn as line pairs.
    pub axes: i32,
    /// Plot border, drawn as a line loop.
    pub border: i32,
}

/// Build the static grid geometry: sub-division dot columns and rows, the two
/// axes with their tick dashes, and the border loop. Returns the vertices of
/// all three regions back to back plus the per-region draw counts.
pub fn build_grid() -> (Vec<[f32; 2]>, GridDrawCounts) {
    let mut vertices: Vec<[f32; 2]> = Vec::new();
    let mut counts = GridDrawCounts {
        dots: 0,
        axes: 0,
        border: 0,
    };

    let half_time = DIVS_TIME as i32 / 2;
    let half_voltage = DIVS_VOLTAGE as i32 / 2;

    // Dot columns along the vertical division lines.
    for div in 1..half_time {
        for dot in 1..(half_voltage * DIVS_SUB) {
            let dot_position = dot as f32 / DIVS_SUB as f32;
            counts.dots += 4;
            vertices.push([-div as f32, -dot_position]);
            vertices.push([-div as f32, dot_position]);
            vertices.push([div as f32, -dot_position]);
            vertices.push([div as f32, dot_position]);
        }
    }
    // Dot rows along the horizontal division lines; the crossing points are
    // already covered by the columns.
    for div in 1..half_voltage {
        for dot in 1..(half_time * DIVS_SUB) {
            if dot % DIVS_SUB == 0 {
                continue;
            }
            let dot_position = dot as f32 / DIVS_SUB as f32;
            counts.dots += 4;
            vertices.push([-dot_position, -div as f32]);
            vertices.push([dot_position, -div as f32]);
            vertices.push([-dot_position, div as f32]);
            vertices.push([dot_position, div as f32]);
        }
    }

    // The two axes.
    counts.axes += 4;
    vertices.push([-(DIVS_TIME as f32) / 2.0, 0.0]);
    vertices.push([DIVS_TIME as f32 / 2.0, 0.0]);
    vertices.push([0.0, -(DIVS_VOLTAGE as f32) / 2.0]);
    vertices.push([0.0, DIVS_VOLTAGE as f32 / 2.0]);
    // Tick dashes on the horizontal axis.
    for line in 1..(half_time * DIVS_SUB) {
        let line_position = line as f32 / DIVS_SUB as f32;
        counts.axes += 4;
        vertices.push([line_position, -0.05]);
        vertices.push([line_position, 0.05]);
        vertices.push([-line_position, -0.05]);
        vertices.push([-line_position, 0.05]);
    }
    // Tick dashes on the vertical axis.
    for line in 1..(half_voltage * DIVS_SUB) {
        let line_position = line as f32 / DIVS_SUB as f32;
        counts.axes += 4;
        vertices.push([-0.05, line_position]);
        vertices.push([0.05, line_position]);
        vertices.push([-0.05, -line_position]);
        vertices.push([0.05, -line_position]);
    }

    // Border loop.
    counts.border += 4;
    vertices.push([-(DIVS_TIME as f32) / 2.0, -(DIVS_VOLTAGE as f32) / 2.0]);
    vertices.push([DIVS_TIME as f32 / 2.0, -(DIVS_VOLTAGE as f32) / 2.0]);
    vertices.push([DIVS_TIME as f32 / 2.0, DIVS_VOLTAGE as f32 / 2.0]);
    vertices.push([-(DIVS_TIME as f32) / 2.0, DIVS_VOLTAGE as f32 / 2.0]);

    (vertices, counts)
}

/// The static grid geometry on the GPU: one vertex buffer, three vertex
/// arrays addressing its regions.
pub struct GridBuffers {
    vbo: glow::Buffer,
    vaos: [glow::VertexArray; 3],
    counts: GridDrawCounts,
}

impl GridBuffers {
    pub fn new(gl: &glow::Context, program: &FlatProgram) -> Result<Self, RendererError> {
        let (vertices, counts) = build_grid();
        let region_starts = [0, counts.dots, counts.dots + counts.axes];

        unsafe {
            let vbo = gl.create_buffer().map_err(RendererError::Resource)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                cast_vertices(&vertices),
                glow::STATIC_DRAW,
            );

            let mut vaos = Vec::with_capacity(3);
            for start in region_starts {
                let vao = gl.create_vertex_array().map_err(RendererError::Resource)?;
                gl.bind_vertex_array(Some(vao));
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                gl.enable_vertex_attrib_array(program.attr_vertex);
                gl.vertex_attrib_pointer_f32(
                    program.attr_vertex,
                    2,
                    glow::FLOAT,
                    false,
                    2 * std::mem::size_of::<f32>() as i32,
                    start * 2 * std::mem::size_of::<f32>() as i32,
                );
                vaos.push(vao);
            }
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                vbo,
                vaos: [vaos[0], vaos[1], vaos[2]],
                counts,
            })
        }
    }

    pub fn counts(&self) -> GridDrawCounts {
        self.counts
    }

    /// Draw dots, axes and border in that order.
    pub fn draw(&self, gl: &glow::Context, program: &FlatProgram, screen: &ScreenColors) {
        unsafe {
            gl.line_width(1.0);

            gl.bind_vertex_array(Some(self.vaos[0]));
            program.set_colour(gl, screen.grid);
            gl.draw_arrays(glow::POINTS, 0, self.counts.dots);

            gl.bind_vertex_array(Some(self.vaos[1]));
            program.set_colour(gl, screen.axes);
            gl.draw_arrays(glow::LINES, 0, self.counts.axes);

            gl.bind_vertex_array(Some(self.vaos[2]));
            program.set_colour(gl, screen.border);
            gl.draw_arrays(glow::LINE_LOOP, 0, self.counts.border);

            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            for vao in self.vaos {
                gl.delete_vertex_array(vao);
            }
            gl.delete_buffer(self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_vertex_total() {
        let (vertices, counts) = build_grid();
        assert_eq!(
            vertices.len(),
            (counts.dots + counts.axes + counts.border) as usize
        );
    }

    #[test]
    fn test_counts_are_stable() {
        let (_, a) = build_grid();
        let (_, b) = build_grid();
        assert_eq!(a, b);
    }

    #[test]
    fn test_expected_region_sizes() {
        let (_, counts) = build_grid();
        // 4 dot columns x 19 dots x 4 vertices + 3 dot rows x 20 dots x 4.
        assert_eq!(counts.dots, 4 * 19 * 4 + 3 * 20 * 4);
        // 2 axes (4 vertices) + 24 and 19 tick positions at 4 vertices each.
        assert_eq!(counts.axes, 4 + 24 * 4 + 19 * 4);
        assert_eq!(counts.border, 4);
    }

    #[test]
    fn test_geometry_spans_the_plot_area() {
        let (vertices, _) = build_grid();
        for v in &vertices {
            assert!(v[0].abs() <= DIVS_TIME as f32 / 2.0);
            assert!(v[1].abs() <= DIVS_VOLTAGE as f32 / 2.0);
        }
    }
}
