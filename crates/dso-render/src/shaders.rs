// ── Flat color shaders ──────────────────────────────────────────────
//
// One pipeline draws everything on the scope surface: grid dots, axis
// lines, border, marker outlines and trace polylines. Vertices are 2-D
// division-space positions; `matrix` carries the projection (and the zoom
// transform while traces are drawn in the magnified view).

pub const FLAT_VERTEX: &str = r#"#version 330 core

in vec2 vertex;

uniform mat4 matrix;

void main() {
    gl_Position = matrix * vec4(vertex, 0.0, 1.0);
    gl_PointSize = 1.0;
}
"#;

pub const FLAT_FRAGMENT: &str = r#"#version 330 core

uniform vec4 colour;

out vec4 frag_colour;

void main() {
    frag_colour = colour;
}
"#;

// ── GLES variants for embedded contexts ─────────────────────────────

pub const FLAT_VERTEX_ES: &str = r#"#version 100

attribute highp vec2 vertex;

uniform highp mat4 matrix;

void main() {
    gl_Position = matrix * vec4(vertex, 0.0, 1.0);
    gl_PointSize = 1.0;
}
"#;

pub const FLAT_FRAGMENT_ES: &str = r#"#version 100

precision highp float;

uniform vec4 colour;

void main() {
    gl_FragColor = colour;
}
"#;
