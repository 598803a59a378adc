use crate::{Extent, OffscreenTarget, color::LinearColor};

/// A vertex in pixel coordinates, origin at the top left of the target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    /// Position in pixels.
    pub position: [f32; 2],

    /// Depth in `[0, 1)`, smaller is closer.
    pub depth: f32,
}

impl Vertex {
    /// Creates a new vertex.
    pub const fn new(x: f32, y: f32, depth: f32) -> Self {
        Self {
            position: [x, y],
            depth,
        }
    }
}

/// A flat shaded triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// The corners, in either winding.
    pub vertices: [Vertex; 3],

    /// Linear colour of the triangle.
    pub color: LinearColor,
}

/// An axis aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Top left corner.
    pub min: [f32; 2],

    /// Bottom right corner.
    pub max: [f32; 2],
}

impl Rect {
    /// Creates a rectangle from its position and size.
    pub const fn from_position_size(position: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            min: position,
            max: [position[0] + size[0], position[1] + size[1]],
        }
    }

    /// A rectangle covering the whole extent.
    pub fn covering(extent: Extent) -> Self {
        Self {
            min: [0.0, 0.0],
            max: [extent.width as f32, extent.height as f32],
        }
    }
}

/// Draw commands for a target a camera is rendering into.
///
/// Coverage is evaluated at every sample position of the target using the top-left fill rule, so
/// triangles sharing an edge never cover a sample twice. Depth is tested with `LESS`.
pub struct Frame<'target, 'device> {
    target: &'target mut OffscreenTarget<'device>,
}

impl<'target, 'device> Frame<'target, 'device> {
    pub(crate) fn new(target: &'target mut OffscreenTarget<'device>) -> Self {
        Self { target }
    }

    /// The extent being drawn to.
    pub fn extent(&self) -> Extent {
        self.target.extent()
    }

    /// Clears colour to a value and depth to `1.0`.
    pub fn clear(&mut self, color: LinearColor) {
        self.target.clear(color);
    }

    /// Fills a rectangle at a constant depth, returns the number of samples written.
    pub fn fill_rect(&mut self, rect: Rect, depth: f32, color: LinearColor) -> usize {
        let [x0, y0] = rect.min;
        let [x1, y1] = rect.max;

        let top_left = Vertex::new(x0, y0, depth);
        let top_right = Vertex::new(x1, y0, depth);
        let bottom_left = Vertex::new(x0, y1, depth);
        let bottom_right = Vertex::new(x1, y1, depth);

        self.draw_triangle(&Triangle {
            vertices: [top_left, top_right, bottom_right],
            color,
        }) + self.draw_triangle(&Triangle {
            vertices: [top_left, bottom_right, bottom_left],
            color,
        })
    }

    /// Rasterizes a triangle, returns the number of samples written.
    pub fn draw_triangle(&mut self, triangle: &Triangle) -> usize {
        let [a, mut b, mut c] = triangle.vertices;

        let mut area = edge(a.position, b.position, c.position);
        if area == 0.0 || !area.is_finite() {
            return 0;
        }

        // Normalise the winding so interior samples have positive edge values.
        if area < 0.0 {
            core::mem::swap(&mut b, &mut c);
            area = -area;
        }

        let extent = self.target.extent();
        let Some((x_range, y_range)) = bounds(&[a, b, c], extent) else {
            return 0;
        };

        let top_left = [
            is_top_left(b.position, c.position),
            is_top_left(c.position, a.position),
            is_top_left(a.position, b.position),
        ];

        let positions = self.target.samples().positions();
        let samples_per_pixel = positions.len();
        let mut written = 0;

        for y in y_range {
            for x in x_range.clone() {
                let pixel_index = y as usize * extent.width as usize + x as usize;

                for (sample, offset) in positions.iter().enumerate() {
                    let point = [x as f32 + offset[0], y as f32 + offset[1]];

                    let weights = [
                        edge(b.position, c.position, point),
                        edge(c.position, a.position, point),
                        edge(a.position, b.position, point),
                    ];

                    let covered = weights
                        .iter()
                        .zip(top_left)
                        .all(|(weight, top_left)| *weight > 0.0 || (*weight == 0.0 && top_left));

                    if !covered {
                        continue;
                    }

                    let depth =
                        (weights[0] * a.depth + weights[1] * b.depth + weights[2] * c.depth) / area;

                    let index = pixel_index * samples_per_pixel + sample;
                    if self.target.write_sample(index, depth, triangle.color) {
                        written += 1;
                    }
                }
            }
        }

        written
    }
}

/// Twice the signed area of `a, b, p`, positive when `p` is on the interior side of `a -> b` for a
/// positively wound triangle.
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// With y pointing down and positive winding, top edges run right and left edges run up.
fn is_top_left(from: [f32; 2], to: [f32; 2]) -> bool {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];

    (dy == 0.0 && dx > 0.0) || dy < 0.0
}

/// The pixel ranges touched by the vertices, clipped to the extent.
fn bounds(
    vertices: &[Vertex; 3],
    extent: Extent,
) -> Option<(core::ops::Range<u32>, core::ops::Range<u32>)> {
    let mut min = [f32::INFINITY; 2];
    let mut max = [f32::NEG_INFINITY; 2];

    for vertex in vertices {
        for axis in 0..2 {
            min[axis] = min[axis].min(vertex.position[axis]);
            max[axis] = max[axis].max(vertex.position[axis]);
        }
    }

    let clip = |value: f32, limit: u32| value.clamp(0.0, limit as f32) as u32;

    let x0 = clip(min[0].floor(), extent.width);
    let x1 = clip(max[0].ceil(), extent.width);
    let y0 = clip(min[1].floor(), extent.height);
    let y1 = clip(max[1].ceil(), extent.height);

    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    Some((x0..x1, y0..y1))
}
