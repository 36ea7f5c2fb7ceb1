/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use plaza_core::{Camera, MeshBuffer, Vertex};
use std::io::Write;

use crate::scene::Canvas;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light falls from above, slightly in front and to the right.
const LIGHT_DIR: [f32; 3] = [0.3, 0.8, 0.5];

/// Lowest brightness so surfaces facing away from the light stay visible.
const AMBIENT: f32 = 0.15;

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    view_projection: Matrix4<f32>,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            view_projection: Matrix4::identity(),
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Use `camera` for every draw until the next call.
    pub fn set_camera(&mut self, camera: &Camera) {
        self.view_projection = camera.view_projection();
    }

    /// Character at a cell, for inspecting a finished frame.
    ///
    /// Panics if `x` or `y` lies outside the renderer's width or height.
    pub fn char_at(&self, x: usize, y: usize) -> char {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} frame",
            x,
            y,
            self.width,
            self.height
        );
        self.char_buffer[y * self.width + x]
    }

    pub fn render_mesh(&mut self, mesh: &MeshBuffer, model_matrix: &Matrix4<f32>, color: [f32; 3]) {
        for triangle in mesh.triangles() {
            self.render_triangle(&triangle, model_matrix, color);
        }
    }

    fn render_triangle(&mut self, triangle: &[Vertex; 3], model_matrix: &Matrix4<f32>, color: [f32; 3]) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coord, vertex) in screen_coords.iter_mut().zip(triangle) {
            match Camera::project_to_screen(
                &self.view_projection,
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *coord = projected,
                None => return, // Triangle is clipped
            }
        }

        // Shade from the averaged vertex normals in world space
        let normal = triangle[0].normal + triangle[1].normal + triangle[2].normal;
        let world_normal = model_matrix.transform_vector(&normal);
        let brightness = match world_normal.try_normalize(1e-6) {
            Some(n) => n.dot(&Vector3::from(LIGHT_DIR).normalize()).max(0.0),
            None => 0.0,
        };
        let brightness = AMBIENT + (1.0 - AMBIENT) * brightness;

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        let tint = |c: f32| (c * brightness * 255.0).clamp(0.0, 255.0) as u8;
        let shade = Color::Rgb {
            r: tint(color[0]),
            g: tint(color[1]),
            b: tint(color[2]),
        };

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character, shade);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates; degenerate strip seams have none
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for AsciiRenderer {
    fn draw_shape(&mut self, mesh: &MeshBuffer, model: &Matrix4<f32>, color: [f32; 3]) {
        self.render_mesh(mesh, model, color);
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
