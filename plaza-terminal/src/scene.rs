/// Per-frame draw list for the plaza: ground, stair tower and primitive showcase
use std::f32::consts::{FRAC_PI_2, PI};

use nalgebra::Matrix4;
use plaza_core::{MeshBuffer, Shape, ShapeLibrary, TransformStack};

/// Anything that can draw a mesh under a model matrix.
pub trait Canvas {
    fn draw_shape(&mut self, mesh: &MeshBuffer, model: &Matrix4<f32>, color: [f32; 3]);
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const STONE: [f32; 3] = [0.8, 0.75, 0.7];

/// Levels in the stair tower; each adds four flights.
pub const TOWER_LEVELS: usize = 9;
pub const STEPS_PER_FLIGHT: usize = 10;
const LEVEL_RISE: f32 = 4.0;

/// Turn and offset of each flight within a level, one per side of the tower.
const FLIGHTS: [(f32, [f32; 3]); 4] = [
    (0.0, [0.0, -2.0, 0.0]),
    (FRAC_PI_2, [2.0, -1.0, 0.0]),
    (PI, [2.0, 0.0, 2.0]),
    (-FRAC_PI_2, [0.0, 1.0, 2.0]),
];

/// Showcase primitives, left to right.
const SHOWCASE: [(Shape, [f32; 3]); 5] = [
    (Shape::Cube, WHITE),
    (Shape::Sphere, [0.9, 0.6, 0.4]),
    (Shape::Torus, [0.4, 0.8, 0.9]),
    (Shape::Cylinder, [0.6, 0.9, 0.5]),
    (Shape::Tube, [0.9, 0.9, 0.4]),
];

/// Issue every draw call of one frame.
///
/// Resets the top of `stack`, turns the whole scene by `turn_angle` about Y
/// and leaves the stack at the depth it started at.
pub fn draw_scene<C: Canvas>(
    stack: &mut TransformStack,
    library: &ShapeLibrary,
    turn_angle: f32,
    canvas: &mut C,
) {
    stack.identity();
    stack.rotate_y(turn_angle);

    {
        let mut ground = stack.save_scoped();
        ground.translate(0.0, -2.0, 0.0);
        ground.scale(50.0, 0.05, 50.0);
        canvas.draw_shape(library.mesh(Shape::Cube), ground.value(), WHITE);
    }

    stack.with_saved(|tower| draw_stair_tower(tower, library, canvas));
    stack.with_saved(|row| draw_showcase(row, library, canvas));
}

fn draw_stair_tower<C: Canvas>(stack: &mut TransformStack, library: &ShapeLibrary, canvas: &mut C) {
    let cube = library.mesh(Shape::Cube);

    for _ in 0..TOWER_LEVELS {
        for &(turn, [x, y, z]) in &FLIGHTS {
            let mut flight = stack.save_scoped();
            flight.rotate_y(turn);
            flight.translate(x, y, z);
            flight.scale(0.2, 0.05, 0.1);
            for _ in 0..STEPS_PER_FLIGHT {
                flight.translate(0.0, 2.0, -2.0);
                canvas.draw_shape(cube, flight.value(), STONE);
            }
        }
        stack.translate(0.0, LEVEL_RISE, 0.0);
    }
}

fn draw_showcase<C: Canvas>(stack: &mut TransformStack, library: &ShapeLibrary, canvas: &mut C) {
    stack.translate(-1.2, -1.6, 4.0);
    // Stand Z-up primitives upright.
    stack.rotate_x(-FRAC_PI_2);
    stack.scale(0.3, 0.3, 0.3);

    for &(shape, color) in &SHOWCASE {
        canvas.draw_shape(library.mesh(shape), stack.value(), color);
        stack.translate(2.0, 0.0, 0.0);
    }
}
