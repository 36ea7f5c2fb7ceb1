/// Scene-graph transform stack and cursor-driven turn state
use std::ops::{Deref, DerefMut};

use nalgebra::{Matrix4, Point3};

use crate::algebra;
use crate::error::TransformError;

/// A stack of model matrices with save/restore semantics.
///
/// Starts with a single identity matrix. Composition operations multiply the
/// current top on the right, so each new operation acts in the local frame
/// established by the ones before it.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Matrix4<f32>>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: vec![algebra::identity()],
        }
    }

    /// Number of matrices on the stack; 1 when balanced.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The current top matrix.
    pub fn value(&self) -> &Matrix4<f32> {
        // The base matrix is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4<f32> {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    fn compose(&mut self, m: Matrix4<f32>) {
        let top = self.top_mut();
        *top = algebra::multiply(top, &m);
    }

    /// Replace the current top with the identity.
    pub fn identity(&mut self) {
        *self.top_mut() = algebra::identity();
    }

    /// Push a copy of the current top.
    pub fn save(&mut self) {
        let top = *self.value();
        self.stack.push(top);
    }

    /// Discard the current top, returning to the matrix before the last `save`.
    pub fn restore(&mut self) -> Result<(), TransformError> {
        if self.stack.len() <= 1 {
            return Err(TransformError::StackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }

    /// Save, returning a guard that restores when dropped.
    ///
    /// On drop the stack is cut back to the depth it had before this save,
    /// whatever saves or restores ran inside the scope.
    pub fn save_scoped(&mut self) -> SavedTransform<'_> {
        let depth = self.depth();
        self.save();
        SavedTransform { stack: self, depth }
    }

    /// Run `f` between a save and its matching restore.
    pub fn with_saved<R>(&mut self, f: impl FnOnce(&mut TransformStack) -> R) -> R {
        let mut scope = self.save_scoped();
        f(&mut scope)
    }

    pub fn rotate_x(&mut self, theta: f32) {
        self.compose(algebra::rotate_x(theta));
    }

    pub fn rotate_y(&mut self, theta: f32) {
        self.compose(algebra::rotate_y(theta));
    }

    pub fn rotate_z(&mut self, theta: f32) {
        self.compose(algebra::rotate_z(theta));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.compose(algebra::scale(x, y, z));
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.compose(algebra::translate(x, y, z));
    }

    /// Map a model-space point through the current top.
    pub fn transform_point(&self, p: &Point3<f32>) -> Point3<f32> {
        self.value().transform_point(p)
    }

    /// Drop back to depth 1 with an identity top.
    ///
    /// Returns the number of unmatched saves that were discarded.
    pub fn end_frame(&mut self) -> usize {
        let leaked = self.stack.len() - 1;
        if leaked > 0 {
            log::warn!("Frame ended with {} unmatched transform save(s)", leaked);
        }
        self.stack.truncate(1);
        self.identity();
        leaked
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard returned by [`TransformStack::save_scoped`].
pub struct SavedTransform<'a> {
    stack: &'a mut TransformStack,
    depth: usize,
}

impl Deref for SavedTransform<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for SavedTransform<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for SavedTransform<'_> {
    fn drop(&mut self) {
        let depth = self.stack.depth();
        if depth < self.depth {
            log::error!(
                "Transform scope restored past its save: depth {} below {}",
                depth,
                self.depth
            );
        } else if depth > self.depth + 1 {
            log::warn!(
                "Transform scope ended with {} unmatched save(s)",
                depth - self.depth - 1
            );
        }
        self.stack.stack.truncate(self.depth.max(1));
    }
}

/// Accumulated Y-axis turn driven by horizontal cursor drags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnState {
    pub angle: f32,
    previous: Option<[f32; 3]>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a cursor sample `[x, y, pressed]` with x and y in `[-1, 1]`.
    ///
    /// The angle advances by twice the horizontal travel while the cursor
    /// is held on both this and the previous sample.
    pub fn update(&mut self, cursor: [f32; 3]) {
        if let Some(prev) = self.previous {
            if cursor[2] != 0.0 && prev[2] != 0.0 {
                self.angle += 2.0 * (cursor[0] - prev[0]);
            }
        }
        self.previous = Some(cursor);
    }

    /// Rotate by a fixed amount, independent of the cursor.
    pub fn nudge(&mut self, delta: f32) {
        self.angle += delta;
    }
}

/// Normalize a pixel cursor position into `[-1, 1]` with y pointing up.
pub fn cursor_to_ndc(column: f32, row: f32, width: f32, height: f32, pressed: bool) -> [f32; 3] {
    [
        column / width * 2.0 - 1.0,
        1.0 - row / height * 2.0,
        if pressed { 1.0 } else { 0.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        (a - b).norm() < 1e-6
    }

    #[test]
    fn test_new_stack_is_identity() {
        let stack = TransformStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.value(), Matrix4::identity());
    }

    #[test]
    fn test_save_translate_restore_is_unchanged() {
        let mut stack = TransformStack::new();
        stack.rotate_y(0.4);
        let before = *stack.value();

        stack.save();
        stack.translate(1.0, 0.0, 0.0);
        assert!(!approx_eq(stack.value(), &before));
        stack.restore().unwrap();

        assert_eq!(*stack.value(), before);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_save_copies_by_value() {
        let mut stack = TransformStack::new();
        stack.translate(0.0, 1.0, 0.0);
        stack.save();
        stack.scale(3.0, 3.0, 3.0);
        stack.restore().unwrap();
        assert_eq!(*stack.value(), algebra::translate(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_restore_at_base_is_error() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.restore(), Err(TransformError::StackUnderflow));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_identity_keeps_depth() {
        let mut stack = TransformStack::new();
        stack.save();
        stack.translate(5.0, 0.0, 0.0);
        stack.identity();
        assert_eq!(stack.depth(), 2);
        assert_eq!(*stack.value(), Matrix4::identity());
    }

    #[test]
    fn test_nested_composition_maps_local_point() {
        let mut stack = TransformStack::new();
        stack.save();
        stack.translate(10.0, 0.0, 0.0);
        stack.save();
        stack.scale(2.0, 2.0, 2.0);
        // Child scale applies first, then parent translation.
        let p = stack.transform_point(&Point3::new(1.0, 1.0, 0.0));
        assert!((p - Point3::new(12.0, 2.0, 0.0)).norm() < 1e-6);
        stack.restore().unwrap();

        let p = stack.transform_point(&Point3::new(1.0, 1.0, 0.0));
        assert!((p - Point3::new(11.0, 1.0, 0.0)).norm() < 1e-6);
        stack.restore().unwrap();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_operations_compose_in_local_frame() {
        let mut stack = TransformStack::new();
        stack.rotate_z(std::f32::consts::FRAC_PI_2);
        stack.translate(1.0, 0.0, 0.0);
        // Translation along local x, which the rotation turned into world y.
        let p = stack.transform_point(&Point3::origin());
        assert!((p - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_scoped_save_restores_on_drop() {
        let mut stack = TransformStack::new();
        {
            let mut scope = stack.save_scoped();
            scope.translate(1.0, 2.0, 3.0);
            assert_eq!(scope.depth(), 2);
            {
                let mut inner = scope.save_scoped();
                inner.rotate_x(1.0);
                assert_eq!(inner.depth(), 3);
            }
            assert_eq!(*scope.value(), algebra::translate(1.0, 2.0, 3.0));
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.value(), Matrix4::identity());
    }

    fn bail() -> Result<(), &'static str> {
        Err("bail")
    }

    #[test]
    fn test_with_saved_restores_on_early_return() {
        let mut stack = TransformStack::new();
        let result: Result<(), &str> = stack.with_saved(|s| {
            s.translate(4.0, 0.0, 0.0);
            bail()?;
            s.scale(2.0, 2.0, 2.0);
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.value(), Matrix4::identity());
    }

    #[test]
    fn test_with_saved_ignores_inner_restore() {
        let mut stack = TransformStack::new();
        stack.save();
        stack.translate(7.0, 0.0, 0.0);
        stack.with_saved(|s| {
            s.translate(1.0, 0.0, 0.0);
            s.restore().unwrap();
        });
        assert_eq!(stack.depth(), 2);
        assert_eq!(*stack.value(), algebra::translate(7.0, 0.0, 0.0));
    }

    #[test]
    fn test_with_saved_discards_inner_unmatched_saves() {
        let mut stack = TransformStack::new();
        stack.translate(0.0, 3.0, 0.0);
        stack.with_saved(|s| {
            s.save();
            s.scale(2.0, 2.0, 2.0);
            s.save();
            s.rotate_z(1.0);
        });
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.value(), algebra::translate(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_scope_survives_inner_end_frame() {
        let mut stack = TransformStack::new();
        stack.save();
        {
            let mut scope = stack.save_scoped();
            scope.end_frame();
        }
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_end_frame_discards_unmatched_saves() {
        let mut stack = TransformStack::new();
        stack.save();
        stack.save();
        stack.translate(1.0, 1.0, 1.0);
        assert_eq!(stack.end_frame(), 2);
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.value(), Matrix4::identity());
        assert_eq!(stack.end_frame(), 0);
    }

    #[test]
    fn test_turn_state_requires_held_cursor() {
        let mut turn = TurnState::new();
        turn.update([0.0, 0.0, 1.0]);
        turn.update([0.25, 0.0, 1.0]);
        assert!((turn.angle - 0.5).abs() < 1e-6);

        // Released: movement is ignored.
        turn.update([0.75, 0.0, 0.0]);
        turn.update([-0.5, 0.0, 1.0]);
        assert!((turn.angle - 0.5).abs() < 1e-6);

        turn.nudge(-0.5);
        assert!(turn.angle.abs() < 1e-6);
    }

    #[test]
    fn test_cursor_to_ndc() {
        assert_eq!(cursor_to_ndc(0.0, 0.0, 80.0, 24.0, true), [-1.0, 1.0, 1.0]);
        assert_eq!(cursor_to_ndc(40.0, 12.0, 80.0, 24.0, false), [0.0, 0.0, 0.0]);
    }
}
