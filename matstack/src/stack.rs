//! Fixed-capacity stack of 4x4 transform matrices
//!
//! Resembles the matrix stack known from legacy OpenGL: push a copy of the
//! current transform, mutate the copy with translate/scale/rotate/multiply,
//! pop back to the parent. Matrix math is SIMD-optimized via glam.
//!
//! As with the OpenGL original there is no way to get hold of a matrix
//! instance inside the stack; callers only ever receive value copies of the
//! current matrix via [`MatrixStack::get`].

use crate::error::StackError;
use glam::Mat4;

/// A bounded stack of 4x4 transform matrices with a cursor
///
/// Storage is a contiguous arena of `capacity` matrices, preallocated at
/// construction and never resized, so `push` and `pop` only move the cursor.
/// All mutating operators act in place on the matrix at the cursor (the
/// "current" matrix).
///
/// The composition operators right-multiply their delta `D` against the
/// current matrix `C`, giving `C * D`: when the result transforms a vector,
/// the most recently applied operator takes effect first. This matches
/// nested coordinate-frame traversal, parent transform outermost.
///
/// This is a thread-confined scratch structure, one per traversal context;
/// sharing it across threads requires external synchronization.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    /// Matrix arena; length is fixed at construction
    mats: Vec<Mat4>,
    /// Index of the current matrix within `mats`
    curr: usize,
}

impl MatrixStack {
    /// Create a new stack with room for `capacity` matrices
    ///
    /// The cursor starts at depth 0 with the current matrix set to identity.
    /// All slots are materialized up front so no later operation allocates.
    pub fn new(capacity: usize) -> Result<Self, StackError> {
        if capacity < 1 {
            return Err(StackError::InvalidCapacity(capacity));
        }
        Ok(MatrixStack {
            mats: vec![Mat4::IDENTITY; capacity],
            curr: 0,
        })
    }

    /// Number of slots this stack was created with
    pub fn capacity(&self) -> usize {
        self.mats.len()
    }

    /// Current cursor depth; 0 is the bottom matrix
    pub fn depth(&self) -> usize {
        self.curr
    }

    /// Reset to the just-constructed state
    ///
    /// Sets the cursor back to the bottom and resets that matrix to
    /// identity. Deeper slots keep whatever stale values they hold; `push`
    /// always overwrites a slot before the cursor can expose it.
    pub fn clear(&mut self) {
        self.curr = 0;
        self.mats[0] = Mat4::IDENTITY;
    }

    /// Replace the current matrix with a copy of `mat`
    pub fn load_matrix(&mut self, mat: &Mat4) {
        self.mats[self.curr] = *mat;
    }

    /// Reset the current matrix to identity
    pub fn load_identity(&mut self) {
        self.mats[self.curr] = Mat4::IDENTITY;
    }

    /// Get a value copy of the current matrix
    pub fn get(&self) -> Mat4 {
        self.mats[self.curr]
    }

    /// Duplicate the current matrix into the next slot and advance
    ///
    /// The new current matrix starts out numerically identical to its
    /// parent. Fails with [`StackError::Overflow`] when the cursor is
    /// already at the last slot, leaving the stack unchanged.
    pub fn push(&mut self) -> Result<(), StackError> {
        if self.curr == self.mats.len() - 1 {
            return Err(StackError::Overflow {
                capacity: self.mats.len(),
            });
        }
        self.mats[self.curr + 1] = self.mats[self.curr];
        self.curr += 1;
        Ok(())
    }

    /// Retreat the cursor to the parent matrix
    ///
    /// The vacated slot is left untouched; the next `push` overwrites it
    /// before it can be read again. Fails with [`StackError::Underflow`]
    /// at depth 0, leaving the stack unchanged.
    pub fn pop(&mut self) -> Result<(), StackError> {
        if self.curr == 0 {
            return Err(StackError::Underflow);
        }
        self.curr -= 1;
        Ok(())
    }

    /// Apply a translation to the current matrix
    ///
    /// With `C` the current matrix and `T` the translation, the new current
    /// matrix is `C * T`: transforming a vector with the result applies the
    /// translation first.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let c = &mut self.mats[self.curr];
        // T only differs from identity in its translation column, so only
        // w_axis changes: C's basis columns weighted by (x, y, z) plus the
        // original translation. The right-hand side is evaluated in full
        // before the store, so no component is read after being written.
        c.w_axis = c.x_axis * x + c.y_axis * y + c.z_axis * z + c.w_axis;
    }

    /// Apply scaling to the current matrix
    ///
    /// With `C` the current matrix and `S` the scaling, the new current
    /// matrix is `C * S`: the scaling is applied first.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        let c = &mut self.mats[self.curr];
        // S is diagonal: each basis column scales independently and the
        // translation column is untouched.
        c.x_axis *= x;
        c.y_axis *= y;
        c.z_axis *= z;
    }

    /// Apply an axis-angle rotation to the current matrix
    ///
    /// `ang` is in degrees. The axis `(x, y, z)` is used as given;
    /// normalization is the caller's responsibility. With `C` the current
    /// matrix and `R` the rotation, the new current matrix is `C * R`: the
    /// rotation is applied first.
    pub fn rotate(&mut self, ang: f32, x: f32, y: f32, z: f32) {
        let c = &mut self.mats[self.curr];

        // Rodrigues closed form for R's upper-left 3x3; R carries no
        // translation. rMN is R's column-M, row-N component.
        let (sin, cos) = ang.to_radians().sin_cos();
        let omc = 1.0 - cos;
        let r00 = cos + x * x * omc;
        let r01 = y * x * omc + z * sin;
        let r02 = z * x * omc - y * sin;
        let r10 = x * y * omc - z * sin;
        let r11 = cos + y * y * omc;
        let r12 = z * y * omc + x * sin;
        let r20 = x * z * omc + y * sin;
        let r21 = y * z * omc - x * sin;
        let r22 = cos + z * z * omc;

        // Every rotated column mixes all three of C's basis columns, so
        // snapshot them before writing anything back.
        let cx = c.x_axis;
        let cy = c.y_axis;
        let cz = c.z_axis;
        c.x_axis = cx * r00 + cy * r01 + cz * r02;
        c.y_axis = cx * r10 + cy * r11 + cz * r12;
        c.z_axis = cx * r20 + cy * r21 + cz * r22;
        // w_axis passes through unchanged: R contributes no translation.
    }

    /// Right-multiply `mat` against the current matrix
    ///
    /// Generic fallback for deltas with no closed-form shortcut. With `C`
    /// the current matrix the new current matrix is `C * mat`: `mat` is
    /// applied first.
    pub fn mult_matrix(&mut self, mat: &Mat4) {
        self.mats[self.curr] = self.mats[self.curr] * *mat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    const EPS: f32 = 1e-6;

    #[test]
    fn test_new_starts_at_identity() {
        for capacity in [1, 4, 32] {
            let stack = MatrixStack::new(capacity).unwrap();
            assert_eq!(stack.depth(), 0);
            assert_eq!(stack.capacity(), capacity);
            assert_eq!(stack.get(), Mat4::IDENTITY);
        }
    }

    #[test]
    fn test_new_invalid_capacity() {
        assert_eq!(
            MatrixStack::new(0).unwrap_err(),
            StackError::InvalidCapacity(0)
        );
    }

    #[test]
    fn test_push_pop_round_trip() {
        let mut stack = MatrixStack::new(4).unwrap();
        stack.translate(1.0, 2.0, 3.0);
        stack.rotate(30.0, 0.0, 1.0, 0.0);
        let before = stack.get();

        stack.push().unwrap();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.get(), before); // child starts as a copy

        stack.scale(2.0, 2.0, 2.0);
        stack.translate(-5.0, 0.0, 1.0);
        stack.pop().unwrap();

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.get(), before);
    }

    #[test]
    fn test_push_overflow_leaves_state_unchanged() {
        let mut stack = MatrixStack::new(3).unwrap();
        stack.push().unwrap();
        stack.push().unwrap();

        let top = stack.get();
        assert_eq!(
            stack.push().unwrap_err(),
            StackError::Overflow { capacity: 3 }
        );
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.get(), top);
    }

    #[test]
    fn test_pop_underflow_leaves_state_unchanged() {
        let mut stack = MatrixStack::new(2).unwrap();
        stack.translate(7.0, 0.0, 0.0);
        let bottom = stack.get();

        assert_eq!(stack.pop().unwrap_err(), StackError::Underflow);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.get(), bottom);
    }

    #[test]
    fn test_single_slot_stack() {
        let mut stack = MatrixStack::new(1).unwrap();
        assert_eq!(
            stack.push().unwrap_err(),
            StackError::Overflow { capacity: 1 }
        );
        assert_eq!(stack.pop().unwrap_err(), StackError::Underflow);
        assert_eq!(stack.get(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translate_moves_origin() {
        let mut stack = MatrixStack::new(2).unwrap();
        stack.translate(2.0, 3.0, 4.0);

        let v = stack.get() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(v, Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_scale_is_innermost_after_translate() {
        // translate then scale: the later operator composes innermost, so
        // the scaling hits the vector before the translation does.
        let mut stack = MatrixStack::new(2).unwrap();
        stack.translate(10.0, 20.0, 30.0);
        stack.scale(2.0, 3.0, 4.0);

        let v = stack.get() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(v, Vec4::new(12.0, 20.0, 30.0, 1.0));
    }

    #[test]
    fn test_rotate_z_90_degrees() {
        let mut stack = MatrixStack::new(2).unwrap();
        stack.rotate(90.0, 0.0, 0.0, 1.0);

        let v = stack.get() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(v.abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_rotate_matches_glam_axis_angle() {
        let mut stack = MatrixStack::new(2).unwrap();
        stack.translate(1.0, 2.0, 3.0);
        stack.rotate(37.5, 0.0, 1.0, 0.0);

        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_axis_angle(Vec3::Y, 37.5_f32.to_radians());
        assert!(stack.get().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_rotate_preserves_translation_column() {
        let mut stack = MatrixStack::new(2).unwrap();
        stack.translate(5.0, -6.0, 7.0);
        let w_before = stack.get().w_axis;

        stack.rotate(123.0, 0.0, 0.0, 1.0);
        assert_eq!(stack.get().w_axis, w_before);
    }

    #[test]
    fn test_mult_matrix_matches_closed_forms() {
        let mut a = MatrixStack::new(2).unwrap();
        let mut b = MatrixStack::new(2).unwrap();

        a.translate(1.0, 2.0, 3.0);
        a.scale(2.0, 2.0, 2.0);

        b.mult_matrix(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        b.mult_matrix(&Mat4::from_scale(Vec3::splat(2.0)));

        assert!(a.get().abs_diff_eq(b.get(), EPS));
    }

    #[test]
    fn test_clear_resets_after_history() {
        let mut stack = MatrixStack::new(4).unwrap();
        stack.translate(1.0, 1.0, 1.0);
        stack.push().unwrap();
        stack.rotate(45.0, 1.0, 0.0, 0.0);
        stack.push().unwrap();
        stack.scale(0.5, 0.5, 0.5);

        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.get(), Mat4::IDENTITY);
    }

    #[test]
    fn test_load_matrix_round_trip() {
        let mat = Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ]);

        let mut stack = MatrixStack::new(3).unwrap();
        stack.load_matrix(&mat);
        assert_eq!(stack.get(), mat);

        // Mutating a pushed copy must not touch the stored parent.
        stack.push().unwrap();
        stack.load_identity();
        stack.pop().unwrap();
        assert_eq!(stack.get(), mat);
    }

    #[test]
    fn test_load_identity_discards_current() {
        let mut stack = MatrixStack::new(2).unwrap();
        stack.translate(9.0, 9.0, 9.0);
        stack.load_identity();
        assert_eq!(stack.get(), Mat4::IDENTITY);
    }

    #[test]
    fn test_nested_frames_compose_parent_outermost() {
        // Parent frame at (10, 0, 0); child rotated 90 degrees about Z.
        // A point at the child's local +X maps to the parent's +Y, offset
        // by the parent translation.
        let mut stack = MatrixStack::new(4).unwrap();
        stack.translate(10.0, 0.0, 0.0);
        stack.push().unwrap();
        stack.rotate(90.0, 0.0, 0.0, 1.0);

        let v = stack.get() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(v.abs_diff_eq(Vec4::new(10.0, 1.0, 0.0, 1.0), EPS));
    }
}
