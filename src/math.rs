use nalgebra::{Matrix4, Vector3, Vector4};

/// Builds the rotation by `angle` in the plane spanned by `from` and `to`.
///
/// Identity on the two untouched axes. Positive angles carry the `from`
/// axis towards the `to` axis: `(to, from) = +sin`, `(from, to) = -sin`.
pub fn create_4d_rotation(from: usize, to: usize, angle: f32) -> Matrix4<f32> {
    let (sin, cos) = angle.sin_cos();
    let mut matrix = Matrix4::identity();
    matrix[(from, from)] = cos;
    matrix[(to, to)] = cos;
    matrix[(to, from)] = sin;
    matrix[(from, to)] = -sin;
    matrix
}

/// The exact quarter-turn version of [`create_4d_rotation`], with 0 and ±1
/// in place of cos and sin.
pub fn create_4d_quarter_turn(from: usize, to: usize) -> Matrix4<f32> {
    let mut matrix = Matrix4::identity();
    matrix[(from, from)] = 0.0;
    matrix[(to, to)] = 0.0;
    matrix[(to, from)] = 1.0;
    matrix[(from, to)] = -1.0;
    matrix
}

pub fn to_display(point: &Vector4<i32>) -> Vector4<f32> {
    point.map(|c| c as f32)
}

/// Rounds a rotated point back onto the integer lattice.
pub fn snap_to_lattice(point: &Vector4<f32>) -> Vector4<i32> {
    point.map(|c| c.round() as i32)
}

/// Projects a 4D point into the 3D display space.
///
/// Points further along +w are drawn larger: `xyz * scale * base^(w - 1)`.
pub fn project_4d_to_3d(point_4d: &Vector4<f32>, scale: f32, w_base: f32) -> Vector3<f32> {
    let factor = scale * w_base.powf(point_4d.w - 1.0);
    Vector3::new(point_4d.x * factor, point_4d.y * factor, point_4d.z * factor)
}
