use crate::camera::OrbitCamera;
use crate::surface::ClientSize;
use bevy_math::Mat4;
use std::f32::consts::PI;

pub const FIELD_OF_VIEW_Y: f32 = PI / 3.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
/// Model spin around +Y, radians per second.
pub const SPIN_RATE: f32 = 0.5;

pub fn model_matrix(elapsed_secs: f32) -> Mat4 {
    Mat4::from_rotation_y(elapsed_secs * SPIN_RATE)
}

pub fn projection(size: ClientSize) -> Mat4 {
    Mat4::perspective_lh(FIELD_OF_VIEW_Y, size.aspect_ratio(), NEAR_PLANE, FAR_PLANE)
}

pub fn view_projection(camera: &OrbitCamera, size: ClientSize) -> Mat4 {
    projection(size) * camera.view()
}

/// One `float4x4` constant buffer. HLSL reads cbuffer matrices
/// column-major, so the shaders use `mul(matrix, vector)`.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixConstants {
    pub columns: [f32; 16],
}

impl From<Mat4> for MatrixConstants {
    fn from(matrix: Mat4) -> Self {
        Self {
            columns: matrix.to_cols_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec3;
    use bevy_math::Vec4;

    #[test]
    fn model_starts_unrotated() {
        assert!(model_matrix(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
        let quarter = model_matrix(PI);
        assert!(quarter
            .transform_point3(Vec3::X)
            .abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let vp = view_projection(&OrbitCamera::default(), ClientSize::default());
        let ndc = vp.project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "{ndc:?}");
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "{ndc:?}");
    }

    #[test]
    fn near_face_is_closer_than_far_face() {
        let camera = OrbitCamera {
            pitch: 0.0,
            ..Default::default()
        };
        let vp = view_projection(&camera, ClientSize::default());
        let near = vp.project_point3(Vec3::new(0.0, 0.0, 0.5));
        let far = vp.project_point3(Vec3::new(0.0, 0.0, -0.5));
        assert!(near.z < far.z);
    }

    #[test]
    fn wide_window_squeezes_x() {
        let camera = OrbitCamera {
            pitch: 0.0,
            ..Default::default()
        };
        let square = view_projection(&camera, ClientSize::new(720, 720));
        let wide = view_projection(&camera, ClientSize::new(1440, 720));
        let point = Vec3::new(0.5, 0.5, 0.0);
        let a = square.project_point3(point);
        let b = wide.project_point3(point);
        assert!((b.x * 2.0 - a.x).abs() < 1e-5);
        assert!((b.y - a.y).abs() < 1e-5);
    }

    #[test]
    fn constants_hold_columns_in_order() {
        let matrix = Mat4::from_cols(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        );
        let constants = MatrixConstants::from(matrix);
        assert_eq!(constants.columns[..4], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(constants.columns[12..], [13.0, 14.0, 15.0, 16.0]);
        assert_eq!(std::mem::size_of::<MatrixConstants>(), 64);
    }
}
