use super::geometry::{angle_degrees, rotation_from_axis_angle, signed_angle_degrees};
use crate::core::models::frame::ReferenceFrame;
use nalgebra::Vector3;

const COLLINEAR_TOLERANCE: f64 = 1.0e-5;

/// Six rigid-body parameters relating two base (or base-pair) frames.
///
/// Translations are in angstroms, rotations in degrees, all expressed in the
/// mid-step frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepParameters {
    pub shift: f64,
    pub slide: f64,
    pub rise: f64,
    pub tilt: f64,
    pub roll: f64,
    pub twist: f64,
}

impl StepParameters {
    /// For a pair of bases the first translation is the shear.
    pub fn shear(&self) -> f64 {
        self.shift
    }
}

/// Computes step parameters from `first` to `second` along with the mid-step frame.
///
/// Both frames are rotated half way about the hinge axis (`z1 x z2`) so their
/// normals coincide; twist is then the angle between the rotated y axes and the
/// translation is read off in the resulting middle frame.
pub fn step_parameters(
    first: &ReferenceFrame,
    second: &ReferenceFrame,
) -> (StepParameters, ReferenceFrame) {
    let z1 = first.z_axis();
    let z2 = second.z_axis();

    let mut hinge = z1.cross(&z2);
    let roll_tilt = angle_degrees(&z1, &z2);
    if hinge.norm() < COLLINEAR_TOLERANCE {
        hinge = first.x_axis() + second.x_axis() + first.y_axis() + second.y_axis();
    }

    let rotated_second =
        rotation_from_axis_angle(&hinge, -0.5 * roll_tilt).matrix() * second.rotation;
    let rotated_first =
        rotation_from_axis_angle(&hinge, 0.5 * roll_tilt).matrix() * first.rotation;

    let mid_z: Vector3<f64> = rotated_second.column(2).into_owned();
    let y1: Vector3<f64> = rotated_first.column(1).into_owned();
    let y2: Vector3<f64> = rotated_second.column(1).into_owned();

    let twist = signed_angle_degrees(&y1, &y2, &mid_z);
    let mid_y = (y1 + y2).try_normalize(COLLINEAR_TOLERANCE).unwrap_or(y1);
    let mid_x = mid_y.cross(&mid_z);

    let origin = nalgebra::center(&first.origin, &second.origin);
    let displacement = second.origin - first.origin;

    let phi = signed_angle_degrees(&hinge, &mid_y, &mid_z).to_radians();

    let params = StepParameters {
        shift: displacement.dot(&mid_x),
        slide: displacement.dot(&mid_y),
        rise: displacement.dot(&mid_z),
        tilt: roll_tilt * phi.sin(),
        roll: roll_tilt * phi.cos(),
        twist,
    };

    (params, ReferenceFrame::from_axes(origin, mid_x, mid_y, mid_z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Point3, Rotation3};

    const TOLERANCE: f64 = 1e-6;

    fn frame_at(origin: Point3<f64>, rotation: Rotation3<f64>) -> ReferenceFrame {
        ReferenceFrame::new(origin, *rotation.matrix())
    }

    #[test]
    fn ideal_b_dna_step_gives_rise_and_twist() {
        let first = frame_at(Point3::origin(), Rotation3::identity());
        let second = frame_at(
            Point3::new(0.0, 0.0, 3.38),
            Rotation3::from_axis_angle(&Vector3::z_axis(), 36.0_f64.to_radians()),
        );

        let (params, mid) = step_parameters(&first, &second);

        assert!((params.rise - 3.38).abs() < TOLERANCE);
        assert!((params.twist - 36.0).abs() < TOLERANCE);
        assert!(params.shift.abs() < TOLERANCE);
        assert!(params.slide.abs() < TOLERANCE);
        assert!(params.roll.abs() < TOLERANCE);
        assert!(params.tilt.abs() < TOLERANCE);
        assert!((mid.origin - Point3::new(0.0, 0.0, 1.69)).norm() < TOLERANCE);
    }

    #[test]
    fn pure_translation_in_plane_is_shift_and_slide() {
        let first = frame_at(Point3::origin(), Rotation3::identity());
        let second = frame_at(Point3::new(1.5, -0.5, 0.0), Rotation3::identity());

        let (params, _) = step_parameters(&first, &second);

        assert!((params.shift - 1.5).abs() < TOLERANCE);
        assert!((params.shear() - 1.5).abs() < TOLERANCE);
        assert!((params.slide + 0.5).abs() < TOLERANCE);
        assert!(params.rise.abs() < TOLERANCE);
        assert!(params.twist.abs() < TOLERANCE);
    }

    #[test]
    fn rotation_about_y_is_pure_roll() {
        let first = frame_at(Point3::origin(), Rotation3::identity());
        let second = frame_at(
            Point3::origin(),
            Rotation3::from_axis_angle(&Vector3::y_axis(), 10.0_f64.to_radians()),
        );

        let (params, _) = step_parameters(&first, &second);

        assert!((params.roll - 10.0).abs() < TOLERANCE);
        assert!(params.tilt.abs() < TOLERANCE);
        assert!(params.twist.abs() < TOLERANCE);
    }

    #[test]
    fn rotation_about_x_is_pure_tilt() {
        let first = frame_at(Point3::origin(), Rotation3::identity());
        let second = frame_at(
            Point3::origin(),
            Rotation3::from_axis_angle(&Vector3::x_axis(), 8.0_f64.to_radians()),
        );

        let (params, _) = step_parameters(&first, &second);

        assert!((params.tilt - 8.0).abs() < TOLERANCE);
        assert!(params.roll.abs() < TOLERANCE);
    }

    #[test]
    fn mid_step_frame_is_orthonormal() {
        let first = frame_at(
            Point3::new(0.3, 0.1, 0.0),
            Rotation3::from_euler_angles(0.05, -0.1, 0.2),
        );
        let second = frame_at(
            Point3::new(0.5, 0.4, 3.3),
            Rotation3::from_euler_angles(-0.1, 0.15, 0.8),
        );

        let (_, mid) = step_parameters(&first, &second);
        let gram: Matrix3<f64> = mid.rotation.transpose() * mid.rotation;
        assert!((gram - Matrix3::identity()).norm() < 1e-9);
    }
}
