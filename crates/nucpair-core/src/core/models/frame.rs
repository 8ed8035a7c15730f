use nalgebra::{Matrix3, Point3, Vector3};

/// A right-handed base reference frame.
///
/// The columns of `rotation` are the unit x, y and z axes expressed in the
/// structure's coordinate system. For a nucleotide base the z-axis is the
/// base normal and the y-axis points towards the base's own sugar-phosphate
/// backbone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub origin: Point3<f64>,
    pub rotation: Matrix3<f64>,
}

impl ReferenceFrame {
    pub fn new(origin: Point3<f64>, rotation: Matrix3<f64>) -> Self {
        Self { origin, rotation }
    }

    /// Builds a frame from its three axes, which are stored as columns.
    pub fn from_axes(
        origin: Point3<f64>,
        x: Vector3<f64>,
        y: Vector3<f64>,
        z: Vector3<f64>,
    ) -> Self {
        Self {
            origin,
            rotation: Matrix3::from_columns(&[x, y, z]),
        }
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.rotation.column(0).into_owned()
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.rotation.column(1).into_owned()
    }

    pub fn z_axis(&self) -> Vector3<f64> {
        self.rotation.column(2).into_owned()
    }

    /// Returns the frame reflected onto the complementary strand: the y and z
    /// columns are negated, the origin and x-axis are unchanged.
    pub fn flipped(&self) -> Self {
        let mut rotation = self.rotation;
        rotation.column_mut(1).neg_mut();
        rotation.column_mut(2).neg_mut();
        Self {
            origin: self.origin,
            rotation,
        }
    }

    /// Transforms a point given in frame-local coordinates into the global
    /// coordinate system.
    pub fn to_global(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.rotation * local.coords
    }
}
