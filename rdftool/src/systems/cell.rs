//! The `UnitCell` type represents the enclosing box of a simulation frame,
//! with some type of periodic condition.
use crate::{Error, Matrix3, Vector3D};

/// The shape of a cell determine how we will be able to compute the periodic
/// boundaries condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellShape {
    /// Infinite unit cell, with no boundaries
    Infinite,
    /// Orthorhombic unit cell, with cuboid shape
    Orthorhombic,
    /// Triclinic unit cell, with arbitrary parallelepiped shape
    Triclinic,
}

/// An `UnitCell` defines the physical boundaries of a frame.
///
/// The shape of the cell can be any of the [`CellShape`], and will influence
/// how periodic boundary conditions are applied. The cell vectors are stored
/// as the rows of the cell matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    /// Unit cell matrix
    matrix: Matrix3,
    /// Transpose of the unit cell matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, cached from matrix
    inverse: Matrix3,
    /// Unit cell shape
    shape: CellShape,
}

impl TryFrom<Matrix3> for UnitCell {
    type Error = Error;

    fn try_from(matrix: Matrix3) -> Result<UnitCell, Error> {
        let determinant = matrix.determinant();
        if !(determinant.is_finite() && determinant > 1e-6) {
            return Err(Error::InvalidParameter(format!(
                "the cell matrix must be finite and have a positive determinant, got a determinant of {}",
                determinant
            )));
        }

        let is_close_0 = |value| f64::abs(value) < 1e-6;
        let is_diagonal = |matrix: Matrix3| {
            is_close_0(matrix[0][1]) && is_close_0(matrix[0][2]) &&
            is_close_0(matrix[1][0]) && is_close_0(matrix[1][2]) &&
            is_close_0(matrix[2][0]) && is_close_0(matrix[2][1])
        };

        let shape = if is_diagonal(matrix) {
            CellShape::Orthorhombic
        } else {
            CellShape::Triclinic
        };

        return Ok(UnitCell {
            matrix: matrix,
            transpose: matrix.transposed(),
            inverse: matrix.transposed().inverse(),
            shape: shape
        });
    }
}

impl UnitCell {
    /// Create an infinite unit cell
    pub fn infinite() -> UnitCell {
        UnitCell {
            matrix: Matrix3::zero(),
            transpose: Matrix3::zero(),
            inverse: Matrix3::zero(),
            shape: CellShape::Infinite,
        }
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    ///
    /// # Panics
    ///
    /// If any of the lengths is not strictly positive. Use
    /// [`UnitCell::from_dimensions`] for a fallible version.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let matrix = Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c]
        ]);
        UnitCell {
            matrix: matrix,
            transpose: matrix,
            inverse: matrix.inverse(),
            shape: CellShape::Orthorhombic,
        }
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    ///
    /// # Panics
    ///
    /// If `length` is not strictly positive.
    pub fn cubic(length: f64) -> UnitCell {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma` in degrees.
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<UnitCell, Error> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell lengths must be positive, got a={}, b={}, c={}", a, b, c
            )));
        }

        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        return UnitCell::try_from(Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]));
    }

    /// Create a unit cell from the 6 values `[a, b, c, alpha, beta, gamma]`
    /// commonly used by trajectory formats, with angles in degrees.
    ///
    /// If all lengths are zero, the cell is infinite. If all angles are 90°,
    /// the cell is orthorhombic.
    pub fn from_dimensions(dimensions: [f64; 6]) -> Result<UnitCell, Error> {
        let [a, b, c, alpha, beta, gamma] = dimensions;
        if a == 0.0 && b == 0.0 && c == 0.0 {
            return Ok(UnitCell::infinite());
        }

        let is_right = |angle: f64| f64::abs(angle - 90.0) < 1e-6;
        if is_right(alpha) && is_right(beta) && is_right(gamma) {
            if !(a > 0.0 && b > 0.0 && c > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "cell lengths must be positive, got a={}, b={}, c={}", a, b, c
                )));
            }
            return Ok(UnitCell::orthorhombic(a, b, c));
        }

        return UnitCell::triclinic(a, b, c, alpha, beta, gamma);
    }

    /// Get the `[a, b, c, alpha, beta, gamma]` representation of this cell.
    /// Infinite cells have zero lengths and right angles.
    pub fn dimensions(&self) -> [f64; 6] {
        [self.a(), self.b(), self.c(), self.alpha(), self.beta(), self.gamma()]
    }

    /// Get the cell shape
    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Check if this unit cell is infinite, *i.e.* if it does not have
    /// periodic boundary conditions.
    pub fn is_infinite(&self) -> bool {
        self.shape() == CellShape::Infinite
    }

    /// Get the first length of the cell (i.e. the norm of the first vector of
    /// the cell)
    pub fn a(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.a_vector().norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[0][0],
        }
    }

    /// Get the second length of the cell (i.e. the norm of the second vector of
    /// the cell)
    pub fn b(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.b_vector().norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[1][1],
        }
    }

    /// Get the third length of the cell (i.e. the norm of the third vector of
    /// the cell)
    pub fn c(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.c_vector().norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[2][2],
        }
    }

    /// Get the first angle of the cell
    pub fn alpha(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.b_vector(), self.c_vector()).to_degrees(),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the second angle of the cell
    pub fn beta(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.a_vector(), self.c_vector()).to_degrees(),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the third angle of the cell
    pub fn gamma(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.a_vector(), self.b_vector()).to_degrees(),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the volume of the cell. Infinite cells have a volume of 0.
    pub fn volume(&self) -> f64 {
        match self.shape {
            CellShape::Infinite => 0.0,
            CellShape::Orthorhombic => self.a() * self.b() * self.c(),
            // mixed product of the three cell vectors, positive since the
            // determinant of the matrix is checked on construction
            CellShape::Triclinic => self.a_vector() * (self.b_vector() ^ self.c_vector()),
        }
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    fn a_vector(&self) -> Vector3D {
        self.matrix[0].into()
    }

    fn b_vector(&self) -> Vector3D {
        self.matrix[1].into()
    }

    fn c_vector(&self) -> Vector3D {
        self.matrix[2].into()
    }
}

/// Geometric operations using periodic boundary conditions
impl UnitCell {
    /// Find the image of a vector in the unit cell, obeying the periodic
    /// boundary conditions. For a cubic cell of side length `L`, this produce a
    /// vector with all components in `[-L/2, L/2]`.
    pub fn vector_image(&self, vector: &mut Vector3D) {
        match self.shape {
            CellShape::Infinite => (),
            CellShape::Orthorhombic => {
                vector[0] -= f64::round(vector[0] / self.a()) * self.a();
                vector[1] -= f64::round(vector[1] / self.b()) * self.b();
                vector[2] -= f64::round(vector[2] / self.c()) * self.c();
            }
            CellShape::Triclinic => {
                let mut fractional = self.fractional(*vector);
                fractional[0] -= f64::round(fractional[0]);
                fractional[1] -= f64::round(fractional[1]);
                fractional[2] -= f64::round(fractional[2]);
                *vector = self.cartesian(fractional);
            }
        }
    }

    /// Get the fractional representation of the `vector` in this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.inverse * vector;
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        return self.transpose * fractional;
    }

    /// Periodic boundary conditions squared distance between the point `u` and
    /// the point `v`
    #[inline]
    pub fn distance2(&self, u: Vector3D, v: Vector3D) -> f64 {
        let mut d = v - u;
        self.vector_image(&mut d);
        return d.norm2();
    }

    /// Periodic boundary conditions distance between the point `u` and
    /// the point `v`
    #[inline]
    pub fn distance(&self, u: Vector3D, v: Vector3D) -> f64 {
        return f64::sqrt(self.distance2(u, v));
    }
}

/// Get the angles between the vectors `u` and `v`.
fn angle(u: Vector3D, v: Vector3D) -> f64 {
    let un = u.normalized();
    let vn = v.normalized();
    f64::acos(f64::clamp(un * vn, -1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    #[should_panic(expected = "Cell lengths must be positive")]
    fn negative_ortho() {
        let _ = UnitCell::orthorhombic(3.0, 0.0, -5.0);
    }

    #[test]
    fn negative_triclinic() {
        let error = UnitCell::triclinic(3.0, 0.0, -5.0, 90.0, 80.0, 90.0).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: cell lengths must be positive, got a=3, b=0, c=-5");
    }

    #[test]
    fn infinite() {
        let cell = UnitCell::infinite();
        assert_eq!(cell.shape(), CellShape::Infinite);
        assert!(cell.is_infinite());
        assert_eq!(cell.dimensions(), [0.0, 0.0, 0.0, 90.0, 90.0, 90.0]);
        assert_eq!(cell.volume(), 0.0);
    }

    #[test]
    fn orthorhombic() {
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        assert_eq!(cell.shape(), CellShape::Orthorhombic);
        assert!(!cell.is_infinite());

        assert_eq!(cell.dimensions(), [3.0, 4.0, 5.0, 90.0, 90.0, 90.0]);
        assert_eq!(cell.volume(), 3.0 * 4.0 * 5.0);
    }

    #[test]
    fn triclinic() {
        let cell = UnitCell::triclinic(3.0, 4.0, 5.0, 80.0, 90.0, 110.0).unwrap();
        assert_eq!(cell.shape(), CellShape::Triclinic);
        assert_eq!(cell.a_vector(), Vector3D::new(3.0, 0.0, 0.0));
        assert_eq!(cell.b_vector()[2], 0.0);

        assert_relative_eq!(cell.a(), 3.0);
        assert_relative_eq!(cell.b(), 4.0);
        assert_relative_eq!(cell.c(), 5.0);

        assert_relative_eq!(cell.alpha(), 80.0, epsilon = 1e-12);
        assert_relative_eq!(cell.beta(), 90.0, epsilon = 1e-12);
        assert_relative_eq!(cell.gamma(), 110.0, epsilon = 1e-12);

        assert_relative_eq!(cell.volume(), 55.410529, epsilon = 1e-6);
    }

    #[test]
    fn from_dimensions() {
        let cell = UnitCell::from_dimensions([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(cell.is_infinite());

        let cell = UnitCell::from_dimensions([10.0, 12.0, 8.0, 90.0, 90.0, 90.0]).unwrap();
        assert_eq!(cell.shape(), CellShape::Orthorhombic);
        assert_eq!(cell.volume(), 960.0);

        let cell = UnitCell::from_dimensions([10.0, 10.0, 10.0, 60.0, 60.0, 60.0]).unwrap();
        assert_eq!(cell.shape(), CellShape::Triclinic);
        // volume of a rhombohedral cell
        let cos = 0.5;
        let expected = 1000.0 * f64::sqrt(1.0 - 3.0 * cos * cos + 2.0 * cos * cos * cos);
        assert_relative_eq!(cell.volume(), expected, max_relative = 1e-12);

        assert!(UnitCell::from_dimensions([10.0, -1.0, 10.0, 90.0, 90.0, 90.0]).is_err());
    }

    #[test]
    fn not_invertible() {
        let matrix = Matrix3::new([
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert!(UnitCell::try_from(matrix).is_err());

        let matrix = Matrix3::new([
            [1.0, 0.0, 0.0],
            [0.0, f64::NAN, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert!(UnitCell::try_from(matrix).is_err());
    }

    #[test]
    fn impossible_angles() {
        // no parallelepiped has these angles, the third cell vector would
        // need an imaginary component
        let error = UnitCell::from_dimensions([10.0, 10.0, 10.0, 10.0, 10.0, 170.0]).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));

        assert!(UnitCell::triclinic(10.0, 10.0, 10.0, 90.0, 90.0, 180.0).is_err());
    }

    #[test]
    #[should_panic(expected = "Cell lengths must be positive")]
    fn nan_cubic() {
        let _ = UnitCell::cubic(f64::NAN);
    }

    #[test]
    fn distances() {
        // Orthorhombic unit cell
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        let u = Vector3D::zero();
        let v = Vector3D::new(1.0, 2.0, 6.0);
        assert_eq!(cell.distance(u, v), f64::sqrt(6.0));

        // Infinite unit cell
        let cell = UnitCell::infinite();
        assert_eq!(cell.distance(u, v), v.norm());

        // Triclinic unit cell
        let u = Vector3D::new(7.86753, 10.4541, 13.0982);
        let v = Vector3D::new(9.13177, 3.87718, 6.55355);
        let cell = UnitCell::try_from(Matrix3::new([
            [7.84788, 0.0,     7.84791],
            [7.84788, 7.84787, 0.0    ],
            [0.0,     7.84787, 7.84791],
        ])).unwrap();
        assert_relative_eq!(cell.distance(u, v), 2.216326534538627, max_relative = 1e-12);
    }

    #[test]
    fn vector_image() {
        let cell = UnitCell::cubic(10.0);
        let mut v = Vector3D::new(9.0, 18.0, -6.0);
        cell.vector_image(&mut v);
        assert_eq!(v, Vector3D::new(-1.0, -2.0, 4.0));

        let cell = UnitCell::infinite();
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.vector_image(&mut v);
        assert_eq!(v, Vector3D::new(1.0, 1.5, 6.0));

        let cell = UnitCell::triclinic(3.0, 4.0, 5.0, 90.0, 90.0, 90.0).unwrap();
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.vector_image(&mut v);
        assert_relative_eq!(v[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 1.5, epsilon = 1e-12);
        assert_relative_eq!(v[2], 1.0, epsilon = 1e-12);
    }
}
