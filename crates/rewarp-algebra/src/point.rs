use std::ops::{Add, Sub};

/// A point in the plane.
///
/// `x` runs along the columns of an image and `y` along its rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2<T> {
    /// Horizontal coordinate.
    pub x: T,
    /// Vertical coordinate.
    pub y: T,
}

/// A point in space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3<T> {
    /// Horizontal coordinate.
    pub x: T,
    /// Vertical coordinate.
    pub y: T,
    /// Depth coordinate.
    pub z: T,
}

/// Single precision plane point.
pub type Point2f = Point2<f32>;

/// Integer plane point, e.g. a pixel position.
pub type Point2i = Point2<i32>;

/// Single precision point in space.
pub type Point3f = Point3<f32>;

impl<T> Point2<T> {
    /// Create a new point.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Point3<T> {
    /// Create a new point.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl Point2f {
    /// Round both coordinates to the nearest integer, half away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rewarp_algebra::{Point2f, Point2i};
    ///
    /// assert_eq!(Point2f::new(0.5, -1.5).round(), Point2i::new(1, -2));
    /// ```
    pub fn round(&self) -> Point2i {
        Point2i::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Point3f {
    /// Drop the depth coordinate.
    pub fn xy(&self) -> Point2f {
        Point2f::new(self.x, self.y)
    }
}

impl From<Point2i> for Point2f {
    fn from(p: Point2i) -> Self {
        Point2f::new(p.x as f32, p.y as f32)
    }
}

impl<T> From<(T, T)> for Point2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl From<Point2f> for glam::Vec2 {
    fn from(p: Point2f) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

impl From<Point3f> for glam::Vec3 {
    fn from(p: Point3f) -> Self {
        glam::Vec3::new(p.x, p.y, p.z)
    }
}

impl From<glam::Vec3> for Point3f {
    fn from(v: glam::Vec3) -> Self {
        Point3f::new(v.x, v.y, v.z)
    }
}

impl<T: Add<Output = T>> Add for Point2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Point2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Add<Output = T>> Add for Point3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Sub<Output = T>> Sub for Point3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
