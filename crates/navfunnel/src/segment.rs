//! Finite line segments and the closest-point query between two of them.

use glam::Vec3A;

/// Segments whose squared length is at or below this value are treated as points.
pub const SEGMENT_DEGENERATE_EPSILON_SQ: f32 = 1.0e-8 * 1.0e-8;

/// A finite line segment from [`Segment::start`] to [`Segment::end`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The point at parameter 0.
    pub start: Vec3A,
    /// The point at parameter 1.
    pub end: Vec3A,
}

/// Result of [`Segment::closest_points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDistance {
    /// Squared distance between [`Self::closest_on_self`] and [`Self::closest_on_other`].
    pub distance_squared: f32,
    /// The closest point on the segment the query was made on.
    pub closest_on_self: Vec3A,
    /// The closest point on the segment passed to the query.
    pub closest_on_other: Vec3A,
    /// Parameter of [`Self::closest_on_self`] along its segment, in `[0, 1]`.
    pub s: f32,
    /// Parameter of [`Self::closest_on_other`] along its segment, in `[0, 1]`.
    pub t: f32,
}

impl Segment {
    /// Creates a new segment.
    #[inline]
    pub const fn new(start: Vec3A, end: Vec3A) -> Self {
        Self { start, end }
    }

    /// The unnormalized direction `end - start`.
    #[inline]
    pub fn direction(&self) -> Vec3A {
        self.end - self.start
    }

    /// Squared length of the segment.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.direction().length_squared()
    }

    /// The point at parameter `t`, where 0 is [`Self::start`] and 1 is [`Self::end`].
    #[inline]
    pub fn lerp(&self, t: f32) -> Vec3A {
        self.start.lerp(self.end, t)
    }

    /// The segment projected onto the ground plane, i.e. with both y-coordinates set to 0.
    #[inline]
    pub fn flatten(&self) -> Self {
        Self {
            start: Vec3A::new(self.start.x, 0.0, self.start.z),
            end: Vec3A::new(self.end.x, 0.0, self.end.z),
        }
    }

    /// Squared distance between the closest points of `self` and `other`.
    #[inline]
    pub fn distance_squared(&self, other: &Segment) -> f32 {
        self.closest_points(other).distance_squared
    }

    /// Computes the closest points between `self` and `other`, and the squared distance between them.
    ///
    /// Follows the clamped parametric solution from Real-Time Collision Detection (Ericson, 5.1.9).
    /// Segments shorter than [`SEGMENT_DEGENERATE_EPSILON_SQ`] are handled as points.
    /// For parallel segments the parameter on `self` is chosen as 0 before clamping the other one.
    pub fn closest_points(&self, other: &Segment) -> SegmentDistance {
        let p1 = self.start;
        let p2 = other.start;
        let d1 = self.direction();
        let d2 = other.direction();
        let r = p1 - p2;

        let a = d1.dot(d1);
        let e = d2.dot(d2);
        let f = d2.dot(r);

        let (s, t) = if a <= SEGMENT_DEGENERATE_EPSILON_SQ && e <= SEGMENT_DEGENERATE_EPSILON_SQ {
            // Both segments are points
            (0.0, 0.0)
        } else if a <= SEGMENT_DEGENERATE_EPSILON_SQ {
            // Only self is a point
            (0.0, (f / e).clamp(0.0, 1.0))
        } else {
            let c = d1.dot(r);
            if e <= SEGMENT_DEGENERATE_EPSILON_SQ {
                // Only other is a point
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else {
                let b = d1.dot(d2);
                // Always nonnegative
                let denom = a * e - b * b;

                let s = if denom != 0.0 {
                    ((b * f - c * e) / denom).clamp(0.0, 1.0)
                } else {
                    0.0
                };

                let t = (b * s + f) / e;
                if t < 0.0 {
                    ((-c / a).clamp(0.0, 1.0), 0.0)
                } else if t > 1.0 {
                    (((b - c) / a).clamp(0.0, 1.0), 1.0)
                } else {
                    (s, t)
                }
            }
        };

        let closest_on_self = p1 + d1 * s;
        let closest_on_other = p2 + d2 * t;
        SegmentDistance {
            distance_squared: closest_on_self.distance_squared(closest_on_other),
            closest_on_self,
            closest_on_other,
            s,
            t,
        }
    }
}

impl From<(Vec3A, Vec3A)> for Segment {
    fn from((start, end): (Vec3A, Vec3A)) -> Self {
        Self::new(start, end)
    }
}
