//! Oriented-rectangle collision via the Separating Axis Theorem
//!
//! The tricky part of Maze Tanks: every collider in the game (tank, bullet,
//! static wall, spinning wall) is an oriented rectangle, so one SAT routine
//! serves every pair. A cheap axis-aligned broad phase culls the far-apart
//! pairs before the exact test runs.
//!
//! Preconditions: rectangles must have positive extents. A zero-length edge
//! would produce a degenerate axis during normalization; the sim never builds
//! such a box, so the routines here do not guard against it.

use glam::Vec2;

/// A rectangle with a center, half extents, and a rotation (true radians)
#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    pub center: Vec2,
    /// Half width (x) and half height (y); both must be > 0
    pub half_extents: Vec2,
    /// Rotation in radians, kept in [0, 2π)
    pub rotation: f32,
}

impl OrientedBox {
    pub fn new(center: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        Self {
            center,
            half_extents,
            rotation: crate::wrap_angle(rotation),
        }
    }

    /// The four corners of the rectangle, in edge order
    ///
    /// Closed-form tilted-rectangle formula (math.stackexchange 2518607).
    /// The ordering matters: consecutive vertices form the edges the SAT
    /// axes are derived from.
    pub fn vertices(&self) -> [Vec2; 4] {
        let (sin, cos) = self.rotation.sin_cos();
        let w = self.half_extents.x;
        let h = self.half_extents.y;
        let c = self.center;
        [
            Vec2::new(c.x - w * cos - h * sin, c.y - w * sin + h * cos),
            Vec2::new(c.x + w * cos - h * sin, c.y + w * sin + h * cos),
            Vec2::new(c.x + w * cos + h * sin, c.y + w * sin - h * cos),
            Vec2::new(c.x - w * cos + h * sin, c.y - w * sin - h * cos),
        ]
    }

    /// True if the box lies entirely outside the given bounds on any side
    ///
    /// Out-of-bounds uses the unrotated extent, which is what the bullet
    /// despawn check wants (a conservative-enough bound for tiny boxes).
    pub fn fully_outside(&self, width: f32, height: f32) -> bool {
        let he = self.half_extents;
        self.center.x + he.x < 0.0
            || self.center.x - he.x > width
            || self.center.y + he.y < 0.0
            || self.center.y - he.y > height
    }
}

/// Minimum-penetration axis and signed overlap from a SAT query
///
/// `overlap == 0.0` means no collision; callers rely on that exact contract.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Unit-length separating axis with the smallest overlap magnitude
    pub axis: Vec2,
    /// Signed overlap along `axis` (0 = no collision)
    pub overlap: f32,
}

impl CollisionResult {
    #[inline]
    pub fn hit(&self) -> bool {
        self.overlap != 0.0
    }

    /// Displacement that moves the first shape out of penetration
    ///
    /// The axis is unit length, so the push is simply `axis * overlap`.
    #[inline]
    pub fn push_out(&self) -> Vec2 {
        self.axis * self.overlap
    }

    /// Heading of the penetration axis (radians), for bullet reflection
    #[inline]
    pub fn axis_angle(&self) -> f32 {
        self.axis.y.atan2(self.axis.x)
    }
}

/// One normalized edge normal per edge of a quad
///
/// A rectangle's four edges come in two anti-parallel pairs, so one normal
/// per edge already covers every distinct projection direction. Taking only
/// the (-y, x) normal of each edge halves the axis count; a general polygon
/// would need both normals of every edge.
fn edge_axes(vertices: &[Vec2; 4]) -> [Vec2; 4] {
    let mut axes = [Vec2::ZERO; 4];
    for i in 0..4 {
        let edge = (vertices[(i + 1) % 4] - vertices[i]).normalize();
        axes[i] = Vec2::new(-edge.y, edge.x);
    }
    axes
}

/// Min/max of the vertices projected onto an axis
fn interval_on_axis(vertices: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = axis.dot(vertices[0]);
    let mut max = min;
    for v in &vertices[1..] {
        let d = axis.dot(*v);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Signed overlap of the two projections on one axis (0 when separated)
fn overlap_on_axis(a: &[Vec2; 4], b: &[Vec2; 4], axis: Vec2) -> f32 {
    let (a_min, a_max) = interval_on_axis(a, axis);
    let (b_min, b_max) = interval_on_axis(b, axis);
    if b_min < a_max && a_min < b_max {
        b_min - a_max
    } else {
        0.0
    }
}

/// Exact SAT test between two oriented rectangles
///
/// Checks the 8 candidate axes (4 edge normals per quad) and reports the one
/// with the smallest overlap magnitude. A zero overlap on any axis is a
/// separating axis, so the minimum is 0 exactly when the shapes are apart.
/// The reported push-out applies to `a`.
pub fn collision(a: &OrientedBox, b: &OrientedBox) -> CollisionResult {
    let va = a.vertices();
    let vb = b.vertices();
    let axes_a = edge_axes(&va);
    let axes_b = edge_axes(&vb);

    let mut best = CollisionResult {
        axis: axes_a[0],
        overlap: overlap_on_axis(&va, &vb, axes_a[0]),
    };
    for axis in axes_a.iter().skip(1).chain(axes_b.iter()) {
        let overlap = overlap_on_axis(&va, &vb, *axis);
        if overlap.abs() < best.overlap.abs() {
            best = CollisionResult { axis: *axis, overlap };
        }
    }
    best
}

/// Conservative broad-phase pre-filter
///
/// Compares axis-aligned bounds of the two boxes; a rotated box is bounded by
/// its circumradius so the check can never miss a real collision (false
/// positives are resolved by the exact SAT test).
pub fn collision_possible(a: &OrientedBox, b: &OrientedBox) -> bool {
    let bound = |bx: &OrientedBox| -> Vec2 {
        if bx.rotation != 0.0 {
            Vec2::splat(bx.half_extents.length())
        } else {
            bx.half_extents
        }
    };
    let ba = bound(a);
    let bb = bound(b);
    let delta = (a.center - b.center).abs();
    delta.x <= ba.x + bb.x && delta.y <= ba.y + bb.y
}
