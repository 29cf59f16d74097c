// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Planar homography from exactly four point correspondences.

use deskew_core::Point;
use deskew_core::error::{DeskewError, Result};
use imageproc::geometric_transformations::Projection;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

/// Two picked corners closer than this (in pixels) count as the same point.
pub const MIN_CORNER_DISTANCE: f64 = 0.5;
/// Any three corners spanning less than this area (in square pixels) count as
/// collinear.
pub const MIN_TRIANGLE_AREA: f64 = 1.0;

const EPS: f64 = 1e-12;

/// Every way of choosing three of the four corners.
const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// A 3×3 projective transform with `h33 = 1`, mapping source-image pixels to
/// output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    matrix: Matrix3<f64>,
}

impl Homography {
    /// Solve the transform taking each `src[i]` exactly onto `dst[i]`.
    ///
    /// Both quads are checked for coincident and collinear points first; four
    /// correspondences give exactly the eight equations needed, so the system
    /// is solved directly rather than in a least-squares sense. Points are
    /// normalised (centroid at the origin, mean distance √2) before solving.
    pub fn from_correspondences(src: &[Point; 4], dst: &[Point; 4]) -> Result<Self> {
        validate_quad(src)?;
        validate_quad(dst)?;

        let (t_src, src_n) = normalize(src);
        let (t_dst, dst_n) = normalize(dst);

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for (i, (s, d)) in src_n.iter().zip(dst_n.iter()).enumerate() {
            let r0 = 2 * i;
            let r1 = r0 + 1;
            a[(r0, 0)] = s.x;
            a[(r0, 1)] = s.y;
            a[(r0, 2)] = 1.0;
            a[(r0, 6)] = -d.x * s.x;
            a[(r0, 7)] = -d.x * s.y;
            b[r0] = d.x;

            a[(r1, 3)] = s.x;
            a[(r1, 4)] = s.y;
            a[(r1, 5)] = 1.0;
            a[(r1, 6)] = -d.y * s.x;
            a[(r1, 7)] = -d.y * s.y;
            b[r1] = d.y;
        }

        let h = a
            .lu()
            .solve(&b)
            .ok_or_else(|| DeskewError::DegenerateQuad("singular correspondence system".into()))?;

        let normalized = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
        let t_dst_inv = t_dst
            .try_inverse()
            .ok_or_else(|| DeskewError::DegenerateQuad("destination normalisation".into()))?;
        let matrix = t_dst_inv * normalized * t_src;

        let scale = matrix[(2, 2)];
        if !scale.is_finite() || scale.abs() <= EPS {
            return Err(DeskewError::DegenerateQuad(
                "transform maps the origin to infinity".into(),
            ));
        }
        let matrix = matrix / scale;
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(DeskewError::DegenerateQuad("non-finite transform".into()));
        }
        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Map a point through the transform. `None` if it lands at infinity.
    pub fn apply(&self, p: Point) -> Option<Point> {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS {
            return None;
        }
        Some(Point::new(v[0] / w, v[1] / w))
    }

    /// The equivalent `imageproc` projection, for resampling.
    pub fn to_projection(&self) -> Result<Projection> {
        let m = &self.matrix;
        let coefficients = [
            m[(0, 0)] as f32,
            m[(0, 1)] as f32,
            m[(0, 2)] as f32,
            m[(1, 0)] as f32,
            m[(1, 1)] as f32,
            m[(1, 2)] as f32,
            m[(2, 0)] as f32,
            m[(2, 1)] as f32,
            m[(2, 2)] as f32,
        ];
        Projection::from_matrix(coefficients)
            .ok_or_else(|| DeskewError::DegenerateQuad("transform is not invertible".into()))
    }
}

/// Reject quads with coincident corners or three corners on one line.
pub fn validate_quad(points: &[Point; 4]) -> Result<()> {
    for i in 0..4 {
        for j in (i + 1)..4 {
            let distance = points[i].distance(&points[j]);
            if distance < MIN_CORNER_DISTANCE {
                return Err(DeskewError::DegenerateQuad(format!(
                    "corners {} and {} coincide at {}",
                    i + 1,
                    j + 1,
                    points[i]
                )));
            }
        }
    }
    for [i, j, k] in TRIPLES {
        let (a, b, c) = (points[i], points[j], points[k]);
        let area = triangle_area(a, b, c);
        if area < MIN_TRIANGLE_AREA {
            return Err(DeskewError::DegenerateQuad(format!(
                "corners {a}, {b}, {c} are collinear (area {area:.3})"
            )));
        }
    }
    Ok(())
}

fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

/// Similarity transform moving the centroid to the origin and scaling the
/// mean distance from it to √2, plus the transformed points.
fn normalize(points: &[Point; 4]) -> (Matrix3<f64>, [Point; 4]) {
    let cx = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
    let mean_distance = points
        .iter()
        .map(|p| (p.x - cx).hypot(p.y - cy))
        .sum::<f64>()
        / 4.0;
    let s = if mean_distance > EPS {
        std::f64::consts::SQRT_2 / mean_distance
    } else {
        1.0
    };
    let transform = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);
    let normalized = points.map(|p| Point::new(s * (p.x - cx), s * (p.y - cy)));
    (transform, normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskew_core::OutputGeometry;

    fn assert_close(actual: Point, expected: Point, tolerance: f64) {
        assert!(
            actual.distance(&expected) < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn corners_map_exactly_onto_the_output_rectangle() {
        let geometry = OutputGeometry {
            width: 707,
            height: 1000,
        };
        let src = [
            Point::new(132.0, 87.0),
            Point::new(861.0, 143.0),
            Point::new(944.0, 1302.0),
            Point::new(58.0, 1221.0),
        ];
        let dst = geometry.corners();
        let h = Homography::from_correspondences(&src, &dst).unwrap();

        for (s, d) in src.iter().zip(dst.iter()) {
            assert_close(h.apply(*s).unwrap(), *d, 1e-3);
        }
        assert!((h.matrix()[(2, 2)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn axis_aligned_rectangle_gives_a_scale_and_shift() {
        let src = [
            Point::new(10.0, 10.0),
            Point::new(990.0, 10.0),
            Point::new(990.0, 1410.0),
            Point::new(10.0, 1410.0),
        ];
        let dst = OutputGeometry {
            width: 707,
            height: 1000,
        }
        .corners();
        let h = Homography::from_correspondences(&src, &dst).unwrap();

        // Midpoint maps to the output centre and there is no perspective term.
        assert_close(
            h.apply(Point::new(500.0, 710.0)).unwrap(),
            Point::new(353.5, 500.0),
            1e-6,
        );
        assert!(h.matrix()[(2, 0)].abs() < 1e-12);
        assert!(h.matrix()[(2, 1)].abs() < 1e-12);
    }

    #[test]
    fn collinear_corners_are_rejected() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(0.0, 100.0),
        ];
        let dst = OutputGeometry {
            width: 10,
            height: 10,
        }
        .corners();
        assert!(matches!(
            Homography::from_correspondences(&src, &dst),
            Err(DeskewError::DegenerateQuad(_))
        ));
    }

    #[test]
    fn duplicate_corners_are_rejected() {
        let src = [
            Point::new(5.0, 5.0),
            Point::new(5.2, 5.1),
            Point::new(300.0, 400.0),
            Point::new(0.0, 400.0),
        ];
        assert!(matches!(
            validate_quad(&src),
            Err(DeskewError::DegenerateQuad(msg)) if msg.contains("coincide")
        ));
    }

    #[test]
    fn projection_agrees_with_the_f64_transform() {
        let src = [
            Point::new(40.0, 30.0),
            Point::new(260.0, 50.0),
            Point::new(280.0, 390.0),
            Point::new(20.0, 360.0),
        ];
        let dst = OutputGeometry {
            width: 212,
            height: 300,
        }
        .corners();
        let h = Homography::from_correspondences(&src, &dst).unwrap();
        let projection = h.to_projection().unwrap();

        let (x, y) = projection * (150.0_f32, 200.0_f32);
        let expected = h.apply(Point::new(150.0, 200.0)).unwrap();
        assert_close(Point::new(f64::from(x), f64::from(y)), expected, 1e-2);
    }
}
