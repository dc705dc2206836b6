//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in field coordinates
//! (origin top-left, y down).

use glam::{Affine2, Vec2};
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = colors;
    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(b.x, b.y, cb));
    vertices.push(Vertex::new(c.x, c.y, cc));

    vertices.push(Vertex::new(c.x, c.y, cc));
    vertices.push(Vertex::new(d.x, d.y, cd));
    vertices.push(Vertex::new(a.x, a.y, ca));
}

fn rect_corners(min: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
    ]
}

/// Solid axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, rect_corners(min, size), [color; 4]);
    vertices
}

/// Rectangle fading from `top` to `bottom`
pub fn vertical_gradient_rect(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        rect_corners(min, size),
        [top, top, bottom, bottom],
    );
    vertices
}

/// Rectangle with a left-to-right multi-stop gradient.
///
/// `stops` are `(offset, color)` pairs with offsets in `0..=1`, ascending.
pub fn horizontal_gradient_rect(min: Vec2, size: Vec2, stops: &[(f32, [f32; 4])]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    for pair in stops.windows(2) {
        let (t0, left) = pair[0];
        let (t1, right) = pair[1];
        if t1 <= t0 {
            continue;
        }
        let x0 = min.x + size.x * t0;
        let x1 = min.x + size.x * t1;
        push_quad(
            &mut vertices,
            [
                Vec2::new(x0, min.y),
                Vec2::new(x1, min.y),
                Vec2::new(x1, min.y + size.y),
                Vec2::new(x0, min.y + size.y),
            ],
            [left, right, right, left],
        );
    }
    vertices
}

/// Rectangle centered on `center` with rounded corners
pub fn rounded_rect(
    center: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let half = size * 0.5;
    let r = radius.clamp(0.0, half.x.min(half.y));
    let segments = corner_segments.max(1);
    let inner = half - Vec2::splat(r);

    // Corner arc centers, clockwise from top-right (y down)
    let corners = [
        (Vec2::new(inner.x, -inner.y), -FRAC_PI_2),
        (Vec2::new(inner.x, inner.y), 0.0),
        (Vec2::new(-inner.x, inner.y), FRAC_PI_2),
        (Vec2::new(-inner.x, -inner.y), PI),
    ];

    let mut outline = Vec::with_capacity(4 * (segments as usize + 1));
    for (offset, start) in corners {
        for i in 0..=segments {
            let theta = start + (i as f32 / segments as f32) * FRAC_PI_2;
            outline.push(center + offset + Vec2::new(theta.cos(), theta.sin()) * r);
        }
    }

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let p1 = outline[i];
        let p2 = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let p1 = center + unit(i, segments) * radius;
        let p2 = center + unit(i + 1, segments) * radius;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Hollow circle outline of the given stroke `width`, centered on `radius`
pub fn ring(center: Vec2, radius: f32, width: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let inner_radius = (radius - width * 0.5).max(0.0);
    let outer_radius = radius + width * 0.5;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let d1 = unit(i, segments);
        let d2 = unit(i + 1, segments);
        push_quad(
            &mut vertices,
            [
                center + d1 * inner_radius,
                center + d1 * outer_radius,
                center + d2 * outer_radius,
                center + d2 * inner_radius,
            ],
            [color; 4],
        );
    }

    vertices
}

/// Straight stroke from `a` to `b`
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [a + perp, b + perp, b - perp, a - perp],
        [color; 4],
    );
    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Apply `xf` to every vertex position in place
pub fn transform(vertices: &mut [Vertex], xf: Affine2) {
    for v in vertices {
        let p = xf.transform_point2(Vec2::from(v.position));
        v.position = p.to_array();
    }
}

fn unit(i: u32, segments: u32) -> Vec2 {
    let theta = (i as f32 / segments as f32) * 2.0 * PI;
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_covers_exact_bounds() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 5.0), RED);
        assert_eq!(verts.len(), 6);
        let (min, max) = bounds(&verts);
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(40.0, 25.0));
    }

    #[test]
    fn test_vertical_gradient_colors() {
        let verts = vertical_gradient_rect(Vec2::ZERO, Vec2::new(4.0, 8.0), RED, BLUE);
        for v in &verts {
            let expected = if v.position[1] == 0.0 { RED } else { BLUE };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_horizontal_gradient_one_quad_per_interval() {
        let stops = [(0.0, RED), (0.8, BLUE), (1.0, RED)];
        let verts = horizontal_gradient_rect(Vec2::ZERO, Vec2::new(60.0, 10.0), &stops);
        assert_eq!(verts.len(), 12);
        // The 0.8 stop lands 48 units in
        assert!(
            verts
                .iter()
                .any(|v| (v.position[0] - 48.0).abs() < 1e-4 && v.color == BLUE)
        );
        let (min, max) = bounds(&verts);
        assert_eq!(min.x, 0.0);
        assert_eq!(max.x, 60.0);
    }

    #[test]
    fn test_rounded_rect_stays_inside_box() {
        let center = Vec2::new(100.0, 100.0);
        let size = Vec2::new(34.0, 23.8);
        let verts = rounded_rect(center, size, 4.0, RED, 4);
        let (min, max) = bounds(&verts);
        let half = size * 0.5;
        assert!(min.x >= center.x - half.x - 1e-4);
        assert!(min.y >= center.y - half.y - 1e-4);
        assert!(max.x <= center.x + half.x + 1e-4);
        assert!(max.y <= center.y + half.y + 1e-4);
        // Flat edges still reach the box
        assert!((max.x - (center.x + half.x)).abs() < 1e-4);
    }

    #[test]
    fn test_rounded_rect_radius_clamped() {
        let verts = rounded_rect(Vec2::ZERO, Vec2::new(4.0, 2.0), 50.0, RED, 3);
        let (min, max) = bounds(&verts);
        assert!(max.x <= 2.0 + 1e-4 && min.x >= -2.0 - 1e-4);
        assert!(max.y <= 1.0 + 1e-4 && min.y >= -1.0 - 1e-4);
    }

    #[test]
    fn test_circle_vertex_count_and_radius() {
        let center = Vec2::new(5.0, 5.0);
        let verts = circle(center, 4.0, RED, 16);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            assert!(Vec2::from(v.position).distance(center) <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn test_ring_stroke_width() {
        let verts = ring(Vec2::ZERO, 4.0, 1.5, BLUE, 12);
        for v in &verts {
            let d = Vec2::from(v.position).length();
            assert!((3.25 - 1e-4..=4.75 + 1e-4).contains(&d), "d = {}", d);
        }
    }

    #[test]
    fn test_line_is_perpendicular_width() {
        let verts = line(Vec2::new(2.0, -2.0), Vec2::new(-4.0, -2.0), 1.0, BLUE);
        let (min, max) = bounds(&verts);
        assert_eq!(min, Vec2::new(-4.0, -2.5));
        assert_eq!(max, Vec2::new(2.0, -1.5));
    }

    #[test]
    fn test_transform_rotates_and_translates() {
        let mut verts = triangle(Vec2::X, Vec2::ZERO, Vec2::Y, RED);
        transform(
            &mut verts,
            Affine2::from_angle_translation(FRAC_PI_2, Vec2::new(10.0, 0.0)),
        );
        let p = Vec2::from(verts[0].position);
        assert!(p.distance(Vec2::new(10.0, 1.0)) < 1e-5);
        assert_eq!(verts[1].position, [10.0, 0.0]);
    }
}
