//! Interpolation helpers:
//! - scaled_add_* (component-wise `a * wa + b * wb`)
//! - de_casteljau (generalized Bezier reduction over any blendable value)

/// Weighted sum of two scalars.
#[inline]
pub fn scaled_add_f32(a: f32, wa: f32, b: f32, wb: f32) -> f32 {
    a * wa + b * wb
}

#[inline]
pub fn scaled_add_vec3(a: [f32; 3], wa: f32, b: [f32; 3], wb: f32) -> [f32; 3] {
    [
        scaled_add_f32(a[0], wa, b[0], wb),
        scaled_add_f32(a[1], wa, b[1], wb),
        scaled_add_f32(a[2], wa, b[2], wb),
    ]
}

#[inline]
pub fn scaled_add_vec4(a: [f32; 4], wa: f32, b: [f32; 4], wb: f32) -> [f32; 4] {
    [
        scaled_add_f32(a[0], wa, b[0], wb),
        scaled_add_f32(a[1], wa, b[1], wb),
        scaled_add_f32(a[2], wa, b[2], wb),
        scaled_add_f32(a[3], wa, b[3], wb),
    ]
}

/// Reduce `points` in place by replacing each adjacent pair `(p[i], p[i+1])`
/// with `(1 - t) * p[i] + t * p[i+1]` until one value remains.
///
/// Two points give plain linear interpolation, three a quadratic Bezier, and
/// so on (degree = `points.len() - 1`). Returns `None` for an empty slice.
pub fn de_casteljau<B, F>(points: &mut [B], t: f32, scaled_add: F) -> Option<B>
where
    B: Copy,
    F: Fn(B, f32, B, f32) -> B,
{
    let u = 1.0 - t;
    for limit in (2..=points.len()).rev() {
        for i in 0..limit - 1 {
            points[i] = scaled_add(points[i], u, points[i + 1], t);
        }
    }
    points.first().copied()
}
