/// Real roots of `a t^2 + b t + c = 0`, smaller root first.
///
/// Returns `None` for a negative discriminant and for `a == 0`, where the
/// equation is not quadratic. A zero discriminant yields the double root
/// twice. Uses the cancellation-free `q` form for the distinct-root case.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || discriminant.is_nan() {
        return None;
    }
    if discriminant == 0.0 {
        let root = -0.5 * b / a;
        return Some((root, root));
    }

    let sqrtd = discriminant.sqrt();
    let q = if b > 0.0 {
        -0.5 * (b + sqrtd)
    } else {
        -0.5 * (b - sqrtd)
    };

    let x0 = q / a;
    let x1 = c / q;
    Some(if x0 <= x1 { (x0, x1) } else { (x1, x0) })
}
