//! Fixed-size vector helpers over `[f64; D]`.
//!
//! Points and directions are plain arrays so that the same code serves the
//! planar and spatial kernels through const generics.

/// A point or direction in `D`-dimensional space.
pub type Point<const D: usize> = [f64; D];

#[inline]
pub fn dot<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn sub<const D: usize>(a: &Point<D>, b: &Point<D>) -> Point<D> {
    std::array::from_fn(|i| a[i] - b[i])
}

#[inline]
pub fn add<const D: usize>(a: &Point<D>, b: &Point<D>) -> Point<D> {
    std::array::from_fn(|i| a[i] + b[i])
}

#[inline]
pub fn scale<const D: usize>(a: &Point<D>, s: f64) -> Point<D> {
    std::array::from_fn(|i| a[i] * s)
}

#[inline]
pub fn norm<const D: usize>(a: &Point<D>) -> f64 {
    dot(a, a).sqrt()
}

/// Returns `a / |a|`, or `None` when `a` has zero or non-finite length.
pub fn normalize<const D: usize>(a: &Point<D>) -> Option<Point<D>> {
    let length = norm(a);
    if length > 0.0 && length.is_finite() {
        Some(scale(a, 1.0 / length))
    } else {
        None
    }
}

/// Point at parameter `t` on the segment `a → b`.
#[inline]
pub fn lerp<const D: usize>(a: &Point<D>, b: &Point<D>, t: f64) -> Point<D> {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Arithmetic mean of a non-empty set of points.
pub fn mean<'a, const D: usize>(points: impl IntoIterator<Item = &'a Point<D>>) -> Option<Point<D>> {
    let mut sum = [0.0; D];
    let mut count = 0usize;
    for p in points {
        sum = add(&sum, p);
        count += 1;
    }
    (count > 0).then(|| scale(&sum, 1.0 / count as f64))
}

pub fn is_finite<const D: usize>(a: &Point<D>) -> bool {
    a.iter().all(|c| c.is_finite())
}

/// Standard basis vector `e_axis`.
pub fn basis<const D: usize>(axis: usize) -> Point<D> {
    std::array::from_fn(|i| if i == axis { 1.0 } else { 0.0 })
}

/// Lexicographic "less than", used to orient shared edges consistently.
pub fn lex_less<const D: usize>(a: &Point<D>, b: &Point<D>) -> bool {
    for i in 0..D {
        if a[i] < b[i] {
            return true;
        }
        if a[i] > b[i] {
            return false;
        }
    }
    false
}

/// Cross product; perpendicular to both inputs.
pub fn cross(a: &Point<3>, b: &Point<3>) -> Point<3> {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_unit_length() {
        let v = normalize(&[3.0, 4.0]).unwrap();
        assert!((norm(&v) - 1.0).abs() < 1e-12);
        assert!((v[0] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(normalize(&[0.0, 0.0, 0.0]).is_none());
    }

    #[test]
    fn cross_of_basis() {
        let z = cross(&basis(0), &basis(1));
        assert_eq!(z, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn lex_order() {
        assert!(lex_less(&[0.0, 1.0], &[0.0, 2.0]));
        assert!(!lex_less(&[1.0, 0.0], &[0.0, 2.0]));
        assert!(!lex_less(&[1.0, 1.0], &[1.0, 1.0]));
    }

    #[test]
    fn mean_of_points() {
        let pts = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
        assert_eq!(mean(pts.iter()), Some([1.0, 1.0]));
        let empty: [[f64; 2]; 0] = [];
        assert_eq!(mean(empty.iter()), None);
    }
}
