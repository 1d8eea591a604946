use crate::V2;

pub fn dist(a: V2, b: V2) -> f32 {
	(a - b).magnitude()
}

pub fn midpoint(a: V2, b: V2) -> V2 {
	(a + b) / 2.0
}

/// Unit vector along `v`, or zero when `v` has no usable length.
///
/// Zero, subnormal, infinite and NaN magnitudes all map to zero so that
/// callers never write NaN back into positions.
pub fn normalize_or_zero(v: V2) -> V2 {
	let l = v.magnitude();
	if !l.is_normal() {
		return V2::zeros();
	}
	v / l
}

/// Rescale `v` down to `max` if it is longer, keep it otherwise.
pub fn clamp_magnitude(v: V2, max: f32) -> V2 {
	if v.magnitude() > max {
		normalize_or_zero(v) * max
	} else {
		v
	}
}
