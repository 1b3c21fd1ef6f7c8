use crate::sample::Sample;

/// Converts one sample value between representations.
///
/// Integers are full scale two's complement (signed) or offset binary
/// (unsigned), floats are nominally in `[-1.0, 1.0)`. Never fails: out of
/// range floats are clamped, `NaN` becomes the target's maximum.
pub fn convert<T: Sample, S: Sample>(value: S) -> T {
    match (S::KIND.is_integer(), T::KIND.is_integer()) {
        (true, true) => fixed_to_fixed(value),
        (false, true) => float_to_fixed(value),
        (true, false) => fixed_to_float(value),
        (false, false) => T::from_f64(value.to_f64()),
    }
}

fn top_bit(bits: u32) -> u64 {
    1u64 << (bits - 1)
}

fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

fn fixed_to_fixed<T: Sample, S: Sample>(value: S) -> T {
    let mut bits = value.to_bits();

    if S::KIND != T::KIND {
        bits ^= top_bit(S::BITS);
    }

    // only the top T::BITS bits survive narrowing, so the shift kind
    // doesn't matter once the result is truncated
    if T::BITS < S::BITS {
        T::from_bits(bits >> (S::BITS - T::BITS))
    } else {
        T::from_bits(bits << (T::BITS - S::BITS))
    }
}

fn float_to_fixed<T: Sample, S: Sample>(value: S) -> T {
    // f32 has 24 bits of mantissa, enough for targets up to 16 bits wide
    let rounded = if T::BITS > 23 || S::BITS == 64 {
        quantize_f64(value.to_f64(), T::BITS)
    } else {
        quantize_f32(value.to_f32(), T::BITS)
    };

    let mut bits = rounded as u64;

    if !T::KIND.is_signed() {
        bits ^= top_bit(T::BITS);
    }

    T::from_bits(bits)
}

fn quantize_f64(value: f64, bits: u32) -> i64 {
    let scale = top_bit(bits) as f64;
    let max = 1.0 - (1.0 / scale).max(f64::EPSILON);
    let value = value.min(max).max(-1.0) * scale;
    round_away(value)
}

fn quantize_f32(value: f32, bits: u32) -> i64 {
    let scale = top_bit(bits) as f32;
    let max = 1.0 - (1.0 / scale).max(f32::EPSILON);
    let value = value.min(max).max(-1.0) * scale;
    round_away(f64::from(value))
}

fn round_away(value: f64) -> i64 {
    if value > 0.0 {
        (value + 0.5) as i64
    } else {
        (value - 0.5) as i64
    }
}

fn fixed_to_float<T: Sample, S: Sample>(value: S) -> T {
    let mut bits = value.to_bits();

    if !S::KIND.is_signed() {
        bits ^= top_bit(S::BITS);
    }

    let value = sign_extend(bits, S::BITS);

    if S::BITS > 23 || T::BITS == 64 {
        T::from_f64(value as f64 / top_bit(S::BITS) as f64)
    } else {
        T::from_f32(value as f32 / top_bit(S::BITS) as f32)
    }
}
