//! Quarter-round mixing functions.

/// Multiply-add used by Argon2 in place of plain addition.
///
/// ```text
/// fBlaMka(x, y) = x + y + 2 × lo32(x) × lo32(y)   (mod 2⁶⁴)
/// ```
///
/// Wraparound is part of the definition.
#[inline(always)]
pub(crate) fn f_blamka(x: u64, y: u64) -> u64 {
    let xy = (x & 0xFFFF_FFFF) * (y & 0xFFFF_FFFF);
    x.wrapping_add(y).wrapping_add(xy.wrapping_mul(2))
}

/// BLAKE2b mixing function G (RFC 7693 §3.1).
///
/// Mixes two message words `x` and `y` into the working vector entries
/// `a`, `b`, `c`, `d` using plain modular addition.
#[inline(always)]
pub(crate) fn blake2b_g(
    v: &mut [u64; 16],
    a: usize,
    b: usize,
    c: usize,
    d: usize,
    x: u64,
    y: u64,
) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);

    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// GB mixing function (Argon2 variant of BLAKE2b's G).
///
/// Same rotation schedule as [`blake2b_g`], but every addition is an
/// [`f_blamka`] and there are no message words.
#[inline(always)]
pub(crate) fn blamka_g(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    let a = f_blamka(a, b);
    let d = (d ^ a).rotate_right(32);
    let c = f_blamka(c, d);
    let b = (b ^ c).rotate_right(24);

    let a = f_blamka(a, b);
    let d = (d ^ a).rotate_right(16);
    let c = f_blamka(c, d);
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}
