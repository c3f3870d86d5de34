//! The escape-time kernel.  Every pixel of every frame goes through
//! `escape_time`, so it is kept small and free of allocation.

use num::Complex;

/// What happened to one point: how many iterations it survived, and
/// whether it left the radius-2 disc before the budget ran out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EscapeResult {
    /// Iteration at which the escape test fired, or the whole budget
    /// if it never did.
    pub iterations: usize,
    /// False for points treated as members of the set.
    pub escaped: bool,
}

/// Iterate `z = z * z + c`, starting from `z = c`, until `|z|^2 > 4`
/// or `limit` iterations have passed.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: usize) -> EscapeResult {
    let mut z = c;
    for i in 0..limit {
        if z.norm_sqr() > 4.0 {
            return EscapeResult {
                iterations: i,
                escaped: true,
            };
        }
        z = z * z + c;
    }
    EscapeResult {
        iterations: limit,
        escaped: false,
    }
}
