//! Factorials and binomial coefficients for the discrete samplers.
//!
//! Values are returned as `f64`: every probability built from them is a float
//! anyway, and `f64` holds `n!` exactly up to `22!` and approximately up to
//! `170!` where a `u64` would already overflow at `21!`.

/// `n!`, with `0! = 1! = 1`. Overflows to infinity above `170!`.
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, i| acc * f64::from(i))
}

/// `ln(n!)`, summed directly so large `n` never overflows.
pub fn ln_factorial(n: u32) -> f64 {
    (2..=n).map(|i| f64::from(i).ln()).sum()
}

/// `ln(k!)` for every `k` in `0..=n` from one running sum.
///
/// Entry `k` is bit-identical to [`ln_factorial`]`(k)`, which adds the same
/// terms in the same order.
pub fn ln_factorial_table(n: u32) -> Vec<f64> {
    let mut table = Vec::with_capacity(n as usize + 1);
    let mut acc = 0.0f64;
    table.push(acc);
    for i in 1..=n {
        if i >= 2 {
            acc += f64::from(i).ln();
        }
        table.push(acc);
    }
    table
}

/// `C(n, r)`; zero when `r < 0` or `r > n`.
///
/// Uses the multiplicative form `Π (n - r + i) / i` over the smaller of `r`
/// and `n - r`, so intermediate values stay near the result instead of
/// passing through three full factorials.
pub fn binomial_coefficient(n: i64, r: i64) -> f64 {
    if r < 0 || r > n {
        return 0.0;
    }
    let r = r.min(n - r);
    let mut acc = 1.0f64;
    for i in 1..=r {
        acc = acc * (n - r + i) as f64 / i as f64;
    }
    acc.round()
}
