//! Data formatting helpers.
//!
//! Fixed-precision rendering of prices and rates, used by the lattice and
//! parameter `Display` impls.

use crate::{Rate, Real};

/// Format a rate as a percentage string (e.g. `0.05` → `"5.0000 %"`).
pub fn format_rate(r: Rate) -> String {
    format!("{:.4} %", r * 100.0)
}

/// Format a real number with the given number of decimal places.
pub fn format_real(value: Real, decimals: usize) -> String {
    format!("{:.prec$}", value, prec = decimals)
}

/// Right-align `value` with `decimals` places in a column of `width` chars.
pub fn format_real_padded(value: Real, decimals: usize, width: usize) -> String {
    format!("{:>width$.prec$}", value, width = width, prec = decimals)
}
