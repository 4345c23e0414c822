//! The 2D cosine basis shared by the encoder and decoder, and the header
//! arithmetic that ties component counts to hash length.

use std::f64::consts::PI;

use crate::error::{BlurhashError, Result};

/// Smallest and largest component count on either axis.
pub const MIN_COMPONENTS: u32 = 1;
pub const MAX_COMPONENTS: u32 = 9;

/// Number of base83 digits in each field of a hash.
pub(crate) const SIZE_FLAG_DIGITS: usize = 1;
pub(crate) const MAX_VALUE_DIGITS: usize = 1;
pub(crate) const DC_DIGITS: usize = 4;
pub(crate) const AC_DIGITS: usize = 2;

/// Offset of the first AC digit pair.
pub(crate) const AC_OFFSET: usize = SIZE_FLAG_DIGITS + MAX_VALUE_DIGITS + DC_DIGITS;

pub(crate) fn check_component_count(components_x: u32, components_y: u32) -> Result<()> {
    for (component, value) in [("x", components_x), ("y", components_y)] {
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&value) {
            return Err(BlurhashError::InvalidComponentCount { component, value });
        }
    }
    Ok(())
}

/// The single-digit size flag, `(x - 1) + (y - 1) * 9`.
///
/// Counts must already have passed [`check_component_count`].
pub(crate) fn size_flag(components_x: u32, components_y: u32) -> u32 {
    (components_x - 1) + (components_y - 1) * 9
}

/// Component counts encoded by a size flag `(x - 1) + (y - 1) * 9`.
///
/// Flags above 80 yield a `y` count of 10, which callers reject.
pub fn components_from_flag(flag: u32) -> (u32, u32) {
    (flag % 9 + 1, flag / 9 + 1)
}

/// Total hash length for a component grid: `4 + 2 * x * y`.
///
/// ```
/// use blurhash_codec::basis::hash_len;
/// assert_eq!(hash_len(1, 1), 6);
/// assert_eq!(hash_len(4, 3), 28);
/// assert_eq!(hash_len(9, 9), 166);
/// ```
pub fn hash_len(components_x: u32, components_y: u32) -> usize {
    AC_OFFSET + AC_DIGITS * (components_x as usize * components_y as usize - 1)
}

/// `cos(PI * c * p / len)` for every component `c` and sample position `p`.
pub(crate) struct CosineTable {
    len: usize,
    values: Vec<f64>,
}

impl CosineTable {
    pub(crate) fn new(components: u32, len: u32) -> Self {
        let n = len as usize;
        let lenf = f64::from(len);
        let values = (0..components)
            .flat_map(|c| (0..len).map(move |p| (PI * f64::from(c) * f64::from(p) / lenf).cos()))
            .collect();
        CosineTable { len: n, values }
    }

    /// Basis values of component `c` along the axis.
    #[inline]
    pub(crate) fn row(&self, c: usize) -> &[f64] {
        &self.values[c * self.len..(c + 1) * self.len]
    }

    #[inline]
    pub(crate) fn get(&self, c: usize, p: usize) -> f64 {
        self.values[c * self.len + p]
    }
}

/// Linear-RGB coefficients of the cosine expansion.
///
/// Cell `(i, j)` lives at index `j * components_x + i`; index 0 is the DC term.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGrid {
    components_x: u32,
    components_y: u32,
    cells: Vec<[f64; 3]>,
}

impl ComponentGrid {
    pub(crate) fn from_cells(components_x: u32, components_y: u32, cells: Vec<[f64; 3]>) -> Self {
        debug_assert_eq!(cells.len(), (components_x * components_y) as usize);
        ComponentGrid {
            components_x,
            components_y,
            cells,
        }
    }

    pub fn components_x(&self) -> u32 {
        self.components_x
    }

    pub fn components_y(&self) -> u32 {
        self.components_y
    }

    /// The average color.
    pub fn dc(&self) -> [f64; 3] {
        self.cells[0]
    }

    /// AC terms in hash order.
    pub fn ac(&self) -> &[[f64; 3]] {
        &self.cells[1..]
    }

    /// All cells, DC first.
    pub fn cells(&self) -> &[[f64; 3]] {
        &self.cells
    }

    /// Coefficient of component `(i, j)`.
    pub fn get(&self, i: u32, j: u32) -> Option<[f64; 3]> {
        if i >= self.components_x || j >= self.components_y {
            return None;
        }
        self.cells.get((j * self.components_x + i) as usize).copied()
    }

    /// Largest absolute AC value over every channel, 0 when there are none.
    pub fn max_ac_magnitude(&self) -> f64 {
        self.ac()
            .iter()
            .flatten()
            .fold(0.0f64, |max, v| max.max(v.abs()))
    }
}
