//! CBLAS-style layout and operand enumerations.
//!
//! Discriminants match the CBLAS header so every enum casts straight to the
//! `c_int` the vendor libraries expect. The public vblas API is column-major;
//! `Layout` is carried for forwarding to CBLAS entry points.

use std::fmt;

/// Memory layout for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    RowMajor = 101,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    #[default]
    ColMajor = 102,
}

/// Transpose operation for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Transpose {
    /// No transpose.
    #[default]
    NoTrans = 111,
    /// Transpose.
    Trans = 112,
    /// Conjugate transpose (for complex types).
    ConjTrans = 113,
}

impl Layout {
    /// Leading dimension stride for an M x N matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Linear index into a flat array for element (i, j) of an M x N matrix.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }
}

impl Transpose {
    /// True for `Trans` and `ConjTrans`.
    #[inline(always)]
    pub fn is_trans(self) -> bool {
        !matches!(self, Transpose::NoTrans)
    }

    /// Stored rows of `A` when `op(A)` is `rows x cols`.
    #[inline(always)]
    pub fn stored_rows(self, rows: i64, cols: i64) -> i64 {
        if self.is_trans() {
            cols
        } else {
            rows
        }
    }

    /// Stored columns of `A` when `op(A)` is `rows x cols`.
    #[inline(always)]
    pub fn stored_cols(self, rows: i64, cols: i64) -> i64 {
        if self.is_trans() {
            rows
        } else {
            cols
        }
    }
}

/// BLAS triangle specifier (upper/lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Uplo {
    #[default]
    Upper = 121,
    Lower = 122,
}

/// BLAS side specifier (left/right multiplication).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Side {
    #[default]
    Left = 141,
    Right = 142,
}

/// BLAS diagonal specifier (unit/non-unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Diag {
    #[default]
    NonUnit = 131,
    Unit = 132,
}

/// Shape of the `co` offset vector of integer GEMM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Offset {
    /// One offset per row of C (`m` entries).
    Row = 171,
    /// One offset per column of C (`n` entries).
    Col = 172,
    /// A single offset for all of C.
    #[default]
    Fix = 173,
}

impl Offset {
    /// Number of entries the `co` vector must hold for an `m x n` result.
    pub fn len(self, m: i64, n: i64) -> i64 {
        match self {
            Offset::Row => m,
            Offset::Col => n,
            Offset::Fix => 1,
        }
    }
}

macro_rules! impl_display {
    ($($ty:ident { $($variant:ident => $name:literal),+ $(,)? })+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(match self {
                        $($ty::$variant => $name,)+
                    })
                }
            }
        )+
    };
}

impl_display! {
    Layout { RowMajor => "row_major", ColMajor => "col_major" }
    Transpose { NoTrans => "N", Trans => "T", ConjTrans => "C" }
    Uplo { Upper => "U", Lower => "L" }
    Side { Left => "L", Right => "R" }
    Diag { NonUnit => "N", Unit => "U" }
    Offset { Row => "R", Col => "C", Fix => "F" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cblas_discriminants() {
        assert_eq!(Layout::ColMajor as u32, 102);
        assert_eq!(Transpose::ConjTrans as u32, 113);
        assert_eq!(Uplo::Lower as u32, 122);
        assert_eq!(Diag::Unit as u32, 132);
        assert_eq!(Side::Right as u32, 142);
        assert_eq!(Offset::Fix as u32, 173);
    }

    #[test]
    fn test_col_major_index() {
        // 3x2 column-major, ld = 4
        assert_eq!(Layout::ColMajor.index(2, 1, 4), 6);
        assert_eq!(Layout::RowMajor.index(2, 1, 4), 9);
        assert_eq!(Layout::ColMajor.leading_dim(3, 2), 3);
    }

    #[test]
    fn test_stored_dims() {
        assert_eq!(Transpose::NoTrans.stored_rows(5, 7), 5);
        assert_eq!(Transpose::Trans.stored_rows(5, 7), 7);
        assert_eq!(Transpose::ConjTrans.stored_cols(5, 7), 5);
        assert_eq!(Offset::Row.len(4, 9), 4);
        assert_eq!(Offset::Fix.len(4, 9), 1);
    }
}
