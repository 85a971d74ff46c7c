//! Element types.
//!
//! The BLAS element type is a closed set. `BlasScalar` covers the four types
//! every routine family is defined for; the mixed-precision extensions add
//! `f16`, `bf16` and the integer GEMM operands, all described by [`DType`].

use std::fmt;
use std::ops::Neg;

use half::{bf16, f16};
use num_complex::{Complex32, Complex64};
use num_traits::{Float, NumAssign};

use crate::routine::Routine;

/// Type tag for element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    #[default]
    F32,
    F64,
    C32,
    C64,
    F16,
    BF16,
    I8,
    U8,
    I32,
    I64,
}

impl DType {
    /// Size of one element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F64 => 8,
            DType::C32 => 8,
            DType::C64 => 16,
            DType::F16 | DType::BF16 => 2,
            DType::I8 | DType::U8 => 1,
            DType::I32 => 4,
            DType::I64 => 8,
        }
    }

    /// BLAS naming prefix (`s` in `sgemm`, `z` in `zherk`).
    pub fn blas_prefix(self) -> &'static str {
        match self {
            DType::F32 => "s",
            DType::F64 => "d",
            DType::C32 => "c",
            DType::C64 => "z",
            DType::F16 => "h",
            DType::BF16 => "bf16_",
            DType::I8 => "s8_",
            DType::U8 => "u8_",
            DType::I32 => "i32_",
            DType::I64 => "i64_",
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, DType::C32 | DType::C64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::C32 => "complex<f32>",
            DType::C64 => "complex<f64>",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::I8 => "i8",
            DType::U8 => "u8",
            DType::I32 => "i32",
            DType::I64 => "i64",
        })
    }
}

/// Plain element that may be stored in a managed buffer or unified allocation.
pub trait Element: Copy + Send + Sync + fmt::Debug + 'static {
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),+ $(,)?) => {
        $(impl Element for $ty {
            const DTYPE: DType = DType::$dtype;
        })+
    };
}

impl_element! {
    f32 => F32,
    f64 => F64,
    Complex32 => C32,
    Complex64 => C64,
    f16 => F16,
    bf16 => BF16,
    i8 => I8,
    u8 => U8,
    i32 => I32,
    i64 => I64,
}

/// One of the four element types every BLAS family is defined for.
pub trait BlasScalar:
    Element + Default + PartialEq + NumAssign + Neg<Output = Self>
{
    /// Real counterpart (`f32` for `Complex32`, itself for reals).
    type Real: RealScalar;

    fn conj(self) -> Self;
    /// `|re| + |im|`, the magnitude BLAS uses for `asum` and `i?amax`.
    fn abs1(self) -> Self::Real;
    /// `re^2 + im^2`.
    fn norm_sqr(self) -> Self::Real;
    fn from_real(re: Self::Real) -> Self;
    fn re(self) -> Self::Real;
}

/// `f32` or `f64`.
pub trait RealScalar: BlasScalar<Real = Self> + Float + PartialOrd {}

/// `Complex32` or `Complex64`.
pub trait ComplexScalar: BlasScalar {
    fn new(re: Self::Real, im: Self::Real) -> Self;
    fn im(self) -> Self::Real;
}

macro_rules! impl_real {
    ($($ty:ty),+) => {
        $(
            impl BlasScalar for $ty {
                type Real = $ty;

                #[inline(always)]
                fn conj(self) -> Self {
                    self
                }

                #[inline(always)]
                fn abs1(self) -> Self {
                    self.abs()
                }

                #[inline(always)]
                fn norm_sqr(self) -> Self {
                    self * self
                }

                #[inline(always)]
                fn from_real(re: Self) -> Self {
                    re
                }

                #[inline(always)]
                fn re(self) -> Self {
                    self
                }
            }

            impl RealScalar for $ty {}
        )+
    };
}

macro_rules! impl_complex {
    ($($ty:ty => $real:ty),+) => {
        $(
            impl BlasScalar for $ty {
                type Real = $real;

                #[inline(always)]
                fn conj(self) -> Self {
                    <$ty>::conj(&self)
                }

                #[inline(always)]
                fn abs1(self) -> $real {
                    self.re.abs() + self.im.abs()
                }

                #[inline(always)]
                fn norm_sqr(self) -> $real {
                    <$ty>::norm_sqr(&self)
                }

                #[inline(always)]
                fn from_real(re: $real) -> Self {
                    <$ty>::new(re, 0.0)
                }

                #[inline(always)]
                fn re(self) -> $real {
                    self.re
                }
            }

            impl ComplexScalar for $ty {
                #[inline(always)]
                fn new(re: $real, im: $real) -> Self {
                    <$ty>::new(re, im)
                }

                #[inline(always)]
                fn im(self) -> $real {
                    self.im
                }
            }
        )+
    };
}

impl_real!(f32, f64);
impl_complex!(Complex32 => f32, Complex64 => f64);

/// A routine instantiated for one element type, e.g. `sgemm` or `zherk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryPoint {
    pub routine: Routine,
    pub dtype: DType,
}

impl EntryPoint {
    pub fn new(routine: Routine, dtype: DType) -> Self {
        Self { routine, dtype }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.routine {
            // i?amax / i?amin put the prefix after the leading `i`.
            Routine::Iamax | Routine::Iamin => {
                write!(f, "i{}{}", self.dtype.blas_prefix(), &self.routine.as_str()[1..])
            }
            // Only defined for f32 and already carries its prefix.
            Routine::Sdsdot => f.write_str("sdsdot"),
            _ => write!(f, "{}{}", self.dtype.blas_prefix(), self.routine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs1_complex() {
        let z = Complex64::new(-3.0, 4.0);
        assert_eq!(z.abs1(), 7.0);
        assert_eq!(BlasScalar::norm_sqr(z), 25.0);
        assert_eq!(BlasScalar::conj(z), Complex64::new(-3.0, -4.0));
    }

    #[test]
    fn test_real_scalar_identity() {
        assert_eq!((-2.5f32).abs1(), 2.5);
        assert_eq!(BlasScalar::conj(1.5f64), 1.5);
        assert_eq!(<f64 as BlasScalar>::from_real(2.0), 2.0);
    }

    #[test]
    fn test_dtype_tags() {
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<Complex32 as Element>::DTYPE, DType::C32);
        assert_eq!(<bf16 as Element>::DTYPE, DType::BF16);
        assert!(DType::C64.is_complex());
        assert_eq!(DType::C64.element_size(), 16);
    }

    #[test]
    fn test_entry_point_names() {
        assert_eq!(EntryPoint::new(Routine::Gemm, DType::F32).to_string(), "sgemm");
        assert_eq!(EntryPoint::new(Routine::Herk, DType::C64).to_string(), "zherk");
        assert_eq!(EntryPoint::new(Routine::Iamax, DType::F64).to_string(), "idamax");
        assert_eq!(EntryPoint::new(Routine::Sdsdot, DType::F32).to_string(), "sdsdot");
    }
}
