//! Names of every routine the dispatch layer routes.

use std::fmt;

/// BLAS level a routine belongs to. Batch routines are reported as `Batch`
/// and the mixed-precision extensions as `Extension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    One,
    Two,
    Three,
    Batch,
    Extension,
}

macro_rules! routines {
    ($($variant:ident => $name:literal, $level:ident;)+) => {
        /// A BLAS operation name, independent of element type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Routine {
            $($variant,)+
        }

        impl Routine {
            /// Every routine, in alphabetical order.
            pub const ALL: &'static [Routine] = &[$(Routine::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Routine::$variant => $name,)+
                }
            }

            pub fn level(self) -> Level {
                match self {
                    $(Routine::$variant => Level::$level,)+
                }
            }
        }
    };
}

routines! {
    Asum => "asum", One;
    Axpy => "axpy", One;
    AxpyBatch => "axpy_batch", Batch;
    Copy => "copy", One;
    Dot => "dot", One;
    Dotc => "dotc", One;
    Dotu => "dotu", One;
    Gbmv => "gbmv", Two;
    Gemm => "gemm", Three;
    GemmBatch => "gemm_batch", Batch;
    GemmExt => "gemm_ext", Extension;
    Gemmt => "gemmt", Three;
    Gemv => "gemv", Two;
    Ger => "ger", Two;
    Gerc => "gerc", Two;
    Geru => "geru", Two;
    Hbmv => "hbmv", Two;
    Hemm => "hemm", Three;
    Hemv => "hemv", Two;
    Her => "her", Two;
    Her2 => "her2", Two;
    Her2k => "her2k", Three;
    Herk => "herk", Three;
    Hpmv => "hpmv", Two;
    Hpr => "hpr", Two;
    Hpr2 => "hpr2", Two;
    Iamax => "iamax", One;
    Iamin => "iamin", One;
    Nrm2 => "nrm2", One;
    Rot => "rot", One;
    Rotg => "rotg", One;
    Rotm => "rotm", One;
    Rotmg => "rotmg", One;
    Sbmv => "sbmv", Two;
    Scal => "scal", One;
    Sdsdot => "sdsdot", Extension;
    Spmv => "spmv", Two;
    Spr => "spr", Two;
    Spr2 => "spr2", Two;
    Swap => "swap", One;
    Symm => "symm", Three;
    Symv => "symv", Two;
    Syr => "syr", Two;
    Syr2 => "syr2", Two;
    Syr2k => "syr2k", Three;
    Syrk => "syrk", Three;
    Tbmv => "tbmv", Two;
    Tbsv => "tbsv", Two;
    Tpmv => "tpmv", Two;
    Tpsv => "tpsv", Two;
    Trmm => "trmm", Three;
    Trmv => "trmv", Two;
    Trsm => "trsm", Three;
    TrsmBatch => "trsm_batch", Batch;
    Trsv => "trsv", Two;
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sorted_and_unique() {
        let names: Vec<_> = Routine::ALL.iter().map(|r| r.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(Routine::ALL.len(), 55);
    }

    #[test]
    fn test_levels() {
        assert_eq!(Routine::Axpy.level(), Level::One);
        assert_eq!(Routine::Sbmv.level(), Level::Two);
        assert_eq!(Routine::Her2k.level(), Level::Three);
        assert_eq!(Routine::TrsmBatch.level(), Level::Batch);
        assert_eq!(Routine::GemmExt.level(), Level::Extension);
    }
}
