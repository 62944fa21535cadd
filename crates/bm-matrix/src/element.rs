/// Capability set a type must provide to be usable as a matrix element.
///
/// Matrix addition and multiplication only ever need three things from an
/// element: an additive identity, an in-place add, and a multiply that
/// produces the same type. Scalars satisfy this trivially; a square `Matrix`
/// satisfies it through its own operators, which is what makes the nested
/// (matrix-of-matrices) instantiation work without special cases.
pub trait Accumulable: Clone {
    /// The additive identity value.
    fn zero() -> Self;

    /// In-place add: `self = self + rhs`.
    fn accumulate(&mut self, rhs: &Self);

    /// Multiply, producing a value of the same type.
    fn mul(&self, rhs: &Self) -> Self;
}

macro_rules! impl_accumulable_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Accumulable for $t {
                fn zero() -> Self {
                    0 as $t
                }

                fn accumulate(&mut self, rhs: &Self) {
                    *self += *rhs;
                }

                fn mul(&self, rhs: &Self) -> Self {
                    *self * *rhs
                }
            }
        )*
    };
}

impl_accumulable_scalar!(f32, f64, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_zero() {
        assert_eq!(<f64 as Accumulable>::zero(), 0.0);
        assert_eq!(<i32 as Accumulable>::zero(), 0);
    }

    #[test]
    fn test_scalar_accumulate() {
        let mut x = 1.5f64;
        x.accumulate(&2.25);
        assert_eq!(x, 3.75);

        let mut n = 7i64;
        n.accumulate(&-3);
        assert_eq!(n, 4);
    }

    #[test]
    fn test_scalar_mul() {
        assert_eq!(Accumulable::mul(&3.0f32, &4.0), 12.0);
        assert_eq!(Accumulable::mul(&-2i32, &5), -10);
    }
}
