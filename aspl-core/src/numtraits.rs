//! Ordering helpers for priority values.

/// Helper trait, providing total ordering for non-`Ord` types such as `f64`.
pub trait IntoOrd {
    /// Some substitute `Ord` type which can be used instead of `Self` for ordering purposes.
    /// Only should be used for comparisons, its value itself is meaningless.
    type Output: Ord;

    /// Convert self into `Ord`-supporting type `Self::Output`.
    fn into_ord(self) -> Self::Output;
}

impl IntoOrd for f64 {
    type Output = i64;

    /// Same order as `f64::total_cmp()`: `-inf < ... < -0.0 < 0.0 < ... < +inf`.
    /// NaN is not a valid priority.
    fn into_ord(self) -> Self::Output {
        debug_assert!(!self.is_nan(), "NaN priority detected");
        let x = self.to_bits() as i64;
        x ^ (((x >> 63) as u64) >> 1) as i64
    }
}

impl IntoOrd for f32 {
    type Output = i32;

    fn into_ord(self) -> Self::Output {
        debug_assert!(!self.is_nan(), "NaN priority detected");
        let x = self.to_bits() as i32;
        x ^ (((x >> 31) as u32) >> 1) as i32
    }
}

macro_rules! impl_into_ord_identity {
    ($($t:ty),*) => {
        $(
            impl IntoOrd for $t {
                type Output = $t;

                #[inline]
                fn into_ord(self) -> Self::Output {
                    self
                }
            }
        )*
    };
}

impl_into_ord_identity!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[test]
fn test_into_ord_f64() {
    let ord = |x: f64| x.into_ord();
    assert!(ord(0.0) > ord(-1.0));
    assert!(ord(0.0) < ord(1.0));
    assert!(ord(-1.0) < ord(1.0));
    assert!(ord(2.0) > ord(1.0));
    assert!(ord(-2.0) < ord(-1.0));
    assert!(ord(100.0) > ord(10.0));
    assert!(ord(f64::INFINITY) > ord(f64::MAX));
    assert!(ord(f64::NEG_INFINITY) < ord(f64::MIN));
    assert!(ord(0.0) > ord(-0.0));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "NaN priority detected")]
fn test_into_ord_rejects_nan() {
    let _ = f64::NAN.into_ord();
}

#[test]
fn test_into_ord_f32() {
    let ord = |x: f32| x.into_ord();
    assert!(ord(0.5) > ord(0.25));
    assert!(ord(-0.5) < ord(-0.25));
    assert!(ord(f32::INFINITY) > ord(1e30));
}

#[test]
fn test_into_ord_int() {
    assert_eq!(5_u32.into_ord(), 5);
    assert!((-3_i64).into_ord() < 2_i64.into_ord());
}
