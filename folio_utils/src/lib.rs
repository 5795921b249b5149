/// Returns the version string of this build.
///
/// Release builds may inject `FOLIO_VERSION` at compile time, otherwise the
/// crate version is used.
pub fn folio_version() -> &'static str {
    option_env!("FOLIO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

pub trait Apply {
    /// Passes `self` to the function `f` and returns its result.
    fn apply<U>(self, f: impl FnOnce(Self) -> U) -> U
    where
        Self: Sized,
    {
        f(self)
    }

    /// Calls `f` with the contained value if `value` is `Some`, otherwise
    /// returns `self` unchanged. Handy for optional builder settings:
    ///
    /// ```rust
    /// # use folio_utils::Apply;
    /// let timeout = Some(30);
    /// let total = 10.apply_map(timeout, |base, extra| base + extra);
    /// assert_eq!(total, 40);
    /// assert_eq!(10.apply_map(None, |base, extra: i32| base + extra), 10);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }

    /// Applies the function `f` only if `condition` is `true`.
    fn apply_if(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self
    where
        Self: Sized,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

/// Asserts that a value matches a pattern, with an optional `if` guard.
///
/// The value is only borrowed, so it can still be inspected afterwards.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $($pattern:tt)+) => {{
        let value = &$expr;
        ::core::assert!(
            ::core::matches!(value, $($pattern)+),
            "{:?} does not match `{}`",
            value,
            ::core::stringify!($($pattern)+),
        );
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_if() {
        assert_eq!(2.apply_if(true, |x| x * 10), 20);
        assert_eq!(2.apply_if(false, |x| x * 10), 2);
    }

    #[test]
    fn assert_matches_with_guard() {
        let value: Result<u8, String> = Err("boom".into());
        assert_matches!(value, Err(msg) if msg == "boom");
        assert_matches!(value, Err(_));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn assert_matches_fails() {
        assert_matches!(Some(1), None);
    }
}
