/// Return type for token parsers that can fall through when the input does not start with the
/// expected token.
///
/// A parser returning `Parsed` either recognized its token ([`Res`]) or left the input unchanged
/// ([`Fallthrough`]) so that the caller can try a different token. Parsers that always consume
/// input or fail return a plain [`Result`] instead. Use [`or_give_up`][Parsed::or_give_up] or
/// [`optional`][Parsed::optional] to turn a `Parsed` value into a `Result`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T, E> {
    /// The token was recognized.
    ///
    /// `Res(Ok(v))` means the token was parsed and the input advanced past it. `Res(Err(err))`
    /// means the token started as expected but continued in an invalid way, the input then points
    /// at or after the start of the offending token.
    Res(Result<T, E>),
    /// The input does not start with the expected token and was left unchanged.
    Fallthrough,
}

pub use Parsed::*;

impl<T, E> Parsed<T, E> {
    /// Fails irrecoverably if the input did not start with the expected token.
    #[inline]
    pub fn or_give_up(self, err: impl FnOnce() -> E) -> Result<T, E> {
        match self {
            Res(result) => result,
            Fallthrough => Err(err()),
        }
    }

    /// Returns `None` if the input did not start with the expected token.
    #[inline]
    pub fn optional(self) -> Result<Option<T>, E> {
        match self {
            Res(Ok(value)) => Ok(Some(value)),
            Res(Err(err)) => Err(err),
            Fallthrough => Ok(None),
        }
    }

    /// Transforms an error, leaving successfully parsed values and fallthrough unchanged.
    #[inline]
    pub fn map_err<E2>(self, f: impl FnOnce(E) -> E2) -> Parsed<T, E2> {
        match self {
            Res(Ok(value)) => Res(Ok(value)),
            Res(Err(err)) => Res(Err(f(err))),
            Fallthrough => Fallthrough,
        }
    }
}
