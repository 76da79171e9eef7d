use std::{
    fmt,
    fmt::{Debug, Display},
};

/// A wrapper for credentials and other values that must never end up in logs.
///
/// Both `Debug` and `Display` print `****`. Access to the wrapped value is explicit, via [`Secret::reveal`].
#[derive(Clone, Default)]
pub struct Secret<T: Clone + Default>(T);

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn reveal(&self) -> &T {
        &self.0
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****")
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****")
    }
}
