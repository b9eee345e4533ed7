use crate::domain::model::{AttributeKind, RawAttributePair, ReflectionTarget};

/// Source of declared attributes for classes and methods.
///
/// Errors are reflection failures; resolution hands them back to the caller
/// untouched.
pub trait AttributeProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_custom_attributes(
        &self,
        target: &ReflectionTarget,
        kind: AttributeKind,
    ) -> Result<Vec<RawAttributePair>, Self::Error>;
}

impl<P: AttributeProvider + ?Sized> AttributeProvider for &P {
    type Error = P::Error;

    fn get_custom_attributes(
        &self,
        target: &ReflectionTarget,
        kind: AttributeKind,
    ) -> Result<Vec<RawAttributePair>, Self::Error> {
        (**self).get_custom_attributes(target, kind)
    }
}
