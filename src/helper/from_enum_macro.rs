/// Shorthand for writing a `From` impl to convert from a nested type into an enum variant.
///
/// Arguments:
/// 1. the name of your enum.
/// 2. the variant name.
/// 3. (optional) the nested type, if it differs from the variant name.
///
/// For example this:
/// ```ignore
/// impl_from_for_enum_variant!(Primitive, Box, BoxPrimitive);
/// ```
/// Will expand to this:
/// ```ignore
/// impl From<BoxPrimitive> for Primitive {
///     #[inline]
///     fn from(value: BoxPrimitive) -> Self {
///         Self::Box(value)
///     }
/// }
/// ```
macro_rules! impl_from_for_enum_variant {
    ($enum:ident, $variant:ident) => {
        impl From<$variant> for $enum {
            #[inline]
            fn from(value: $variant) -> Self {
                Self::$variant(value)
            }
        }
    };
    ($enum:ident, $variant:ident, $ty:ty) => {
        impl From<$ty> for $enum {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}
pub(crate) use impl_from_for_enum_variant;
