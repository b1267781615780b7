//! Macros for declaring identifier enums.

/// Declare a fieldless enum satisfying the identifier bounds.
///
/// Derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, and `Debug`, and
/// implements `Display` using the variant name — the text that appears in
/// rendered diagrams.
///
/// # Example
///
/// ```
/// machina::id_enum! {
///     pub enum Posture {
///         Standing,
///         Sitting,
///     }
/// }
///
/// assert_eq!(Posture::Standing.to_string(), "Standing");
/// assert_ne!(Posture::Standing, Posture::Sitting);
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let name = match self {
                    $(Self::$variant => stringify!($variant)),*
                };
                f.write_str(name)
            }
        }
    };
}
