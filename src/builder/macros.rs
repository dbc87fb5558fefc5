//! Macros for ergonomic state and input declarations.

/// Declare a unit-only enum usable as a state or an input.
///
/// Derives `Clone, Copy, PartialEq, Eq, Hash, Debug` plus serde's
/// `Serialize` and `Deserialize`, so the enum can appear in a
/// [`TableSnapshot`](crate::table::TableSnapshot). It also adds a `name()`
/// method, an `ALL` constant listing every variant in declaration order, and
/// a `Display` impl printing the variant name.
///
/// The calling crate must depend on `serde`.
///
/// # Example
///
/// ```
/// use statewise::symbol_enum;
///
/// symbol_enum! {
///     pub enum Signal {
///         Red,
///         Yellow,
///         Green,
///     }
/// }
///
/// assert_eq!(Signal::ALL.len(), 3);
/// assert_eq!(Signal::Yellow.name(), "Yellow");
/// assert_eq!(Signal::Green.to_string(), "Green");
/// ```
#[macro_export]
macro_rules! symbol_enum {
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
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Variant name for display/logging.
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
