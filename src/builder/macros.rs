//! Macros for ergonomic state identity declaration.

/// Declare a fieldless state identity enum and implement
/// [`State`](crate::core::State) for it.
///
/// The enum derives `Clone, Copy, PartialEq, Eq, Hash, Debug` and serde's
/// `Serialize`/`Deserialize`, so the calling crate needs `serde` as a
/// dependency.
///
/// # Example
///
/// ```
/// use statetree::state_enum;
/// use statetree::core::State;
///
/// state_enum! {
///     pub enum Player {
///         Top,
///         Stopped,
///         Playing,
///         Paused,
///     }
/// }
///
/// assert_eq!(Player::Paused.name(), "Paused");
/// ```
#[macro_export]
macro_rules! state_enum {
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
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
