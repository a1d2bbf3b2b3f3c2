//! Macros for ergonomic scenario construction.

/// Declare a custom event enum and implement
/// [`CustomEvent`](crate::core::CustomEvent) for it.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug` and
/// serde's `Serialize`/`Deserialize`; each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use scenarist::core::CustomEvent;
/// use scenarist::custom_events;
///
/// custom_events! {
///     pub enum PasswordEvent {
///         GotPassword,
///         PasswordIsCorrect,
///         PasswordIsIncorrect,
///     }
/// }
///
/// assert_eq!(PasswordEvent::GotPassword.name(), "GotPassword");
/// ```
#[macro_export]
macro_rules! custom_events {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
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
            ),+
        }

        impl $crate::core::CustomEvent for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

/// Build a [`Params`](crate::core::Params) map from `key => value` pairs.
///
/// Keys and values may be anything implementing `Display`.
///
/// # Example
///
/// ```
/// use scenarist::params;
///
/// let params = params! { "password" => "123", "attempt" => 2 };
/// assert_eq!(params["password"], "123");
/// assert_eq!(params["attempt"], "2");
/// assert!(params! {}.is_empty());
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::core::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::core::Params::new();
        $(
            params.insert(
                ::std::string::ToString::to_string(&$key),
                ::std::string::ToString::to_string(&$value),
            );
        )+
        params
    }};
}
