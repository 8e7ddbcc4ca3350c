/// An enum whose variants may carry a human-readable label.
///
/// Implement it by hand, or declare the enum with [`display_enum!`](crate::display_enum), which
/// builds both lookups as `match` tables at compile time.
///
/// # Example
///
/// ```
/// use coreext::DisplayName;
///
/// enum Priority {
///     Low,
///     High,
/// }
///
/// impl DisplayName for Priority {
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Priority::Low => "Low",
///             Priority::High => "High",
///         }
///     }
///
///     fn label(&self) -> Option<&'static str> {
///         match self {
///             Priority::High => Some("Ưu tiên cao"),
///             Priority::Low => None,
///         }
///     }
/// }
///
/// assert_eq!("Ưu tiên cao", Priority::High.display_name());
/// assert_eq!("Low", Priority::Low.display_name());
/// ```
pub trait DisplayName {
    /// The variant's identifier, e.g. `Pending`.
    fn variant_name(&self) -> &'static str;

    /// The label declared for this variant, if any.
    fn label(&self) -> Option<&'static str> {
        None
    }

    /// The declared label, or the variant's identifier when there is none.
    fn display_name(&self) -> &'static str {
        self.label().unwrap_or_else(|| self.variant_name())
    }
}

/// Declares a fieldless enum and implements [`DisplayName`] and [`Display`](core::fmt::Display)
/// for it. Follow a variant with `=> "label"` to give it a label.
///
/// ```
/// use coreext::{display_enum, DisplayName};
///
/// display_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum OrderStatus {
///         Pending => "Chờ xử lý",
///         /// Shipped to the customer.
///         Shipped => "Đã giao",
///         Cancelled,
///     }
/// }
///
/// assert_eq!("Chờ xử lý", OrderStatus::Pending.display_name());
/// assert_eq!("Cancelled", OrderStatus::Cancelled.display_name());
/// assert_eq!("Đã giao", OrderStatus::Shipped.to_string());
/// ```
#[macro_export]
macro_rules! display_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::DisplayName for $name {
            fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => ::core::stringify!($variant), )*
                }
            }

            fn label(&self) -> ::core::option::Option<&'static str> {
                match self {
                    $( Self::$variant => $crate::__display_enum_label!($($label)?), )*
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::DisplayName::display_name(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __display_enum_label {
    () => {
        ::core::option::Option::None
    };
    ($label:literal) => {
        ::core::option::Option::Some($label)
    };
}
