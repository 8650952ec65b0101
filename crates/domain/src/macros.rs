//! Macro for implementing Display and FromStr for closed-set enums
//!
//! Form fields such as gender travel as fixed strings on the wire. This macro
//! keeps the string table in one place and gives both directions of the
//! conversion.
//!
//! # Example
//!
//! ```rust
//! use accountdesk_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Plan {
//!     Free,
//!     Paid,
//! }
//!
//! impl_domain_enum_conversions!(Plan {
//!     Free => "free",
//!     Paid => "paid",
//! });
//!
//! assert_eq!("PAID".parse::<Plan>().unwrap(), Plan::Paid);
//! assert_eq!(Plan::Free.to_string(), "free");
//! ```

/// Implements Display and FromStr for enums with a fixed string per variant.
///
/// - Display writes the mapped string verbatim
/// - FromStr matches case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of the variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
