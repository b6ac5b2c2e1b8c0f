//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Lark query parameters such as `receive_id_type` travel as lowercase
//! snake_case strings. This macro maps enum variants to those strings in both
//! directions, parsing case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use larkbridge_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum MessageKind {
//!     Text,
//!     Post,
//!     Interactive,
//! }
//!
//! impl_wire_enum_conversions!(MessageKind {
//!     Text => "text",
//!     Post => "post",
//!     Interactive => "interactive",
//! });
//!
//! assert_eq!(MessageKind::Post.to_string(), "post");
//! assert_eq!("TEXT".parse::<MessageKind>().unwrap(), MessageKind::Text);
//! ```

/// Implements Display and FromStr for an enum with a fixed wire spelling.
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase wire
///   representation
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of this variant.
            pub const fn as_str(&self) -> &'static str {
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
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
