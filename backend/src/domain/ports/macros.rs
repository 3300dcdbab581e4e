//! Helper macro for generating domain port error enums.
//!
//! Every variant carries a single `message` field; the macro derives
//! `thiserror::Error`, a snake-case constructor per variant taking
//! `impl Into<String>`, and a `message()` accessor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    /// Build this variant from any message.
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )*

            /// Message carried by the error, without the variant prefix.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message,)*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
