//! Helper macro for declaring port error enums.
//!
//! Every variant carries named fields; a snake-case constructor accepting
//! `impl Into<_>` for each field is generated alongside the enum.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Construct the `" $variant "` variant."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Refused { message: String } => "refused: {message}",
            Partial { message: String, done: u32 } => "partial: {message} ({done})",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(SamplePortError::refused("nope").to_string(), "refused: nope");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::partial("halfway", 3_u32);
        assert_eq!(err.to_string(), "partial: halfway (3)");
    }
}
