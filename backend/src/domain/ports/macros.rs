//! Defines helper macros for generating domain port error enums.
//!
//! Every variant carries named fields; the macro emits a `thiserror` enum and
//! a snake-case constructor per variant whose parameters accept anything
//! convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum LookupError {
            Missing { key: String } => "no entry for {key}",
            Saturated { capacity: usize } => "store is full ({capacity} entries)",
            Rejected { key: String, attempts: u32 } => "{key} rejected after {attempts} attempts",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LookupError::missing("a@b.com");
        assert_eq!(err.to_string(), "no entry for a@b.com");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = LookupError::saturated(8_usize);
        assert_eq!(err.to_string(), "store is full (8 entries)");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = LookupError::rejected("a@b.com", 3_u32);
        assert_eq!(err, LookupError::Rejected {
            key: "a@b.com".to_owned(),
            attempts: 3,
        });
        assert_eq!(err.to_string(), "a@b.com rejected after 3 attempts");
    }
}
