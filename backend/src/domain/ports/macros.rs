//! Helper macro for generating port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! arguments accept anything convertible into the field type, so adapters can
//! write `MemberRepositoryError::query(err.to_string())` or pass a `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

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
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated port errors.
    define_port_error! {
        pub enum ShelfPortError {
            Offline => "shelf offline",
            Missing { shelf: String } => "shelf {shelf} missing",
            Full { copies: i32 } => "shelf full at {copies} copies",
            Jammed { shelf: String, copies: i32 } => "shelf {shelf} jammed ({copies})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ShelfPortError::offline().to_string(), "shelf offline");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ShelfPortError::missing("A3");
        assert_eq!(err.to_string(), "shelf A3 missing");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ShelfPortError::full(12_i32);
        assert_eq!(err.to_string(), "shelf full at 12 copies");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ShelfPortError::jammed("B1", 2_i32);
        assert_eq!(err.to_string(), "shelf B1 jammed (2)");
    }
}
