/// Stores an enum in a text column through its `as_str` / `FromStr` pair.
///
/// Mirrors what `sea-orm` needs for a custom column type: conversion into a
/// `Value`, reading back from a `QueryResult`, and a typed `NULL` so the
/// enum can sit behind an `Option`.
macro_rules! impl_text_value {
    ($name:ident) => {
        #[cfg(feature = "database")]
        impl sea_orm::sea_query::ValueType for $name {
            fn try_from(v: sea_orm::Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
                match v {
                    sea_orm::Value::String(Some(s)) => s
                        .parse::<$name>()
                        .map_err(|_| sea_orm::sea_query::ValueTypeErr),
                    _ => Err(sea_orm::sea_query::ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($name).to_string()
            }

            fn array_type() -> sea_orm::sea_query::ArrayType {
                sea_orm::sea_query::ArrayType::String
            }

            fn column_type() -> sea_orm::sea_query::ColumnType {
                sea_orm::sea_query::ColumnType::Text
            }
        }

        #[cfg(feature = "database")]
        impl From<$name> for sea_orm::Value {
            fn from(value: $name) -> Self {
                sea_orm::Value::String(Some(Box::new(value.as_str().to_owned())))
            }
        }

        #[cfg(feature = "database")]
        impl sea_orm::TryGetable for $name {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &sea_orm::QueryResult,
                index: I,
            ) -> Result<Self, sea_orm::TryGetError> {
                let val: String = res.try_get_by(index)?;

                val.parse::<$name>().map_err(|_| {
                    sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                        "Failed to parse {} from {val:?}",
                        stringify!($name)
                    )))
                })
            }
        }

        #[cfg(feature = "database")]
        impl sea_orm::sea_query::Nullable for $name {
            fn null() -> sea_orm::Value {
                sea_orm::Value::String(None)
            }
        }
    };
}

pub(crate) use impl_text_value;
