//! Logging macros

/// Log a variadic argument list through a [`Logger`](crate::Logger)
///
/// Expands to a future; `.await` it.
///
/// # Examples
///
/// ```ignore
/// use pointlog::{Level, log};
///
/// log!(logger, Level::Info, "user ", user_id, " logged in").await;
/// log!(logger, Level::Debug).await;
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(,)?) => {
        $logger.log($level, &[])
    };
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($level, &[$(&$arg as &(dyn ::std::fmt::Display + ::std::marker::Sync)),+])
    };
}

/// Build a [`Fields`](crate::Fields) map from `key => value` pairs
///
/// ```ignore
/// let logger = root.with_fields(fields! { "request_id" => id, "retry" => 2 });
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::FieldValue::from($value));
        )+
        fields
    }};
}
