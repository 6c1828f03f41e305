//! Parameter macros

/// Creates a [`Params`](crate::types::Params) map with minimal syntax.
///
/// # Example
///
/// ```
/// use cryptoexchange::params;
///
/// let params = params! {
///     "symbol" => "BTCUSDT",
///     "limit" => 10,
/// };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::types::Params::new();
        $(
            map.insert(
                ::std::string::String::from($key),
                $crate::types::ParamValue::from($value),
            );
        )*
        map
    }};
}
