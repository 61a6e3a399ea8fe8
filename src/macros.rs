// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
///
/// ```
/// # #[macro_use] extern crate lighting_filters;
/// assert_eq!(s!("L201"), String::from("L201"));
/// assert!(s!().is_empty());
/// ```
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into a new `String`.
///
/// ```
/// # #[macro_use] extern crate lighting_filters;
/// assert_eq!(join!("Pale", " ", "Amber"), "Pale Amber");
/// ```
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $( out.push_str($rest); )+
        out
    }};
}
