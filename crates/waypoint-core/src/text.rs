//! Small string helpers shared across the workspace.

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use waypoint_core::text::capfirst;
///
/// assert_eq!(capfirst("blog"), "Blog");
/// assert_eq!(capfirst("Blog"), "Blog");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}
