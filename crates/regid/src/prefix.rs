/// Returns the descriptive prefix of a display name, such as `Phường` in
/// `Phường Ba Đình`.
///
/// The first occurrence of `name` is removed from `full_name` and the
/// remainder is trimmed. The match is not anchored: a name that also appears
/// earlier in the display name is removed there. If `name` does not occur at
/// all, the trimmed display name is returned unchanged.
///
/// Returns an empty string when either input is empty.
///
/// # Example
///
/// ```
/// use regid::extract_prefix;
///
/// assert_eq!(extract_prefix("Xã A Dơi", "A Dơi"), "Xã");
/// assert_eq!(extract_prefix("", "A Dơi"), "");
/// ```
pub fn extract_prefix(full_name: &str, name: &str) -> String {
    if full_name.is_empty() || name.is_empty() {
        return String::new();
    }
    full_name.replacen(name, "", 1).trim().to_owned()
}
