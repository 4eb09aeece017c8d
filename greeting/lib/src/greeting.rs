/// Formats a greeting for `name`.
///
/// The name is used verbatim: no trimming, escaping or validation. An empty
/// name yields `"Hello !"`.
///
/// ## Examples
///
/// ```
/// use greeting_lib::greet;
///
/// assert_eq!(greet("Bob"), "Hello Bob!");
/// assert_eq!(greet(""), "Hello !");
/// ```
pub fn greet(name: &str) -> String {
    format!("Hello {name}!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn greets_bob() {
        assert_eq!(greet("Bob"), "Hello Bob!");
    }

    #[test]
    fn empty_name_keeps_both_delimiters() {
        assert_eq!(greet(""), "Hello !");
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        assert_eq!(greet("  Bob Smith "), "Hello   Bob Smith !");
    }

    #[test]
    fn unicode_passes_through() {
        assert_eq!(greet("José"), "Hello José!");
        assert_eq!(greet("世界"), "Hello 世界!");
    }

    #[test]
    fn control_characters_pass_through() {
        assert_eq!(greet("Bob\tthe\nBuilder"), "Hello Bob\tthe\nBuilder!");
    }

    proptest! {
        #[test]
        fn output_is_prefix_name_suffix(name in "[[:print:]]{1,64}") {
            let greeting = greet(&name);
            prop_assert_eq!(greeting, format!("{}{}{}", "Hello ", name, "!"));
        }

        #[test]
        fn repeated_calls_agree(name in "\\PC{0,32}") {
            prop_assert_eq!(greet(&name), greet(&name));
        }
    }
}
