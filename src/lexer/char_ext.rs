//! Character classes of the CPL lexical grammar.
pub trait CharExt {
    /// Identifiers start with an ASCII letter.
    fn is_identifier_start(&self) -> bool;

    /// After the first letter, identifiers may contain ASCII letters and digits.
    fn is_identifier_continue(&self) -> bool;
}
impl CharExt for char {
    fn is_identifier_start(&self) -> bool {
        self.is_ascii_alphabetic()
    }

    fn is_identifier_continue(&self) -> bool {
        self.is_ascii_alphanumeric()
    }
}
