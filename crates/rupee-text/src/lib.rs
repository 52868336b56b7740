//! Rupee Text - Indian numbering word forms
//!
//! This crate provides:
//! - Integer to words using the Indian scale (thousand, lakh, crore)
//! - The `RUPEES ... ONLY` caption printed under a net-pay figure
//! - Fixed-precision amount rendering for payslip cells
//!
//! # Example
//!
//! ```
//! use rupee_text::{rupees_in_words, words_of};
//!
//! assert_eq!(words_of(100000), "One Lakh");
//! assert_eq!(rupees_in_words(1250.75), "RUPEES ONE THOUSAND TWO HUNDRED FIFTY ONLY");
//! ```

mod formatter;

pub use formatter::{render_amount, rupees_in_words, words_of};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_of() {
        assert_eq!(words_of(0), "Zero");
        assert_eq!(words_of(-5), "Minus Five");
        assert_eq!(words_of(100000), "One Lakh");
    }

    #[test]
    fn test_rupees_in_words() {
        assert_eq!(rupees_in_words(0.0), "RUPEES ZERO ONLY");
        assert_eq!(rupees_in_words(21.0), "RUPEES TWENTY ONE ONLY");
    }
}
