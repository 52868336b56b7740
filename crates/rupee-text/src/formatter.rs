//! Indian number words and amount formatting

/// Words for 1-9 (index 0 is intentionally empty)
const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

/// Words for 10-19
const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

/// Words for the tens digit (20-90)
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Magnitude bands, largest first. Order matters: each band consumes the
/// quotient of its divisor and hands the remainder to the next one.
const BANDS: [(u64, &str); 4] = [
    (10_000_000, "Crore"),
    (100_000, "Lakh"),
    (1_000, "Thousand"),
    (100, "Hundred"),
];

/// Format an integer as English words using the Indian numbering system
///
/// # Examples
/// ```
/// use rupee_text::words_of;
/// assert_eq!(words_of(0), "Zero");
/// assert_eq!(words_of(-5), "Minus Five");
/// assert_eq!(words_of(1234567), "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven");
/// ```
pub fn words_of(n: i64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut words = Vec::new();
    push_words(n.unsigned_abs(), &mut words);
    let body = words.join(" ");

    if n < 0 {
        format!("Minus {body}")
    } else {
        body
    }
}

/// Append the words for `n` (n > 0) band by band
fn push_words(mut n: u64, out: &mut Vec<&'static str>) {
    for (divisor, band) in BANDS {
        if n >= divisor {
            // The crore quotient is unbounded, so it is spelled recursively.
            push_words(n / divisor, out);
            out.push(band);
            n %= divisor;
        }
    }
    push_two_digits(n, out);
}

/// Terminal band: 0-99
fn push_two_digits(n: u64, out: &mut Vec<&'static str>) {
    let n = n as usize;
    match n {
        0 => {}
        1..=9 => out.push(ONES[n]),
        10..=19 => out.push(TEENS[n - 10]),
        _ => {
            out.push(TENS[n / 10]);
            if n % 10 != 0 {
                out.push(ONES[n % 10]);
            }
        }
    }
}

/// Format an amount as `RUPEES <WORDS> ONLY`
///
/// The fractional part is dropped (truncated toward zero), not rounded.
///
/// # Examples
/// ```
/// use rupee_text::rupees_in_words;
/// assert_eq!(rupees_in_words(69291.67), "RUPEES SIXTY NINE THOUSAND TWO HUNDRED NINETY ONE ONLY");
/// assert_eq!(rupees_in_words(-0.99), "RUPEES ZERO ONLY");
/// ```
pub fn rupees_in_words(amount: f64) -> String {
    // `as` saturates on overflow and maps NaN to 0.
    let whole = amount.trunc() as i64;
    format!("RUPEES {} ONLY", words_of(whole).to_uppercase())
}

/// Render an amount with a fixed number of decimal places
///
/// No thousands separators are inserted.
///
/// # Examples
/// ```
/// use rupee_text::render_amount;
/// assert_eq!(render_amount(80000.0, 2), "80000.00");
/// assert_eq!(render_amount(10708.333, 0), "10708");
/// ```
pub fn render_amount(amount: f64, decimals: usize) -> String {
    format!("{amount:.decimals$}")
}
