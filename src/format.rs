//! Number and markup formatting for labels, tooltips and SVG attributes

/// Minus sign used for negative numbers in labels
const MINUS_SIGN: char = '\u{2212}';

/// Integer with thousands separators: `12345` → `12,345`
pub fn count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Axis tick value; ticks are whole numbers for count axes
pub fn tick(v: f64) -> String {
    if v.fract() == 0.0 && v >= 0.0 {
        count(v as u64)
    } else {
        fixed(v, 1)
    }
}

/// Fixed decimals with a typographic minus: `-0.5` → `−0.50`
pub fn fixed(v: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, v);
    match s.strip_prefix('-') {
        // "-0.00" collapses to "0.00"
        Some(rest) if rest.chars().any(|c| c.is_ascii_digit() && c != '0') => {
            format!("{}{}", MINUS_SIGN, rest)
        }
        Some(rest) => rest.to_string(),
        None => s,
    }
}

/// Fixed decimals with an explicit sign: `0.5` → `+0.5`
pub fn signed(v: f64, decimals: usize) -> String {
    let body = fixed(v, decimals);
    if body.starts_with(MINUS_SIGN) {
        body
    } else {
        format!("+{}", body)
    }
}

/// Score with two decimals, as shown in tooltips and the detail panel
pub fn score(v: f64) -> String {
    fixed(v, 2)
}

/// Compact SVG coordinate: at most two decimals, no trailing zeros
pub fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape `&`, `<`, `>` and quotes for HTML text and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
