//! Human-readable resistance values.

/// Format a resistance with the closest SI prefix, e.g. `4.7 kΩ`.
///
/// Up to three significant decimals are kept and trailing zeros dropped.
pub fn format_ohms(ohms: f64) -> String {
    if !ohms.is_finite() {
        return format!("{} Ω", ohms);
    }
    if ohms == 0.0 {
        return "0 Ω".to_string();
    }

    let abs = ohms.abs();
    let (scaled, prefix) = if abs >= 1e9 {
        (ohms / 1e9, "G")
    } else if abs >= 1e6 {
        (ohms / 1e6, "M")
    } else if abs >= 1e3 {
        (ohms / 1e3, "k")
    } else if abs >= 1.0 {
        (ohms, "")
    } else if abs >= 1e-3 {
        (ohms * 1e3, "m")
    } else if abs >= 1e-6 {
        (ohms * 1e6, "µ")
    } else {
        (ohms * 1e9, "n")
    };

    let mut digits = format!("{:.3}", scaled);
    if digits.contains('.') {
        while digits.ends_with('0') {
            digits.pop();
        }
        if digits.ends_with('.') {
            digits.pop();
        }
    }
    format!("{} {}Ω", digits, prefix)
}
