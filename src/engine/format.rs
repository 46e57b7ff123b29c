const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with the largest binary unit that keeps the value at
/// or above one, e.g. `1536` becomes `"1.5 KB"`.
///
/// At most two fractional digits are kept (truncated, never rounded up into
/// the next unit) and trailing zeros are dropped, so exact values print as
/// integers. The output does not depend on locale.
pub fn format_size(bytes: u64) -> String {
    let mut exponent = 0;
    while exponent + 1 < UNITS.len() && bytes >= 1u64 << (10 * (exponent + 1)) {
        exponent += 1;
    }

    let unit = 1u128 << (10 * exponent);
    let hundredths = u128::from(bytes) * 100 / unit;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    let number = match fraction {
        0 => whole.to_string(),
        f if f % 10 == 0 => format!("{whole}.{}", f / 10),
        f => format!("{whole}.{f:02}"),
    };
    format!("{number} {}", UNITS[exponent])
}
