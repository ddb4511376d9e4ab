const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Parse sizes like "100", "10K", "5MB", "2GiB" into **bytes**.
///
/// K/M/G/T prefixes (optionally followed by `i`) use 1024-based multipliers.
/// A trailing `b` is smartcased the way vim does it:
///  1) all lowercase (`mb`, `kb`) means bytes
///  2) uppercase prefix + lowercase `b` (`Mb`, `Kb`) means bits
///  3) all uppercase (`MB`, `KB`) means bytes
///  4) no `b`/`B` suffix means bytes
///
/// Products that overflow saturate at `u64::MAX`.
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let split = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map_or(s.len(), |(i, _)| i);

    let (num_str, unit) = s.split_at(split);
    let num: u64 = num_str.trim().parse().ok()?;

    if unit.is_empty() {
        return Some(num);
    }

    let is_bits = is_bits_unit(unit.as_bytes());
    let prefix = unit
        .strip_suffix(['b', 'B'])
        .unwrap_or(unit)
        .to_ascii_lowercase();

    let factor = match prefix.as_str() {
        "" => 1,
        "k" | "ki" => KIB,
        "m" | "mi" => MIB,
        "g" | "gi" => GIB,
        "t" | "ti" => TIB,
        _ => return None,
    };

    let value = num.saturating_mul(factor);
    Some(if is_bits { value / 8 } else { value })
}

#[inline]
fn is_bits_unit(unit: &[u8]) -> bool {
    let Some(&last) = unit.last() else {
        return false;
    };

    last == b'b' && unit.len() > 1 && unit[0].is_ascii_uppercase()
}

#[cfg(test)]
#[path = "size_tests.rs"]
mod tests;
