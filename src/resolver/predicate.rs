//! Where-clause builders for the parcel layer.
//!
//! Field names are the parcel layer's: `base_address_num`, `street_name`,
//! `unit_address`, `blklot`. String literals are quoted SQL-92 style.

/// Quote a string literal, doubling embedded single quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// House number + street, optionally narrowed to one unit.
pub fn exact_address(number: &str, street_name: &str, unit: Option<&str>) -> String {
    let mut clause = format!(
        "base_address_num={number} and street_name={}",
        quote(street_name)
    );
    if let Some(unit) = unit {
        clause.push_str(&format!(" and unit_address={}", quote(unit)));
    }
    clause
}

/// Every address on the hundred-block `[lower, upper)`.
pub fn block_range(lower: &str, upper: &str, street_name: &str) -> String {
    format!(
        "base_address_num >={lower} and base_address_num <{upper} and street_name={}",
        quote(street_name)
    )
}

pub fn parcel(blklot: &str) -> String {
    format!("blklot={}", quote(blklot))
}

/// Bounds of the hundred-block containing `number` (`1651` -> `1600`, `1700`).
///
/// Works on the digit string, so house numbers of any length are accepted.
pub fn block_bounds(number: &str) -> Option<(String, String)> {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hundreds = number[..number.len().saturating_sub(2)].trim_start_matches('0');
    let lower = if hundreds.is_empty() {
        "0".to_string()
    } else {
        format!("{hundreds}00")
    };
    Some((lower, format!("{}00", increment_digits(hundreds))))
}

/// Decimal `+1` on a digit string; the empty string counts as zero.
fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for b in out.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_with_and_without_unit() {
        assert_eq!(
            exact_address("1650", "MISSION", None),
            "base_address_num=1650 and street_name='MISSION'"
        );
        assert_eq!(
            exact_address("1650", "MISSION", Some("100")),
            "base_address_num=1650 and street_name='MISSION' and unit_address='100'"
        );
    }

    #[test]
    fn block_range_spans_hundred() {
        let bounds = block_bounds;
        assert_eq!(bounds("1651"), Some(("1600".to_string(), "1700".to_string())));
        assert_eq!(bounds("99"), Some(("0".to_string(), "100".to_string())));
        assert_eq!(bounds("7"), Some(("0".to_string(), "100".to_string())));
        assert_eq!(bounds("1700"), Some(("1700".to_string(), "1800".to_string())));
        assert_eq!(bounds("9950"), Some(("9900".to_string(), "10000".to_string())));
        assert_eq!(bounds("0150"), Some(("100".to_string(), "200".to_string())));
        assert_eq!(bounds("12A"), None);
        assert_eq!(bounds(""), None);
        assert_eq!(
            block_range("1600", "1700", "MISSION"),
            "base_address_num >=1600 and base_address_num <1700 and street_name='MISSION'"
        );
    }

    #[test]
    fn block_bounds_beyond_integer_range() {
        assert_eq!(
            block_bounds("123456789012345678901"),
            Some((
                "123456789012345678900".to_string(),
                "123456789012345679000".to_string()
            ))
        );
        assert_eq!(
            block_bounds("99999999999999999999999"),
            Some((
                "99999999999999999999900".to_string(),
                "100000000000000000000000".to_string()
            ))
        );
    }

    #[test]
    fn literals_are_escaped() {
        assert_eq!(parcel("3512008"), "blklot='3512008'");
        assert_eq!(parcel("X' OR '1'='1"), "blklot='X'' OR ''1''=''1'");
        assert_eq!(
            block_range("800", "900", "O'FARRELL"),
            "base_address_num >=800 and base_address_num <900 and street_name='O''FARRELL'"
        );
    }
}
