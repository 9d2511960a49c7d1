use super::round_to_cents;
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_round_to_cents_resolves_ties_away_from_zero() -> Result<()> {
    let test_cases = vec![
        ("0.005", "0.01"),
        ("-0.005", "-0.01"),
        ("1.125", "1.13"),
        ("-1.125", "-1.13"),
        ("2.675", "2.68"),
        ("100.554", "100.55"),
        ("100", "100.00"),
        ("0", "0.00"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(round_to_cents(Decimal::from_str(input)?).to_string(), expected);
    }

    Ok(())
}

#[test]
fn test_round_to_cents_is_stable_under_reapplication() -> Result<()> {
    for input in ["12.3456", "-0.015", "99.995", "-7.77777", "0.001"] {
        let once = round_to_cents(Decimal::from_str(input)?);
        let twice = round_to_cents(once);

        assert_eq!(once, twice);
        assert_eq!(twice.scale(), 2);
    }

    Ok(())
}
