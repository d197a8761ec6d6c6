use chrono::{Datelike, NaiveDate, Weekday};
use journal::caltools::{ordinal_suffix, week_commencing, week_of_month};
use journal::templating::{resolve, TemplateContext};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 1900-01-01 to roughly 2199-12-31
    (0i64..109_572).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

proptest! {
    #[test]
    fn week_of_month_is_between_one_and_six(date in any_date()) {
        let week = week_of_month(date);
        prop_assert!((1..=6).contains(&week), "{} -> {}", date, week);
    }

    #[test]
    fn week_of_month_starts_at_one_and_steps_by_at_most_one(date in any_date()) {
        let next = date.succ_opt().unwrap();
        if next.month() == date.month() {
            let step = week_of_month(next) - week_of_month(date);
            prop_assert!(step <= 1, "{} -> {}", date, next);
        } else {
            prop_assert_eq!(week_of_month(next), 1);
        }
    }

    #[test]
    fn week_of_month_advances_on_mondays_after_a_partial_first_week(date in any_date()) {
        let first = date.with_day(1).unwrap();
        let next = date.succ_opt().unwrap();
        if first.weekday() != Weekday::Mon && next.month() == date.month() {
            let expected = if next.weekday() == Weekday::Mon {
                week_of_month(date) + 1
            } else {
                week_of_month(date)
            };
            prop_assert_eq!(week_of_month(next), expected);
        }
    }

    #[test]
    fn week_commencing_is_an_earlier_or_equal_monday(date in any_date()) {
        let monday = week_commencing(date).unwrap();
        prop_assert_eq!(monday.weekday(), Weekday::Mon);
        prop_assert!(monday <= date);
        prop_assert!((date - monday).num_days() < 7);
        prop_assert_eq!(week_commencing(monday).unwrap(), monday);
    }

    #[test]
    fn ordinal_suffix_is_total(n in any::<u32>()) {
        let suffix = ordinal_suffix(n);
        prop_assert!(["st", "nd", "rd", "th"].contains(&suffix));
        if (11..=13).contains(&(n % 100)) {
            prop_assert_eq!(suffix, "th");
        }
    }

    #[test]
    fn static_patterns_resolve_to_themselves(text in "[a-zA-Z0-9 /._-]{0,40}", date in any_date()) {
        let context = TemplateContext::assemble(date).unwrap();
        prop_assert_eq!(resolve(&text, &context).unwrap(), text);
    }

    #[test]
    fn escaped_braces_round_trip(text in "[a-z]{0,10}", date in any_date()) {
        let context = TemplateContext::assemble(date).unwrap();
        let pattern = format!("{{{{{}}}}}", text);
        prop_assert_eq!(resolve(&pattern, &context).unwrap(), format!("{{{}}}", text));
    }

    #[test]
    fn day_placeholders_match_chrono(date in any_date()) {
        let context = TemplateContext::assemble(date).unwrap();
        prop_assert_eq!(
            resolve("{Year.Num}-{Month.Pad}-{Day.Pad}", &context).unwrap(),
            date.format("%Y-%m-%d").to_string()
        );
        prop_assert_eq!(
            resolve("{Year.Week.Num}", &context).unwrap(),
            date.iso_week().week().to_string()
        );
    }
}
