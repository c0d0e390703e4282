use anyhow::bail;
use chrono::{DateTime, Utc};
use croner::{
    Cron, Direction,
    parser::{CronParser, Seconds},
};
use regex::Regex;
use std::time::Duration;

/// Number of fields in a standard cron pattern (minute, hour, day-of-month, month, day-of-week).
const CRON_PATTERN_FIELDS: usize = 5;

/// Single element of a comma-separated cron field: `*` or a value/range (numeric or a three
/// letter month/day name), optionally followed by a step.
const CRON_FIELD_ELEMENT: &str =
    r"^(\*|([0-9]+|[A-Za-z]{3})(-([0-9]+|[A-Za-z]{3}))?)(/[0-9]+)?$";

/// The orchestrator only understands `0` as Sunday.
const MAX_DAY_OF_WEEK: u32 = 6;

pub trait CronExt {
    /// Returns the minimum interval between occurrences.
    fn min_interval(&self) -> anyhow::Result<Duration>;

    /// Returns the specified number of upcoming occurrences.
    fn next_occurrences(&self, count: usize) -> Vec<DateTime<Utc>>;

    /// Converts string five-field cron pattern (or a nickname like `@daily`) to `Cron` instance.
    fn parse_pattern(pattern: impl AsRef<str>) -> anyhow::Result<Cron>;
}

impl CronExt for Cron {
    /// Returns the minimum interval between occurrences. To calculate it, we take the first 100
    /// upcoming occurrences and calculate the interval between each of them. Then we take the
    /// smallest interval.
    fn min_interval(&self) -> anyhow::Result<Duration> {
        let next_occurrences = self.next_occurrences(100);
        if next_occurrences.len() < 2 {
            bail!("Schedule doesn't have at least two upcoming occurrences.");
        }

        let mut minimum_interval = Duration::MAX;
        for (index, occurrence) in next_occurrences.iter().enumerate().skip(1) {
            let interval = (*occurrence - next_occurrences[index - 1]).to_std()?;
            if interval < minimum_interval {
                minimum_interval = interval;
            }
        }

        Ok(minimum_interval)
    }

    fn next_occurrences(&self, count: usize) -> Vec<DateTime<Utc>> {
        self.iter_from(Utc::now(), Direction::Forward)
            .take(count)
            .collect()
    }

    /// Converts a string cron pattern to `Cron` instance. Only patterns the orchestrator
    /// understands are accepted: five fields of values, `*`, ranges, steps and lists (no
    /// seconds, years, `L`, `W` or `#`), or a nickname. The pattern should also have at least
    /// two upcoming occurrences.
    fn parse_pattern(pattern: impl AsRef<str>) -> anyhow::Result<Cron> {
        let pattern = pattern.as_ref().trim();
        if !pattern.starts_with('@') {
            let fields = pattern.split_whitespace().collect::<Vec<_>>();
            if fields.len() != CRON_PATTERN_FIELDS {
                bail!(
                    "Expected {CRON_PATTERN_FIELDS} fields, but got {}.",
                    fields.len()
                );
            }

            let element_regex = Regex::new(CRON_FIELD_ELEMENT)?;
            for field in &fields {
                if let Some(element) = field
                    .split(',')
                    .find(|element| !element_regex.is_match(element))
                {
                    bail!("Unsupported field value `{element}` in `{field}`.");
                }
            }

            let day_of_week = fields[CRON_PATTERN_FIELDS - 1];
            for element in day_of_week.split(',') {
                let values = element.split('/').next().unwrap_or(element);
                for value in values.split('-') {
                    if value.parse::<u32>().is_ok_and(|day| day > MAX_DAY_OF_WEEK) {
                        bail!(
                            "Day-of-week value should be between 0 and {MAX_DAY_OF_WEEK}, but got {value}."
                        );
                    }
                }
            }
        }

        let cron = CronParser::builder()
            .seconds(Seconds::Optional)
            .build()
            .parse(pattern)?;
        if cron.next_occurrences(2).len() < 2 {
            bail!("Schedule doesn't have at least two upcoming occurrences.");
        }

        Ok(cron)
    }
}

#[cfg(test)]
mod tests {
    use super::CronExt;
    use croner::Cron;
    use insta::assert_debug_snapshot;
    use std::time::Duration;

    #[test]
    fn can_parse_five_field_patterns() -> anyhow::Result<()> {
        for pattern in [
            "* * * * *",
            "*/5 * * * *",
            "0 0 * * *",
            "15 8-18 * * 1-5",
            "0,30 * 1,15 * *",
            "0 12 1 1/3 *",
            "@hourly",
            "@daily",
            "@weekly",
        ] {
            assert!(Cron::parse_pattern(pattern).is_ok(), "{pattern}");
        }

        Ok(())
    }

    #[test]
    fn fails_to_parse_invalid_patterns() {
        assert_debug_snapshot!(Cron::parse_pattern("* * *"), @r###"
        Err(
            "Expected 5 fields, but got 3.",
        )
        "###);
        assert_debug_snapshot!(Cron::parse_pattern("0 0 0 * * *"), @r###"
        Err(
            "Expected 5 fields, but got 6.",
        )
        "###);

        for pattern in ["", "99 * * * *", "* 24 * * *", "* * 0 * *", "* * * 13 *", "a b c d e"] {
            assert!(Cron::parse_pattern(pattern).is_err(), "{pattern}");
        }
    }

    #[test]
    fn fails_to_parse_non_standard_extensions() {
        assert_debug_snapshot!(Cron::parse_pattern("0 0 L * *"), @r###"
        Err(
            "Unsupported field value `L` in `L`.",
        )
        "###);
        assert_debug_snapshot!(Cron::parse_pattern("0 0 * * 7"), @r###"
        Err(
            "Day-of-week value should be between 0 and 6, but got 7.",
        )
        "###);

        for pattern in [
            "0 0 * * 5#2",
            "0 0 15W * *",
            "0 0 * * 5L",
            "0 0 LW * *",
            "0 0 * * 5-7",
            "0 0 1,L * *",
            "0 0 ? * *",
            "*-5 * * * *",
        ] {
            assert!(Cron::parse_pattern(pattern).is_err(), "{pattern}");
        }
    }

    #[test]
    fn fails_to_parse_patterns_without_occurrences() {
        assert_debug_snapshot!(Cron::parse_pattern("0 0 30 2 *"), @r###"
        Err(
            "Schedule doesn't have at least two upcoming occurrences.",
        )
        "###);
        assert!(Cron::parse_pattern("0 0 31 4 *").is_err());
    }

    #[test]
    fn can_parse_lists_ranges_and_names() {
        for pattern in [
            "0 0 * * 0",
            "0 0 * * 6",
            "0 0 * * 1-5/2",
            "0 0 * JAN-MAR MON",
            "0 0 * * */2",
        ] {
            assert!(Cron::parse_pattern(pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn can_calculate_min_interval() -> anyhow::Result<()> {
        let schedule = Cron::parse_pattern("* * * * *")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(60));

        let schedule = Cron::parse_pattern("*/5 * * * *")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(300));

        let schedule = Cron::parse_pattern("0 * * * *")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(3600));
        let schedule = Cron::parse_pattern("@hourly")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(3600));

        let schedule = Cron::parse_pattern("0 0 * * *")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(24 * 3600));
        let schedule = Cron::parse_pattern("@daily")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(24 * 3600));

        let schedule = Cron::parse_pattern("0 0 * * 1")?;
        assert_eq!(schedule.min_interval()?, Duration::from_secs(7 * 24 * 3600));

        Ok(())
    }

    #[test]
    fn returns_requested_number_of_occurrences() -> anyhow::Result<()> {
        let schedule = Cron::parse_pattern("*/5 * * * *")?;
        let occurrences = schedule.next_occurrences(5);
        assert_eq!(occurrences.len(), 5);
        for pair in occurrences.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_seconds(), 300);
        }

        Ok(())
    }
}
