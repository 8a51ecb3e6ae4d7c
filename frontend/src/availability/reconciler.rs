use chrono::NaiveDate;

use super::period::{next_day, previous_day, AvailabilityPeriod, PeriodError};

/// Merges `proposed` into `existing`. Every period overlapping or adjacent to
/// `proposed` collapses into one contiguous period; the others are kept as is.
pub fn add_period(
    existing: &[AvailabilityPeriod],
    proposed: AvailabilityPeriod,
    today: NaiveDate,
) -> Result<Vec<AvailabilityPeriod>, PeriodError> {
    if proposed.start_date < today {
        return Err(PeriodError::StartInPast);
    }
    if proposed.start_date > proposed.end_date {
        return Err(PeriodError::InvertedRange);
    }

    let mut merged = proposed;
    let mut result = Vec::with_capacity(existing.len() + 1);
    for period in existing {
        if period.touches(&proposed) {
            merged.start_date = merged.start_date.min(period.start_date);
            merged.end_date = merged.end_date.max(period.end_date);
        } else {
            result.push(*period);
        }
    }
    result.push(merged);
    result.sort();
    Ok(result)
}

/// Subtracts `proposed` from every period it overlaps. A period may vanish,
/// shrink at one end, or split in two.
pub fn remove_period(
    existing: &[AvailabilityPeriod],
    proposed: AvailabilityPeriod,
) -> Result<Vec<AvailabilityPeriod>, PeriodError> {
    if proposed.start_date > proposed.end_date {
        return Err(PeriodError::InvertedRange);
    }

    let mut result = Vec::with_capacity(existing.len() + 1);
    for period in existing {
        if !period.overlaps(&proposed) {
            result.push(*period);
            continue;
        }
        if period.start_date < proposed.start_date {
            if let Some(end) = previous_day(proposed.start_date) {
                result.push(AvailabilityPeriod {
                    start_date: period.start_date,
                    end_date: end,
                });
            }
        }
        if period.end_date > proposed.end_date {
            if let Some(start) = next_day(proposed.end_date) {
                result.push(AvailabilityPeriod {
                    start_date: start,
                    end_date: period.end_date,
                });
            }
        }
    }
    result.sort();
    Ok(result)
}

/// Sorted, well-formed and pairwise disjoint.
pub fn is_canonical(periods: &[AvailabilityPeriod]) -> bool {
    periods.iter().all(|p| p.start_date <= p.end_date)
        && periods
            .windows(2)
            .all(|pair| pair[0].end_date < pair[1].start_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn p(start: &str, end: &str) -> AvailabilityPeriod {
        AvailabilityPeriod::new(d(start), d(end)).unwrap()
    }

    fn today() -> NaiveDate {
        d("2024-05-01")
    }

    #[test]
    fn add_into_empty_set() {
        let result = add_period(&[], p("2024-06-01", "2024-06-05"), today()).unwrap();
        assert_eq!(result, vec![p("2024-06-01", "2024-06-05")]);
    }

    #[test]
    fn add_merges_overlapping_and_adjacent_periods() {
        let existing = vec![
            p("2024-06-01", "2024-06-05"),
            p("2024-06-10", "2024-06-12"),
            p("2024-06-20", "2024-06-25"),
        ];
        let result = add_period(&existing, p("2024-06-04", "2024-06-09"), today()).unwrap();
        assert_eq!(
            result,
            vec![p("2024-06-01", "2024-06-12"), p("2024-06-20", "2024-06-25")]
        );
    }

    #[test]
    fn add_leaves_distant_periods_untouched() {
        let existing = vec![p("2024-06-01", "2024-06-05")];
        let result = add_period(&existing, p("2024-06-07", "2024-06-08"), today()).unwrap();
        assert_eq!(
            result,
            vec![p("2024-06-01", "2024-06-05"), p("2024-06-07", "2024-06-08")]
        );
    }

    #[test]
    fn add_contained_range_keeps_existing_period() {
        let existing = vec![p("2024-06-01", "2024-06-30")];
        let result = add_period(&existing, p("2024-06-10", "2024-06-12"), today()).unwrap();
        assert_eq!(result, existing);
    }

    #[test]
    fn add_rejects_past_start_but_accepts_today() {
        assert_eq!(
            add_period(&[], p("2024-04-30", "2024-05-03"), today()),
            Err(PeriodError::StartInPast)
        );
        assert!(add_period(&[], p("2024-05-01", "2024-05-01"), today()).is_ok());
    }

    #[test]
    fn add_rejects_inverted_range() {
        let inverted = AvailabilityPeriod {
            start_date: d("2024-06-05"),
            end_date: d("2024-06-01"),
        };
        assert_eq!(
            add_period(&[], inverted, today()),
            Err(PeriodError::InvertedRange)
        );
        assert_eq!(remove_period(&[], inverted), Err(PeriodError::InvertedRange));
    }

    #[test]
    fn add_is_idempotent() {
        let sets = vec![
            vec![],
            vec![p("2024-06-01", "2024-06-05")],
            vec![p("2024-06-01", "2024-06-05"), p("2024-06-07", "2024-06-09")],
            vec![p("2024-05-20", "2024-05-22"), p("2024-07-01", "2024-07-31")],
        ];
        let ranges = vec![
            p("2024-06-03", "2024-06-06"),
            p("2024-06-06", "2024-06-06"),
            p("2024-05-01", "2024-08-01"),
            p("2024-06-10", "2024-06-30"),
        ];
        for set in &sets {
            for range in &ranges {
                let once = add_period(set, *range, today()).unwrap();
                let twice = add_period(&once, *range, today()).unwrap();
                assert_eq!(once, twice, "set {:?} range {:?}", set, range);
            }
        }
    }

    #[test]
    fn remove_splits_period_in_two() {
        let existing = vec![p("2024-06-01", "2024-06-20")];
        let result = remove_period(&existing, p("2024-06-10", "2024-06-15")).unwrap();
        assert_eq!(
            result,
            vec![p("2024-06-01", "2024-06-09"), p("2024-06-16", "2024-06-20")]
        );
    }

    #[test]
    fn remove_shrinks_either_end() {
        let existing = vec![p("2024-06-01", "2024-06-10"), p("2024-06-20", "2024-06-30")];
        let result = remove_period(&existing, p("2024-06-08", "2024-06-22")).unwrap();
        assert_eq!(
            result,
            vec![p("2024-06-01", "2024-06-07"), p("2024-06-23", "2024-06-30")]
        );
    }

    #[test]
    fn remove_deletes_fully_covered_periods() {
        let existing = vec![
            p("2024-06-01", "2024-06-03"),
            p("2024-06-05", "2024-06-06"),
            p("2024-06-10", "2024-06-12"),
        ];
        let result = remove_period(&existing, p("2024-06-01", "2024-06-06")).unwrap();
        assert_eq!(result, vec![p("2024-06-10", "2024-06-12")]);
    }

    #[test]
    fn remove_without_overlap_is_a_no_op() {
        let existing = vec![p("2024-06-01", "2024-06-03")];
        let result = remove_period(&existing, p("2024-06-04", "2024-06-09")).unwrap();
        assert_eq!(result, existing);
    }

    #[test]
    fn remove_allows_past_ranges() {
        let existing = vec![p("2024-04-01", "2024-04-30")];
        let result = remove_period(&existing, p("2024-04-10", "2024-04-30")).unwrap();
        assert_eq!(result, vec![p("2024-04-01", "2024-04-09")]);
    }

    #[test]
    fn any_sequence_of_edits_stays_disjoint() {
        // Deterministic pseudo-random walk over June.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % bound
        };
        let base = d("2024-06-01");
        let mut periods: Vec<AvailabilityPeriod> = Vec::new();
        for _ in 0..500 {
            let start = base + chrono::Days::new(next(30));
            let end = start + chrono::Days::new(next(6));
            let range = AvailabilityPeriod::new(start, end).unwrap();
            periods = if next(3) == 0 {
                remove_period(&periods, range).unwrap()
            } else {
                add_period(&periods, range, today()).unwrap()
            };
            assert!(is_canonical(&periods), "not canonical: {:?}", periods);
            for (i, a) in periods.iter().enumerate() {
                for b in periods.iter().skip(i + 1) {
                    assert!(!a.overlaps(b));
                }
            }
        }
    }

    #[test]
    fn is_canonical_detects_overlap_and_disorder() {
        assert!(is_canonical(&[]));
        assert!(is_canonical(&[p("2024-06-01", "2024-06-02"), p("2024-06-03", "2024-06-04")]));
        assert!(!is_canonical(&[p("2024-06-01", "2024-06-03"), p("2024-06-03", "2024-06-04")]));
        assert!(!is_canonical(&[p("2024-06-05", "2024-06-06"), p("2024-06-01", "2024-06-02")]));
    }
}
