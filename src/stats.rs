use crate::models::{ExercisesPerDate, StatKind, StatSlice};

pub fn group_max_by_date(items: &[ExercisesPerDate]) -> Vec<ExercisesPerDate> {
    let mut grouped: Vec<ExercisesPerDate> = Vec::new();
    for item in items {
        match grouped.iter_mut().find(|entry| entry.date == item.date) {
            Some(entry) => entry.exercises = entry.exercises.max(item.exercises),
            None => grouped.push(item.clone()),
        }
    }
    grouped
}

pub fn build_exercises_per_date(per_commit: &[ExercisesPerDate]) -> Vec<ExercisesPerDate> {
    let mut series = group_max_by_date(per_commit);
    series.reverse();
    series
}

/// `left` is not clamped, it goes negative once done and review pass the goal.
pub fn stat_slices(done_amount: u32, review_amount: f64, goal_amount: u32) -> [StatSlice; 3] {
    let done = f64::from(done_amount);
    let left = f64::from(goal_amount) - done - review_amount;
    [
        StatSlice { kind: StatKind::Done, amount: done },
        StatSlice { kind: StatKind::Review, amount: review_amount },
        StatSlice { kind: StatKind::Left, amount: left },
    ]
}

pub fn total_amount(slices: &[StatSlice]) -> f64 {
    slices.iter().map(|slice| slice.amount).sum()
}

pub fn percentages(slices: &[StatSlice]) -> Vec<f64> {
    let total = total_amount(slices);
    slices
        .iter()
        .map(|slice| {
            if total == 0.0 {
                0.0
            } else {
                slice.amount / total * 100.0
            }
        })
        .collect()
}

pub fn percentage_label(percentage: f64) -> String {
    format!("{}%", percentage.round() as i64)
}

pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(date: &str, exercises: u32) -> ExercisesPerDate {
        ExercisesPerDate {
            date: date.to_string(),
            exercises,
        }
    }

    #[test]
    fn grouping_keeps_max_per_date_in_first_seen_order() {
        let grouped = group_max_by_date(&[
            point("05-01", 10),
            point("04-01", 8),
            point("05-01", 12),
            point("03-01", 7),
        ]);
        assert_eq!(grouped, vec![point("05-01", 12), point("04-01", 8), point("03-01", 7)]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let once = group_max_by_date(&[point("02-02", 3), point("01-02", 4), point("02-02", 1)]);
        let twice = group_max_by_date(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn series_is_oldest_first() {
        let series = build_exercises_per_date(&[
            point("05-01", 10),
            point("04-01", 8),
            point("05-01", 9),
            point("03-01", 7),
        ]);
        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["03-01", "04-01", "05-01"]);
        assert_eq!(series[2].exercises, 10);
    }

    #[test]
    fn slices_always_sum_to_goal() {
        for (done, review) in [(0, 0.0), (40, 20.0), (88, 6.666666666666667), (95, 3.0)] {
            let slices = stat_slices(done, review, 90);
            let sum: f64 = slices.iter().map(|s| s.amount).sum();
            assert!((sum - 90.0).abs() < 1e-9, "done={done} review={review}");
        }
        assert_eq!(stat_slices(95, 3.0, 90)[2].amount, -8.0);
    }

    #[test]
    fn percentage_labels_for_known_split() {
        let slices = stat_slices(40, 20.0, 90);
        assert_eq!(slices[2].amount, 30.0);
        let labels: Vec<String> = percentages(&slices).into_iter().map(percentage_label).collect();
        assert_eq!(labels, vec!["44%", "22%", "33%"]);
    }

    #[test]
    fn rounded_percentages_stay_close_to_hundred() {
        for (done, review) in [(1, 1.0), (33, 33.0), (17, 4.333333333333333), (89, 0.5)] {
            let slices = stat_slices(done, review, 90);
            let rounded: i64 = percentages(&slices).iter().map(|p| p.round() as i64).sum();
            assert!((rounded - 100).abs() <= slices.len() as i64);
        }
    }

    #[test]
    fn amounts_format_like_counts() {
        assert_eq!(format_amount(40.0), "40");
        assert_eq!(format_amount(-3.0), "-3");
        assert_eq!(format_amount(2.5), "2.5");
    }

    #[test]
    fn zero_total_gives_zero_shares() {
        let slices = stat_slices(0, 0.0, 0);
        assert_eq!(percentages(&slices), vec![0.0, 0.0, 0.0]);
    }
}
