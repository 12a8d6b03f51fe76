//! Pure per-factor scorers.
//!
//! Every function maps a pair of attribute values to a score in [0, 100]
//! and is symmetric in its arguments. Missing data scores a neutral 50
//! rather than erroring, so aggregation always visits every factor.

use crate::core::weights::Factor;
use crate::models::{AttributeBundle, BudgetRange, PetsInfo, QuietHours, SleepSchedule, SocialVibe};

/// Score one factor for a pair of bundles.
pub fn score_factor(factor: Factor, a: &AttributeBundle, b: &AttributeBundle) -> f64 {
    match factor {
        Factor::Budget => budget_score(&a.budget, &b.budget),
        Factor::SleepSchedule => sleep_schedule_score(a.sleep_schedule, b.sleep_schedule),
        Factor::Cleanliness => cleanliness_score(a.cleanliness, b.cleanliness),
        Factor::SocialVibe => social_vibe_score(a.social_vibe, b.social_vibe),
        Factor::MoveInDate => move_in_score(a.move_in_date, b.move_in_date),
        Factor::LeaseLength => lease_length_score(&a.lease_lengths, &b.lease_lengths),
        Factor::MaxDistance => max_distance_score(&a.max_distance, &b.max_distance),
        Factor::QuietHours => quiet_hours_score(&a.quiet_hours, &b.quiet_hours),
        Factor::Chores => chores_score(a.chores.as_deref(), b.chores.as_deref()),
        Factor::GuestsFrequency => {
            guests_score(a.guests_frequency.as_deref(), b.guests_frequency.as_deref())
        }
        Factor::WorkFromHome => work_from_home_score(a.work_from_home_days, b.work_from_home_days),
        Factor::Pets => pets_score(&a.pets, &b.pets),
        Factor::Smoking => smoking_score(&a.smoking_policies, &b.smoking_policies),
    }
}

/// Neutral score used whenever one side has no data for a factor.
pub const NEUTRAL: f64 = 50.0;

/// Overlap below this share of the union counts as noise and scores 0.
const BUDGET_NOISE_FLOOR: f64 = 0.10;

/// Budget overlap: shared range divided by the union of both ranges.
/// Disjoint ranges, or an overlap under 10% of the union, score 0.
pub fn budget_score(a: &BudgetRange, b: &BudgetRange) -> f64 {
    let lo = a.min.max(b.min) as f64;
    let hi = a.max.min(b.max) as f64;
    if hi < lo {
        return 0.0;
    }

    let union = a.max.max(b.max) as f64 - a.min.min(b.min) as f64;
    if union <= 0.0 {
        // Both ranges are the same single point
        return 100.0;
    }

    let overlap = hi - lo;
    if overlap / union < BUDGET_NOISE_FLOOR {
        return 0.0;
    }

    (overlap / union) * 100.0
}

/// Identical schedules pair perfectly; a flexible sleeper pairs well with
/// anyone; early birds and night owls clash.
pub fn sleep_schedule_score(a: SleepSchedule, b: SleepSchedule) -> f64 {
    if a == b {
        return 100.0;
    }
    if a == SleepSchedule::Flexible || b == SleepSchedule::Flexible {
        return 80.0;
    }
    20.0
}

/// 100 minus 25 per level of difference on the 1-5 scale, floored at 0.
pub fn cleanliness_score(a: u8, b: u8) -> f64 {
    let a = a.clamp(1, 5) as f64;
    let b = b.clamp(1, 5) as f64;
    (100.0 - 25.0 * (a - b).abs()).max(0.0)
}

pub fn social_vibe_score(a: SocialVibe, b: SocialVibe) -> f64 {
    if a == b {
        return 100.0;
    }
    if a == SocialVibe::Balanced || b == SocialVibe::Balanced {
        return 75.0;
    }
    // Quiet vs lively, the only remaining pairing
    30.0
}

/// Calendar proximity of move-in dates, bucketed by month distance.
pub fn move_in_score(a: Option<chrono::NaiveDate>, b: Option<chrono::NaiveDate>) -> f64 {
    use chrono::Datelike;

    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL,
    };

    let months_a = a.year() * 12 + a.month0() as i32;
    let months_b = b.year() * 12 + b.month0() as i32;
    match (months_a - months_b).abs() {
        0 => 100.0,
        1 => 80.0,
        2..=3 => 60.0,
        4..=6 => 40.0,
        _ => 20.0,
    }
}

/// Label-set overlap against the larger set; either side empty is neutral.
pub fn lease_length_score(a: &[String], b: &[String]) -> f64 {
    label_overlap_score(a, b)
}

/// Smoking policy labels, same overlap rule as lease lengths.
pub fn smoking_score(a: &[String], b: &[String]) -> f64 {
    label_overlap_score(a, b)
}

fn label_overlap_score(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return NEUTRAL;
    }

    let set_a: std::collections::HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: std::collections::HashSet<&str> = b.iter().map(String::as_str).collect();
    let shared = set_a.intersection(&set_b).count() as f64;
    let larger = set_a.len().max(set_b.len()) as f64;

    (shared / larger) * 100.0
}

/// Walk-time buckets to campus, in ordinal order.
const DISTANCE_BUCKETS: &[(&str, i32)] = &[
    ("5min", 0),
    ("10min", 1),
    ("15min", 2),
    ("20min", 3),
    ("30min", 4),
];

/// Guest frequency scale, in ordinal order.
const GUEST_FREQUENCIES: &[(&str, i32)] = &[
    ("never", 0),
    ("rarely", 1),
    ("monthly", 2),
    ("weekly", 3),
    ("daily", 4),
];

/// Mid-scale rank assigned to categorical values missing from a table,
/// so an unmapped label degrades the score instead of erroring.
const UNKNOWN_RANK: i32 = 2;

fn ordinal_rank(table: &[(&str, i32)], value: &str) -> i32 {
    table
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(value))
        .map(|(_, rank)| *rank)
        .unwrap_or(UNKNOWN_RANK)
}

pub fn max_distance_score(a: &str, b: &str) -> f64 {
    if a.eq_ignore_ascii_case(b) {
        return 100.0;
    }
    let rank_a = ordinal_rank(DISTANCE_BUCKETS, a);
    let rank_b = ordinal_rank(DISTANCE_BUCKETS, b);
    (100.0 - 25.0 * (rank_a - rank_b).abs() as f64).max(0.0)
}

pub fn guests_score(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL,
    };
    if a.eq_ignore_ascii_case(b) {
        return 100.0;
    }
    let rank_a = ordinal_rank(GUEST_FREQUENCIES, a);
    let rank_b = ordinal_rank(GUEST_FREQUENCIES, b);
    (100.0 - 25.0 * (rank_a - rank_b).abs() as f64).max(0.0)
}

/// Overlap of the two quiet windows divided by the longer window.
/// Windows may wrap past midnight; no overlap at all scores 0.
pub fn quiet_hours_score(a: &QuietHours, b: &QuietHours) -> f64 {
    let (start_a, dur_a) = window_minutes(a);
    let (start_b, dur_b) = window_minutes(b);

    let longest = dur_a.max(dur_b);
    let overlap = circular_overlap(start_a, dur_a, start_b, dur_b);
    (overlap as f64 / longest as f64) * 100.0
}

/// A window whose start equals its end spans the whole day, so durations
/// are always in 1..=1440.
fn window_minutes(window: &QuietHours) -> (i64, i64) {
    use chrono::Timelike;

    const DAY: i64 = 24 * 60;

    let start = window.start.num_seconds_from_midnight() as i64 / 60;
    let end = window.end.num_seconds_from_midnight() as i64 / 60;
    let duration = (end - start).rem_euclid(DAY);
    if duration == 0 {
        (start, DAY)
    } else {
        (start, duration)
    }
}

/// Overlap in minutes of two arcs on the 24h clock. The second window is
/// tested at day offsets -1, 0 and +1 to cover wrap-around.
fn circular_overlap(start_a: i64, dur_a: i64, start_b: i64, dur_b: i64) -> i64 {
    const DAY: i64 = 24 * 60;
    let end_a = start_a + dur_a;

    let mut total = 0;
    for shift in [-DAY, 0, DAY] {
        let b0 = start_b + shift;
        let b1 = b0 + dur_b;
        let lo = start_a.max(b0);
        let hi = end_a.min(b1);
        if hi > lo {
            total += hi - lo;
        }
    }
    total.min(dur_a.min(dur_b))
}

/// Matching chore arrangements pair perfectly; differing stated
/// arrangements still coexist reasonably.
pub fn chores_score(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => 100.0,
        (Some(_), Some(_)) => 60.0,
        _ => NEUTRAL,
    }
}

/// 15 points per day of difference in home-office days, floored at 0.
pub fn work_from_home_score(a: u8, b: u8) -> f64 {
    let a = a.min(7) as f64;
    let b = b.min(7) as f64;
    (100.0 - 15.0 * (a - b).abs()).max(0.0)
}

/// Pet compatibility, hard-zero policy: a pet owner paired with someone
/// not comfortable around pets scores 0, which high pet weight turns
/// into a deal-breaker in priority mode.
pub fn pets_score(a: &PetsInfo, b: &PetsInfo) -> f64 {
    match (a.has_pets, b.has_pets) {
        (false, false) => 100.0,
        (true, true) => {
            if !a.comfortable_with_pets || !b.comfortable_with_pets {
                return 0.0;
            }
            if !a.allergies.is_empty() || !b.allergies.is_empty() {
                30.0
            } else {
                90.0
            }
        }
        (true, false) => one_sided_pets_score(b),
        (false, true) => one_sided_pets_score(a),
    }
}

fn one_sided_pets_score(without_pets: &PetsInfo) -> f64 {
    if without_pets.comfortable_with_pets {
        80.0
    } else {
        0.0
    }
}
