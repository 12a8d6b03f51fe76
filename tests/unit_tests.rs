// Unit tests for Nestmate Algo

use chrono::{NaiveDate, NaiveTime};
use nestmate_algo::core::scorers::{
    budget_score, chores_score, cleanliness_score, guests_score, lease_length_score,
    max_distance_score, move_in_score, pets_score, quiet_hours_score, score_factor,
    sleep_schedule_score, smoking_score, social_vibe_score, work_from_home_score,
};
use nestmate_algo::core::{Factor, WeightVector};
use nestmate_algo::models::{
    AttributeBundle, BudgetRange, PetsInfo, QuietHours, SleepSchedule, SocialVibe,
};

fn bundle(id: &str) -> AttributeBundle {
    AttributeBundle {
        user_id: id.to_string(),
        name: format!("User {}", id),
        contact: None,
        budget: BudgetRange { min: 800, max: 1200 },
        sleep_schedule: SleepSchedule::Early,
        social_vibe: SocialVibe::Quiet,
        cleanliness: 4,
        move_in_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        lease_lengths: vec!["12mo".to_string()],
        max_distance: "10min".to_string(),
        quiet_hours: QuietHours {
            start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        },
        chores: Some("rotation".to_string()),
        guests_frequency: Some("rarely".to_string()),
        work_from_home_days: 2,
        pets: PetsInfo::default(),
        smoking_policies: vec!["no-smoking".to_string()],
    }
}

/// A bundle that disagrees with `bundle()` on every factor.
fn divergent_bundle(id: &str) -> AttributeBundle {
    AttributeBundle {
        user_id: id.to_string(),
        name: format!("User {}", id),
        contact: None,
        budget: BudgetRange { min: 2000, max: 3000 },
        sleep_schedule: SleepSchedule::Late,
        social_vibe: SocialVibe::Lively,
        cleanliness: 1,
        move_in_date: NaiveDate::from_ymd_opt(2027, 9, 1),
        lease_lengths: vec!["summer".to_string()],
        max_distance: "30min".to_string(),
        quiet_hours: QuietHours {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        },
        chores: Some("as-needed".to_string()),
        guests_frequency: Some("daily".to_string()),
        work_from_home_days: 7,
        pets: PetsInfo {
            has_pets: true,
            comfortable_with_pets: true,
            allergies: vec![],
        },
        smoking_policies: vec!["smoking-ok".to_string()],
    }
}

#[test]
fn test_budget_worked_examples() {
    let a = BudgetRange { min: 800, max: 1200 };
    assert_eq!(budget_score(&a, &BudgetRange { min: 800, max: 1200 }), 100.0);

    let partial = budget_score(&a, &BudgetRange { min: 1000, max: 1400 });
    assert!(partial > 0.0 && partial < 100.0);

    assert_eq!(budget_score(&a, &BudgetRange { min: 1500, max: 2000 }), 0.0);
}

#[test]
fn test_sleep_schedule_worked_examples() {
    assert_eq!(
        sleep_schedule_score(SleepSchedule::Early, SleepSchedule::Early),
        100.0
    );
    assert_eq!(
        sleep_schedule_score(SleepSchedule::Early, SleepSchedule::Flexible),
        80.0
    );
    assert_eq!(
        sleep_schedule_score(SleepSchedule::Early, SleepSchedule::Late),
        20.0
    );
}

#[test]
fn test_cleanliness_worked_examples() {
    assert_eq!(cleanliness_score(3, 3), 100.0);
    assert_eq!(cleanliness_score(3, 4), 75.0);
    assert_eq!(cleanliness_score(1, 5), 0.0);
}

#[test]
fn test_every_scorer_stays_in_range() {
    let a = bundle("a");
    let b = divergent_bundle("b");
    let sparse = {
        let mut s = bundle("s");
        s.move_in_date = None;
        s.lease_lengths.clear();
        s.chores = None;
        s.guests_frequency = None;
        s.smoking_policies.clear();
        s
    };

    for pair in [(&a, &b), (&a, &sparse), (&b, &sparse)] {
        for factor in Factor::ALL {
            let score = score_factor(factor, pair.0, pair.1);
            assert!(
                (0.0..=100.0).contains(&score),
                "factor {} out of range: {}",
                factor,
                score
            );
            assert!(!score.is_nan());
        }
    }
}

#[test]
fn test_every_scorer_is_symmetric() {
    let a = bundle("a");
    let b = divergent_bundle("b");

    for factor in Factor::ALL {
        assert_eq!(
            score_factor(factor, &a, &b),
            score_factor(factor, &b, &a),
            "factor {} not symmetric",
            factor
        );
    }
}

#[test]
fn test_reflexivity_on_populated_bundle() {
    let a = bundle("a");
    for factor in Factor::ALL {
        assert_eq!(
            score_factor(factor, &a, &a),
            100.0,
            "factor {} not reflexive",
            factor
        );
    }
}

#[test]
fn test_neutral_handling_for_empty_data() {
    assert_eq!(move_in_score(None, None), 50.0);
    assert_eq!(lease_length_score(&[], &[]), 50.0);
    assert_eq!(chores_score(None, None), 50.0);
    assert_eq!(guests_score(None, None), 50.0);
    assert_eq!(smoking_score(&[], &[]), 50.0);
}

#[test]
fn test_ordinal_tables_cover_worked_cases() {
    assert_eq!(max_distance_score("5min", "20min"), 25.0);
    assert_eq!(guests_score(Some("rarely"), Some("weekly")), 50.0);
    assert_eq!(work_from_home_score(1, 4), 55.0);
}

#[test]
fn test_quiet_hours_identical_windows() {
    let w = QuietHours {
        start: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    };
    assert_eq!(quiet_hours_score(&w, &w), 100.0);
}

#[test]
fn test_pet_policy_hard_zero() {
    let owner = PetsInfo {
        has_pets: true,
        comfortable_with_pets: true,
        allergies: vec![],
    };
    // Default PetsInfo is not comfortable with pets
    assert_eq!(pets_score(&owner, &PetsInfo::default()), 0.0);
}

#[test]
fn test_social_vibe_balanced_bridges() {
    assert_eq!(
        social_vibe_score(SocialVibe::Balanced, SocialVibe::Quiet),
        75.0
    );
    assert_eq!(
        social_vibe_score(SocialVibe::Quiet, SocialVibe::Lively),
        30.0
    );
}

#[test]
fn test_weight_update_is_atomic() {
    let vector = WeightVector::default();
    let bad_partial = std::collections::BTreeMap::from([(Factor::Budget, 95.0)]);

    assert!(vector.merge(&bad_partial).is_err());
    // Original still valid and unchanged
    let sum: f64 = vector.snapshot().values().sum();
    assert!((sum - 100.0).abs() < 0.1);
    assert_eq!(vector.get(Factor::Budget), 15.0);
}
