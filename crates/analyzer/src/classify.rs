//! Day arithmetic and display classification.

use chrono::{DateTime, Duration, Utc};

use grump_core::{Urgency, VoteClass};

/// Whole days from `from` to `to`, rounded toward negative infinity.
///
/// 23 hours is 0 days; 1 hour in the past is -1 day.
pub fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let elapsed = to - from;
    let days = elapsed.num_days();
    // num_days truncates toward zero; step down for a negative remainder.
    if elapsed < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// Band the council's vote coverage against the configured council size.
///
/// The configured size is the denominator even when the roster has a
/// different length; a size of 0 counts as 0% coverage.
pub fn classify_votes(council_votes_cast: usize, council_size: u32) -> VoteClass {
    let size = council_size as usize;
    if council_votes_cast == size {
        return VoteClass::AllVoted;
    }
    let share = if size == 0 {
        0.0
    } else {
        council_votes_cast as f64 / size as f64
    };
    if share >= 0.5 {
        VoteClass::MostVoted
    } else {
        VoteClass::FewVoted
    }
}

/// Band the remaining time. Fully-voted proposals are neutral whatever
/// their deadline.
pub fn classify_urgency(vote_class: VoteClass, days_remaining: i64) -> Urgency {
    match vote_class {
        VoteClass::AllVoted => Urgency::Neutral,
        _ if days_remaining < 2 => Urgency::Urgent,
        _ => Urgency::Soon,
    }
}
