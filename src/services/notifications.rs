// src/services/notifications.rs

//! Notification feed with display-time bucketing. Read/unread bookkeeping is
//! handled elsewhere; this module only writes and groups entries.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedBucket {
  Today,
  Yesterday,
  ThisWeek,
  Earlier,
}

/// Which display group a notification lands in, relative to `now`.
/// Calendar-date based for today/yesterday, rolling 7 days for the week.
pub fn bucket_for(created_at: DateTime<Utc>, now: DateTime<Utc>) -> FeedBucket {
  let created_date = created_at.date_naive();
  let today = now.date_naive();

  if created_date >= today {
    FeedBucket::Today
  } else if Some(created_date) == today.pred_opt() {
    FeedBucket::Yesterday
  } else if now.signed_duration_since(created_at) < Duration::days(7) {
    FeedBucket::ThisWeek
  } else {
    FeedBucket::Earlier
  }
}

#[derive(Debug, Default, Serialize)]
pub struct NotificationFeed {
  pub today: Vec<Notification>,
  pub yesterday: Vec<Notification>,
  pub this_week: Vec<Notification>,
  pub earlier: Vec<Notification>,
}

pub fn group_into_feed(notifications: Vec<Notification>, now: DateTime<Utc>) -> NotificationFeed {
  let mut feed = NotificationFeed::default();
  for n in notifications {
    match bucket_for(n.created_at, now) {
      FeedBucket::Today => feed.today.push(n),
      FeedBucket::Yesterday => feed.yesterday.push(n),
      FeedBucket::ThisWeek => feed.this_week.push(n),
      FeedBucket::Earlier => feed.earlier.push(n),
    }
  }
  feed
}

/// The user's notifications, newest first, grouped for display.
#[instrument(name = "notifications::feed", skip(pool), fields(user_id = %user_id))]
pub async fn feed(pool: &PgPool, user_id: Uuid) -> Result<NotificationFeed, AppError> {
  let notifications: Vec<Notification> = sqlx::query_as(
    "SELECT id, user_id, category, message, created_at \
     FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  Ok(group_into_feed(notifications, Utc::now()))
}

/// Best-effort write; a lost notification must not fail the action that
/// produced it.
#[instrument(name = "notifications::notify", skip(pool, message), fields(user_id = %user_id, category = %category))]
pub async fn notify(pool: &PgPool, user_id: Uuid, category: &str, message: &str) {
  let result = sqlx::query(
    "INSERT INTO notifications (id, user_id, category, message, created_at) VALUES ($1, $2, $3, $4, NOW())",
  )
  .bind(Uuid::new_v4())
  .bind(user_id)
  .bind(category)
  .bind(message)
  .execute(pool)
  .await;

  if let Err(e) = result {
    warn!(error = %e, "Failed to write notification.");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
  }

  #[test]
  fn same_calendar_date_is_today() {
    let now = at(2026, 8, 23, 15);
    assert_eq!(bucket_for(at(2026, 8, 23, 0), now), FeedBucket::Today);
    assert_eq!(bucket_for(at(2026, 8, 23, 15), now), FeedBucket::Today);
  }

  #[test]
  fn previous_calendar_date_is_yesterday_even_within_24h() {
    let now = at(2026, 8, 23, 1);
    assert_eq!(bucket_for(at(2026, 8, 22, 23), now), FeedBucket::Yesterday);
  }

  #[test]
  fn within_seven_days_is_this_week() {
    let now = at(2026, 8, 23, 12);
    assert_eq!(bucket_for(at(2026, 8, 20, 12), now), FeedBucket::ThisWeek);
    assert_eq!(bucket_for(at(2026, 8, 17, 12), now), FeedBucket::ThisWeek);
  }

  #[test]
  fn seven_days_or_older_is_earlier() {
    let now = at(2026, 8, 23, 12);
    assert_eq!(bucket_for(at(2026, 8, 16, 12), now), FeedBucket::Earlier);
    assert_eq!(bucket_for(at(2026, 7, 1, 0), now), FeedBucket::Earlier);
  }

  #[test]
  fn grouping_preserves_input_order_within_buckets() {
    let now = at(2026, 8, 23, 12);
    let mk = |hours_ago: i64, msg: &str| Notification {
      id: Uuid::new_v4(),
      user_id: Uuid::nil(),
      category: "order".to_string(),
      message: msg.to_string(),
      created_at: now - Duration::hours(hours_ago),
    };

    let feed = group_into_feed(vec![mk(1, "newest"), mk(2, "older"), mk(40, "yesterday-ish")], now);
    assert_eq!(feed.today.len(), 2);
    assert_eq!(feed.today[0].message, "newest");
    assert_eq!(feed.yesterday.len(), 1);
    assert!(feed.this_week.is_empty());
    assert!(feed.earlier.is_empty());
  }
}
