//! Once-per-second ticker for the active interview question.
//!
//! One ticker task per started question. It exits when its token is
//! cancelled (the session cancels it on complete, reset and redraw) or when
//! the session reports its epoch as stale, whichever it notices first.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::interview::session::{InterviewSession, SessionError, SessionView};

pub type SharedSession = Arc<Mutex<InterviewSession>>;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns the ticker for the timer started at `epoch`.
pub fn spawn_ticker(session: SharedSession, epoch: u64, period: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let cancelled = token.clone();

    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        loop {
            tokio::select! {
                _ = cancelled.cancelled() => break,
                _ = interval.tick() => {
                    if !session.lock().await.tick_for(epoch) {
                        break;
                    }
                }
            }
        }
        debug!(epoch, "Interview ticker exited");
    });

    token
}

/// Draws the next question and starts its ticker while holding the session
/// lock, so no tick can land between the draw and the ticker registration.
pub async fn start_timed_question(
    session: &SharedSession,
    rng: &Mutex<StdRng>,
) -> Result<SessionView, SessionError> {
    let mut guard = session.lock().await;
    {
        let mut rng = rng.lock().await;
        guard.start_question(&mut *rng)?;
    }
    let token = spawn_ticker(Arc::clone(session), guard.timer_epoch(), TICK_PERIOD);
    guard.attach_ticker(token);
    Ok(guard.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::interview::models::Category;
    use rand::SeedableRng;

    fn shared() -> (SharedSession, Mutex<StdRng>) {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        (
            Arc::new(Mutex::new(InterviewSession::new(catalog))),
            Mutex::new(StdRng::seed_from_u64(42)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_counts_seconds_while_running() {
        let (session, rng) = shared();
        start_timed_question(&session, &rng).await.unwrap();

        time::sleep(Duration::from_millis(3_500)).await;

        assert_eq!(session.lock().await.elapsed_seconds(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_stops_on_complete() {
        let (session, rng) = shared();
        start_timed_question(&session, &rng).await.unwrap();
        time::sleep(Duration::from_millis(2_500)).await;

        session.lock().await.complete_question().unwrap();
        time::sleep(Duration::from_secs(5)).await;

        assert_eq!(session.lock().await.elapsed_seconds(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_question_restarts_from_zero() {
        let (session, rng) = shared();
        start_timed_question(&session, &rng).await.unwrap();
        time::sleep(Duration::from_millis(4_500)).await;
        session.lock().await.complete_question().unwrap();

        let view = start_timed_question(&session, &rng).await.unwrap();
        assert_eq!(view.elapsed_seconds, 0);

        time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(
            session.lock().await.elapsed_seconds(),
            1,
            "only the new ticker may advance the clock"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_stops_ticker() {
        let (session, rng) = shared();
        start_timed_question(&session, &rng).await.unwrap();
        time::sleep(Duration::from_millis(1_500)).await;

        session.lock().await.reset();
        time::sleep(Duration::from_secs(3)).await;

        let guard = session.lock().await;
        assert_eq!(guard.elapsed_seconds(), 0);
        assert!(!guard.timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_rejected_while_running() {
        let (session, rng) = shared();
        session.lock().await.select_category(Category::Technical);
        start_timed_question(&session, &rng).await.unwrap();
        assert!(matches!(
            start_timed_question(&session, &rng).await,
            Err(SessionError::QuestionInProgress)
        ));
    }
}
