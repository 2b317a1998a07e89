//! Game session manager
//!
//! Owns every live session. The session store is a `parking_lot` map guarded
//! independently of the sessions; each session sits behind its own
//! `tokio::sync::Mutex`, held for the full duration of an operation. Two
//! requests on the same session therefore serialize, while requests on
//! different sessions never wait on each other, even during an AI search.
//!
//! `last_active` lives beside the session lock as an atomic so the expiry
//! sweep can scan the store without ever waiting on a busy session.

use crate::config::ServiceConfig;
use crate::error::{SessionError, SessionResult};
use crate::events;
use crate::session::{GameSession, NewSession, SessionStatus};
use crate::view::SessionView;
use chrono::{DateTime, TimeZone, Utc};
use futures_lite::future::block_on;
use minichess_engine::{evaluate, find_best_move, game_from_layout, Board, EvaluationResult, Move, SearchParams};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;
use web_time::Instant;

/// A stored session plus the bookkeeping the sweep reads without locking.
struct SessionSlot {
    last_active_ms: AtomicI64,
    expired: AtomicBool,
    session: Mutex<GameSession>,
}

impl SessionSlot {
    fn new(session: GameSession, now: DateTime<Utc>) -> Self {
        Self {
            last_active_ms: AtomicI64::new(now.timestamp_millis()),
            expired: AtomicBool::new(false),
            session: Mutex::new(session),
        }
    }

    fn touch(&self, now: DateTime<Utc>) {
        self.last_active_ms
            .fetch_max(now.timestamp_millis(), Ordering::AcqRel);
    }

    fn last_active(&self) -> DateTime<Utc> {
        let ms = self.last_active_ms.load(Ordering::Acquire);
        Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
    }

    /// Lock the session. A session the sweep removed while we were waiting
    /// reads as missing.
    async fn lock(&self, id: Uuid) -> SessionResult<MutexGuard<'_, GameSession>> {
        let guard = self.session.lock().await;
        if self.expired.load(Ordering::Acquire) || guard.status == SessionStatus::Expired {
            return Err(SessionError::NotFound(id));
        }
        Ok(guard)
    }
}

pub struct SessionManager {
    config: ServiceConfig,
    sessions: RwLock<HashMap<Uuid, Arc<SessionSlot>>>,
    seed_counter: AtomicU64,
}

impl SessionManager {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            seed_counter: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn slot(&self, id: Uuid) -> SessionResult<Arc<SessionSlot>> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    /// Per-session RNG: reproducible when a base seed is configured.
    fn session_rng(&self) -> StdRng {
        let n = self.seed_counter.fetch_add(1, Ordering::Relaxed);
        match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_os_rng(),
        }
    }

    /// Start a new game. A malformed or unplayable custom layout is rejected
    /// before anything is stored.
    pub fn create_session(&self, request: NewSession) -> SessionResult<SessionView> {
        let started = Instant::now();
        let result = self.create_session_inner(request);
        let id = result.as_ref().ok().map(|view| view.id);
        events::record("create_session", id, &result, started);
        result
    }

    fn create_session_inner(&self, request: NewSession) -> SessionResult<SessionView> {
        let board = match request.layout.as_deref() {
            Some(text) => game_from_layout(text)?,
            None => Board::standard(),
        };

        let id = Uuid::new_v4();
        let now = Utc::now();
        let session = GameSession::start(
            id,
            board,
            request.difficulty,
            request.human_color,
            self.session_rng(),
            now,
        );
        let mut slot = SessionSlot::new(session, now);
        let last_active = slot.last_active();
        let view = SessionView::from_session(slot.session.get_mut(), last_active);

        self.sessions.write().insert(id, Arc::new(slot));
        debug!(%id, difficulty = %request.difficulty, human = %request.human_color, "session created");

        Ok(view)
    }

    /// Apply a move for the human player.
    pub async fn apply_move(&self, id: Uuid, mv: Move) -> SessionResult<SessionView> {
        let started = Instant::now();
        let result = self.apply_move_inner(id, mv).await;
        events::record("apply_move", Some(id), &result, started);
        result
    }

    async fn apply_move_inner(&self, id: Uuid, mv: Move) -> SessionResult<SessionView> {
        let slot = self.slot(id)?;
        let mut session = slot.lock(id).await?;
        session.ensure_active()?;
        if !session.is_humans_turn() {
            return Err(SessionError::NotHumansTurn);
        }

        let now = Utc::now();
        session.play(mv, now)?;
        slot.touch(now);

        Ok(SessionView::from_session(&session, slot.last_active()))
    }

    /// Let the AI choose and play a move. Holds only this session's lock for
    /// the duration of the search, which runs on the blocking pool.
    pub async fn request_ai_move(&self, id: Uuid) -> SessionResult<SessionView> {
        let started = Instant::now();
        let result = self.request_ai_move_inner(id).await;
        events::record("request_ai_move", Some(id), &result, started);
        result
    }

    async fn request_ai_move_inner(&self, id: Uuid) -> SessionResult<SessionView> {
        let slot = self.slot(id)?;
        let mut guard = slot.lock(id).await?;
        guard.ensure_active()?;
        if guard.is_humans_turn() {
            return Err(SessionError::NotAisTurn);
        }

        // A long think must not look like inactivity to the sweep
        slot.touch(Utc::now());

        let params = SearchParams {
            difficulty: guard.difficulty,
            deadline: Instant::now() + self.config.ai_deadline,
            tie_epsilon: self.config.tie_epsilon,
        };
        let session = &mut *guard;

        // The search is CPU-bound; keep it off the runtime workers. The rng
        // travels with it and comes back for the next search.
        let board = session.board.clone();
        let rng = std::mem::replace(&mut session.rng, StdRng::seed_from_u64(0));
        let (report, rng) = tokio::task::spawn_blocking(move || {
            let mut rng = rng;
            let report = block_on(find_best_move(&board, &params, &mut rng));
            (report, rng)
        })
        .await
        .map_err(|err| {
            warn!(%id, error = %err, "AI search task failed");
            SessionError::SearchFailed
        })?;
        session.rng = rng;
        let report = report.ok_or(SessionError::NoLegalMoves)?;
        debug!(
            %id,
            best = %report.best_move,
            score = report.score,
            depth = report.depth,
            nodes = report.nodes,
            fallback = report.fallback,
            "AI move chosen"
        );

        let now = Utc::now();
        session.play(report.best_move, now)?;
        slot.touch(now);

        Ok(SessionView::from_session(session, slot.last_active()))
    }

    /// Read-only snapshot of a session.
    pub async fn get_state(&self, id: Uuid) -> SessionResult<SessionView> {
        let started = Instant::now();
        let result = self.get_state_inner(id).await;
        events::record("get_state", Some(id), &result, started);
        result
    }

    async fn get_state_inner(&self, id: Uuid) -> SessionResult<SessionView> {
        let slot = self.slot(id)?;
        let session = slot.lock(id).await?;
        slot.touch(Utc::now());
        Ok(SessionView::from_session(&session, slot.last_active()))
    }

    /// Evaluate the current position from the side to move's perspective.
    pub async fn analyze(&self, id: Uuid) -> SessionResult<EvaluationResult> {
        let started = Instant::now();
        let result = self.analyze_inner(id).await;
        events::record("analyze", Some(id), &result, started);
        result
    }

    async fn analyze_inner(&self, id: Uuid) -> SessionResult<EvaluationResult> {
        let slot = self.slot(id)?;
        let session = slot.lock(id).await?;
        slot.touch(Utc::now());
        Ok(evaluate(&session.board, session.board.side_to_move()))
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete_session(&self, id: Uuid) -> bool {
        let started = Instant::now();
        let removed = self.sessions.write().remove(&id);
        if let Some(slot) = &removed {
            slot.expired.store(true, Ordering::Release);
        }
        let outcome = if removed.is_some() { "ok" } else { "SESSION_NOT_FOUND" };
        events::record_outcome("delete_session", Some(id), outcome, started);
        removed.is_some()
    }

    pub fn list_sessions(&self) -> Vec<Uuid> {
        self.sessions.read().keys().copied().collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    /// Expire and remove every session idle for longer than the TTL as of
    /// `now`. The store lock is held only while entries are removed; busy
    /// sessions are flagged without waiting for their lock.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let ttl_ms = i64::try_from(self.config.session_ttl.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.timestamp_millis().saturating_sub(ttl_ms);

        let expired: Vec<(Uuid, Arc<SessionSlot>)> = {
            let mut sessions = self.sessions.write();
            let stale: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, slot)| slot.last_active_ms.load(Ordering::Acquire) < cutoff)
                .map(|(id, _)| *id)
                .collect();
            stale
                .into_iter()
                .filter_map(|id| sessions.remove(&id).map(|slot| (id, slot)))
                .collect()
        };

        for (id, slot) in &expired {
            slot.expired.store(true, Ordering::Release);
            if let Ok(mut session) = slot.session.try_lock() {
                session.status = SessionStatus::Expired;
            }
            debug!(%id, "session expired");
        }

        if !expired.is_empty() {
            info!(count = expired.len(), "expired idle sessions");
        }
        expired.len()
    }

    /// Run the expiry sweep every `sweep_interval` until the manager is
    /// dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let manager: Weak<SessionManager> = Arc::downgrade(self);
        let period = self.config.sweep_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(manager) = manager.upgrade() else {
                    debug!("session manager dropped; sweeper stopping");
                    break;
                };
                manager.sweep_expired();
            }
        })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
