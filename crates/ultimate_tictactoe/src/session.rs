//! Game sessions keyed by unordered player pairs.
//!
//! The registry holds at most one live game per pair. Each game sits behind
//! its own mutex, so moves in one game never wait on another; the registry
//! map is locked only for lookups and membership changes.

use crate::{
    BoardSnapshot, EngineConfig, FirstMoverPolicy, GameOutcome, Mark, MoveResult, Position,
    RejectionKind, ResignRejection, StartError, UltimateBoard,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Opaque player identifier: only equality, ordering and hashing are used.
pub trait PlayerId: Clone + Eq + Ord + Hash + Debug + Send {}

impl<T: Clone + Eq + Ord + Hash + Debug + Send> PlayerId for T {}

/// An unordered pair of players, normalized so `(a, b)` and `(b, a)` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey<P> {
    low: P,
    high: P,
}

impl<P: PlayerId> PairKey<P> {
    /// Creates a normalized key.
    pub fn new(a: P, b: P) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Checks whether `player` is one of the pair.
    pub fn contains(&self, player: &P) -> bool {
        self.low == *player || self.high == *player
    }

    /// The players in normalized order.
    pub fn players(&self) -> (&P, &P) {
        (&self.low, &self.high)
    }
}

/// Outcome of an accepted resignation, in player terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResignResult<P> {
    /// The player who resigned.
    pub forfeited_by: P,
    /// The implied winner.
    pub winner: P,
    /// The board's resulting outcome (`Forfeited`).
    pub outcome: GameOutcome,
}

/// A board plus whether the registry has let go of it.
#[derive(Debug)]
struct LiveGame {
    board: UltimateBoard,
    ended: bool,
}

/// Shared handle to one live game.
///
/// Cloning is cheap; all clones address the same board. Once the game is
/// removed with [`SessionRegistry::end_game`], every clone rejects moves
/// and resignations with `GameAlreadyOver`, even if the same pair has
/// started a new game since.
#[derive(Debug, Clone)]
pub struct GameHandle<P> {
    key: PairKey<P>,
    player_x: P,
    player_o: P,
    game: Arc<Mutex<LiveGame>>,
}

impl<P: PlayerId> GameHandle<P> {
    fn new(key: PairKey<P>, player_x: P, player_o: P) -> Self {
        Self {
            key,
            player_x,
            player_o,
            game: Arc::new(Mutex::new(LiveGame {
                board: UltimateBoard::new(Mark::X),
                ended: false,
            })),
        }
    }

    /// The registry key for this game.
    pub fn key(&self) -> &PairKey<P> {
        &self.key
    }

    /// The players as `(x, o)`; X moves first.
    pub fn players(&self) -> (&P, &P) {
        (&self.player_x, &self.player_o)
    }

    /// The mark `player` plays, or `None` for a non-participant.
    pub fn mark_of(&self, player: &P) -> Option<Mark> {
        if *player == self.player_x {
            Some(Mark::X)
        } else if *player == self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// The player holding `mark`.
    pub fn player_for(&self, mark: Mark) -> &P {
        match mark {
            Mark::X => &self.player_x,
            Mark::O => &self.player_o,
        }
    }

    // Poisoning is ignored: a board is only written after its checks pass.
    fn lock(&self) -> MutexGuard<'_, LiveGame> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks whether the registry has removed this game.
    pub fn is_ended(&self) -> bool {
        self.lock().ended
    }

    fn mark_ended(&self) {
        self.lock().ended = true;
    }

    /// Plays a move for `player`.
    ///
    /// A non-participant is rejected with `NotYourTurn`, after the
    /// game-over check. A removed game counts as over.
    #[instrument(skip(self), fields(pair = ?self.key))]
    pub fn apply_move(
        &self,
        player: &P,
        sub_board: Position,
        cell: Position,
    ) -> Result<MoveResult, RejectionKind> {
        let mut game = self.lock();

        if game.ended {
            warn!("Move on a removed game");
            return Err(RejectionKind::GameAlreadyOver);
        }
        if game.board.outcome().is_over() {
            warn!("Move after game end");
            return Err(RejectionKind::GameAlreadyOver);
        }

        let Some(mark) = self.mark_of(player) else {
            warn!("Non-participant attempted move");
            return Err(RejectionKind::NotYourTurn);
        };

        game.board.apply_move(mark, sub_board, cell)
    }

    /// Resigns the game for `player`.
    #[instrument(skip(self), fields(pair = ?self.key))]
    pub fn resign(&self, player: &P) -> Result<ResignResult<P>, ResignRejection> {
        let mut game = self.lock();

        if game.ended {
            warn!("Resignation on a removed game");
            return Err(ResignRejection::GameAlreadyOver);
        }
        if game.board.outcome().is_over() {
            warn!("Resignation after game end");
            return Err(ResignRejection::GameAlreadyOver);
        }

        let Some(mark) = self.mark_of(player) else {
            warn!("Non-participant attempted resignation");
            return Err(ResignRejection::NotAParticipant);
        };

        let outcome = game.board.resign(mark)?;
        Ok(ResignResult {
            forfeited_by: player.clone(),
            winner: self.player_for(mark.opponent()).clone(),
            outcome,
        })
    }

    /// Read-only copy of the game state.
    pub fn render_snapshot(&self) -> BoardSnapshot {
        self.lock().board.snapshot()
    }

    /// Every `(sub_board, cell)` the current mover may play.
    pub fn legal_moves(&self) -> Vec<(Position, Position)> {
        let game = self.lock();
        if game.ended {
            return Vec::new();
        }
        game.board.legal_moves()
    }

    /// The game outcome.
    pub fn outcome(&self) -> GameOutcome {
        self.lock().board.outcome()
    }

    /// The winning player, counting a forfeit as a win for the opponent.
    pub fn winner(&self) -> Option<P> {
        self.outcome()
            .winner()
            .map(|mark| self.player_for(mark).clone())
    }

    /// A copy of the full board, history included.
    pub fn board(&self) -> UltimateBoard {
        self.lock().board.clone()
    }
}

/// Registry of live games, at most one per unordered player pair.
///
/// A player may be in several games at once against different opponents.
#[derive(Debug)]
pub struct SessionRegistry<P> {
    config: EngineConfig,
    rng: Mutex<StdRng>,
    games: Mutex<HashMap<PairKey<P>, GameHandle<P>>>,
}

impl<P: PlayerId> SessionRegistry<P> {
    /// Creates a registry with the default configuration.
    #[instrument]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a registry with the given configuration.
    #[instrument]
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        info!(first_mover = %config.first_mover(), "Creating session registry");
        Self {
            config,
            rng: Mutex::new(rng),
            games: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn games(&self) -> MutexGuard<'_, HashMap<PairKey<P>, GameHandle<P>>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn challenger_moves_first(&self) -> bool {
        match self.config.first_mover() {
            FirstMoverPolicy::Challenger => true,
            FirstMoverPolicy::Opponent => false,
            FirstMoverPolicy::Random => self
                .rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .gen_bool(0.5),
        }
    }

    /// Starts a game between `challenger` and `opponent`.
    ///
    /// The first mover, chosen by the configured policy, plays X.
    ///
    /// # Errors
    ///
    /// `SelfChallenge` when both are the same player; `AlreadyPlaying` when
    /// the pair already has a live game.
    #[instrument(skip(self))]
    pub fn start_game(&self, challenger: P, opponent: P) -> Result<GameHandle<P>, StartError> {
        if challenger == opponent {
            warn!("Self-challenge refused");
            return Err(StartError::SelfChallenge);
        }

        let key = PairKey::new(challenger.clone(), opponent.clone());
        let mut games = self.games();
        if games.contains_key(&key) {
            warn!("Pair already has a live game");
            return Err(StartError::AlreadyPlaying);
        }

        let (player_x, player_o) = if self.challenger_moves_first() {
            (challenger, opponent)
        } else {
            (opponent, challenger)
        };
        info!(x = ?player_x, o = ?player_o, "Starting game");

        let handle = GameHandle::new(key.clone(), player_x, player_o);
        games.insert(key, handle.clone());
        Ok(handle)
    }

    /// Finds a live game involving `player`.
    ///
    /// With games against several opponents, which one is returned is
    /// unspecified.
    #[instrument(skip(self))]
    pub fn find_game(&self, player: &P) -> Option<GameHandle<P>> {
        let found = self
            .games()
            .values()
            .find(|handle| handle.key.contains(player))
            .cloned();
        if found.is_none() {
            debug!("No game found");
        }
        found
    }

    /// Looks up the game between two specific players.
    pub fn game_between(&self, a: &P, b: &P) -> Option<GameHandle<P>> {
        let key = PairKey::new(a.clone(), b.clone());
        self.games().get(&key).cloned()
    }

    /// Removes the game for `key`. Idempotent; returns whether a game was removed.
    ///
    /// Outstanding handles to the removed game stop accepting moves.
    #[instrument(skip(self))]
    pub fn end_game(&self, key: &PairKey<P>) -> bool {
        // Flagged while the map is still locked, so no new game for the pair
        // can be started before the old handles are closed.
        let mut games = self.games();
        match games.remove(key) {
            Some(handle) => {
                handle.mark_ended();
                info!("Game removed");
                true
            }
            None => {
                debug!("No game to remove");
                false
            }
        }
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        self.games().len()
    }

    /// Checks whether there are no live games.
    pub fn is_empty(&self) -> bool {
        self.games().is_empty()
    }

    /// Keys of all live games.
    pub fn active_pairs(&self) -> Vec<PairKey<P>> {
        self.games().keys().cloned().collect()
    }
}

impl<P: PlayerId> Default for SessionRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
