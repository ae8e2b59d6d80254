//! Engine controller implementation.

use std::panic;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use super::EngineConfig;
use crate::board::{
    search, Board, Color, FenError, MoveError, MoveList, SearchConfig, SearchLimits,
    SearchProgress, SearchResult, SearchState, Square, UndoRecord,
};
use crate::sync::StopFlag;

/// Message sent by a running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// The root best move improved or an iteration completed
    Progress(SearchProgress),
    /// The search is over; sent exactly once, last
    Finished(SearchResult),
}

enum Worker {
    Thread(JoinHandle<SearchResult>),
    /// The search ran on the caller's thread because no worker could be spawned
    Done(SearchResult),
}

/// Handle to a search running in the background.
pub struct SearchJob {
    stop: StopFlag,
    worker: Worker,
}

impl SearchJob {
    /// Ask the search to stop; it finishes with its last completed iteration.
    pub fn signal_stop(&self) {
        self.stop.stop();
    }

    #[must_use]
    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// The search has returned
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.worker {
            Worker::Thread(handle) => handle.is_finished(),
            Worker::Done(_) => true,
        }
    }

    /// Block until the search returns.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the search thread.
    pub fn wait(self) -> SearchResult {
        match self.worker {
            Worker::Thread(handle) => handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload)),
            Worker::Done(result) => result,
        }
    }

    /// Stop the search and wait for its result.
    pub fn stop_and_wait(self) -> SearchResult {
        self.signal_stop();
        self.wait()
    }
}

/// Game driver: owns the position, its history, and at most one search.
pub struct EngineController {
    board: Board,
    /// Hash of every position reached in the game, the current one last
    history: Vec<u64>,
    /// Transposition table and counters, shared with the search thread
    search_state: Arc<Mutex<SearchState>>,
    config: EngineConfig,
    current_job: Option<SearchJob>,
}

impl EngineController {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let board = Board::new();
        EngineController {
            history: vec![board.hash()],
            board,
            search_state: Arc::new(Mutex::new(SearchState::new(config.tt_entries))),
            config,
            current_job: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Position hashes of the game so far, oldest first
    #[must_use]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    #[must_use]
    pub fn search_state(&self) -> &Arc<Mutex<SearchState>> {
        &self.search_state
    }

    /// Replace the game with the position described by `fen`.
    ///
    /// The transposition table is cleared and the history restarts from the
    /// new position. On error the current game is left untouched.
    pub fn load_position(&mut self, fen: &str) -> Result<(), FenError> {
        let board = Board::try_from_fen(fen)?;
        self.stop_search();
        self.history = vec![board.hash()];
        self.board = board;
        self.search_state.lock().clear();
        log::debug!("loaded position {fen}; transposition table cleared");
        Ok(())
    }

    /// Play the legal move from `from` to `to`, promoting to a queen.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<UndoRecord, MoveError> {
        self.stop_search();
        let record = self.board.apply_move(from, to).map_err(|err| {
            log::debug!("rejected move {from}{to}: {err}");
            err
        })?;
        self.history.push(self.board.hash());
        Ok(record)
    }

    /// Play a move given in long algebraic notation (`e2e4`, `e7e8n`).
    pub fn apply_notation(&mut self, notation: &str) -> Result<UndoRecord, MoveError> {
        self.stop_search();
        let mv = self.board.parse_move(notation).map_err(|err| {
            log::debug!("rejected move {notation}: {err}");
            err
        })?;
        let record = self.board.make_move(mv);
        self.history.push(self.board.hash());
        Ok(record)
    }

    /// Take back the move `record` was returned for; it must be the last
    /// move played.
    pub fn undo_move(&mut self, record: UndoRecord) {
        self.stop_search();
        self.board.undo_move(record);
        if self.history.len() > 1 {
            self.history.pop();
        }
    }

    #[must_use]
    pub fn legal_moves(&self, side: Color) -> MoveList {
        self.board.legal_moves(side)
    }

    #[must_use]
    pub fn is_in_check(&self, side: Color) -> bool {
        self.board.is_in_check(side)
    }

    #[must_use]
    pub fn position_hash(&self) -> u64 {
        self.board.hash()
    }

    #[must_use]
    pub fn static_evaluation(&self, side: Color) -> i32 {
        self.board.evaluate(side)
    }

    /// Leaf count of the legal move tree `depth` plies deep with `side` to
    /// move first.
    #[must_use]
    pub fn perft(&self, depth: usize, side: Color) -> u64 {
        let mut board = self.board.clone();
        board.perft_for(side, depth)
    }

    /// The search result for the current position, blocking until done.
    pub fn choose_move(&mut self, limits: SearchLimits) -> SearchResult {
        let (sender, _) = unbounded();
        self.spawn_search(limits, sender).wait()
    }

    /// Score of a fixed-depth search from `side`'s point of view.
    pub fn search_evaluation(&mut self, side: Color) -> i32 {
        let result = self.choose_move(SearchLimits::depth(self.config.eval_depth));
        if side == self.board.side_to_move() {
            result.score
        } else {
            -result.score
        }
    }

    /// Start searching in the background. Progress snapshots and the final
    /// result arrive on the returned channel; a search already running is
    /// stopped first.
    pub fn start_search(&mut self, limits: SearchLimits) -> Receiver<SearchEvent> {
        let (sender, receiver) = unbounded();
        let job = self.spawn_search(limits, sender);
        self.current_job = Some(job);
        receiver
    }

    /// Stop the background search, if any, and return its result.
    pub fn stop_search(&mut self) -> Option<SearchResult> {
        self.current_job.take().map(SearchJob::stop_and_wait)
    }

    /// Wait for the background search, if any, to finish on its own.
    pub fn wait_search(&mut self) -> Option<SearchResult> {
        self.current_job.take().map(SearchJob::wait)
    }

    /// Ask the background search to stop without waiting for it.
    pub fn signal_stop(&self) {
        if let Some(job) = &self.current_job {
            job.signal_stop();
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job
            .as_ref()
            .is_some_and(|job| !job.is_finished())
    }

    fn build_search_config(
        &self,
        limits: &SearchLimits,
        sender: &Sender<SearchEvent>,
    ) -> SearchConfig {
        let mut config = SearchConfig::from_limits(limits).with_history(self.history.clone());
        if config.max_depth.is_none() {
            config.max_depth = Some(self.config.max_depth);
        }
        if config.move_time.is_none() {
            config.move_time = self.config.move_time;
        }
        let progress = sender.clone();
        config.with_progress(Arc::new(move |snapshot: &SearchProgress| {
            // The receiver may have been dropped by a caller that only wants the result
            let _ = progress.send(SearchEvent::Progress(*snapshot));
        }))
    }

    fn spawn_search(&mut self, limits: SearchLimits, sender: Sender<SearchEvent>) -> SearchJob {
        self.stop_search();

        let config = self.build_search_config(&limits, &sender);
        let stop = StopFlag::new();
        let mut search_board = self.board.clone();
        let search_state = Arc::clone(&self.search_state);
        let stop_clone = stop.clone();
        let finished = sender.clone();

        let spawned = thread::Builder::new()
            .name("search".to_string())
            .stack_size(self.config.search_stack_size)
            .spawn(move || {
                let result = {
                    let mut guard = search_state.lock();
                    search(&mut search_board, &mut guard, config, &stop_clone)
                };
                let _ = finished.send(SearchEvent::Finished(result));
                result
            });

        match spawned {
            Ok(handle) => SearchJob {
                stop,
                worker: Worker::Thread(handle),
            },
            Err(err) => {
                log::warn!("failed to spawn search thread ({err}); searching inline");
                let config = self.build_search_config(&limits, &sender);
                let mut board = self.board.clone();
                let result = search(&mut board, &mut self.search_state.lock(), config, &stop);
                let _ = sender.send(SearchEvent::Finished(result));
                SearchJob {
                    stop,
                    worker: Worker::Done(result),
                }
            }
        }
    }
}

impl Default for EngineController {
    fn default() -> Self {
        EngineController::new(EngineConfig::default())
    }
}

impl Drop for EngineController {
    fn drop(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.signal_stop();
            // A panicked worker has nothing left to report here
            if let Worker::Thread(handle) = job.worker {
                let _ = handle.join();
            }
        }
    }
}
