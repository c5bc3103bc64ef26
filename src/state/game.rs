use uuid::Uuid;

use crate::state::{
    board::Board,
    state_machine::{ApplyError, Generation, SessionMachine, Snapshot},
};

/// Aggregated state for the game session: the fetch-phase machine and the
/// board it owns.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Identifier of this server-side session.
    pub id: Uuid,
    machine: SessionMachine,
    board: Option<Board>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Build an empty session with no board.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            machine: SessionMachine::new(),
            board: None,
        }
    }

    /// Snapshot of the fetch-phase machine.
    pub fn snapshot(&self) -> Snapshot {
        self.machine.snapshot()
    }

    /// Whether `generation` is still the fetch phase in charge.
    pub fn is_loading(&self, generation: Generation) -> bool {
        self.machine.is_loading(generation)
    }

    /// Board currently in play, if any.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Mutable access to the board currently in play.
    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    /// Wipe the current board and open a new fetch phase.
    pub fn begin_fetch(&mut self) -> Generation {
        self.board = None;
        self.machine.begin_fetch()
    }

    /// Replace the board wholesale with the result of `generation`.
    ///
    /// Stale generations leave the session untouched.
    pub fn replace(&mut self, generation: Generation, board: Board) -> Result<&Board, ApplyError> {
        self.machine.complete(generation)?;
        Ok(&*self.board.insert(board))
    }

    /// Record that `generation` failed to produce a board.
    pub fn fail_fetch(&mut self, generation: Generation) -> Result<(), ApplyError> {
        self.machine.fail(generation)?;
        self.board = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{board::tests::sample_board, state_machine::SessionPhase};

    #[test]
    fn new_session_has_no_board() {
        let session = GameSession::new();
        assert!(session.board().is_none());
        assert_eq!(session.snapshot().phase, SessionPhase::Idle);
    }

    #[test]
    fn replace_installs_board_for_current_generation() {
        let mut session = GameSession::new();
        let generation = session.begin_fetch();

        let board = session.replace(generation, sample_board(generation)).unwrap();
        assert_eq!(board.generation(), generation);
        assert_eq!(session.snapshot().phase, SessionPhase::Ready);
    }

    #[test]
    fn stale_board_is_discarded() {
        let mut session = GameSession::new();
        let stale = session.begin_fetch();
        let current = session.begin_fetch();
        session.replace(current, sample_board(current)).unwrap();

        let err = session.replace(stale, sample_board(stale)).unwrap_err();
        assert_eq!(err, ApplyError::StaleGeneration { current, got: stale });
        assert_eq!(session.board().map(Board::generation), Some(current));
    }

    #[test]
    fn restart_wipes_previous_board() {
        let mut session = GameSession::new();
        let first = session.begin_fetch();
        session.replace(first, sample_board(first)).unwrap();

        session.begin_fetch();
        assert!(session.board().is_none());
        assert_eq!(session.snapshot().phase, SessionPhase::Loading);
    }
}
