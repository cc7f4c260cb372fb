// Engine error type for structurally invalid inputs.
//
// Sparse statistical data never errors: missing denominators become None,
// empty pools become empty results. Errors are reserved for inputs the
// calling layer should have validated, such as a trade proposal that
// references a player nobody rosters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown team `{id}`")]
    UnknownTeam { id: String },

    #[error("player `{player_id}` is not on team `{team_id}`")]
    PlayerNotOnTeam { player_id: String, team_id: String },

    #[error("league has no teams")]
    EmptyLeague,

    #[error("trade proposal must involve two distinct teams")]
    SameTeamTrade,
}
