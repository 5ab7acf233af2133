mod defs;
mod tuning;

pub use defs::{
    load_enemy_defs, parse_enemy_defs, BarrageDef, DefErrorCode, DefParseError, EnemyDef,
    SourceLocation, ViewRange,
};
pub use tuning::{MoveTuning, TuningError};
