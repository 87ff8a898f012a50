//! SQLite.

use crate::dttm::DttmStyle;
use crate::engine::EngineSpec;
use crate::grain::GrainSpec;

use super::time_column;

pub fn spec() -> EngineSpec {
    EngineSpec::new("sqlite")
        .epoch_to_dttm("datetime({col}, 'unixepoch')")
        .dttm_style(DttmStyle::Sqlite)
        .time_grains(vec![
            time_column(),
            GrainSpec::new("day", "DATE({col})"),
            GrainSpec::new("week", "DATE({col}, -strftime('%w', {col}) || ' days')"),
            GrainSpec::new("month", "DATE({col}, -strftime('%d', {col}) || ' days')"),
        ])
}
