//! MySQL.
//!
//! Sub-day grains rebuild the timestamp from its date plus the kept
//! components, since MySQL has no DATE_TRUNC.

use crate::dttm::DttmStyle;
use crate::engine::EngineSpec;
use crate::grain::GrainSpec;

use super::time_column;

pub fn spec() -> EngineSpec {
    EngineSpec::new("mysql")
        .epoch_to_dttm("from_unixtime({col})")
        .dttm_style(DttmStyle::Mysql)
        .time_grains(vec![
            time_column(),
            GrainSpec::new(
                "second",
                "DATE_ADD(DATE({col}), \
                 INTERVAL (HOUR({col})*60*60 + MINUTE({col})*60 + SECOND({col})) SECOND)",
            ),
            GrainSpec::new(
                "minute",
                "DATE_ADD(DATE({col}), INTERVAL (HOUR({col})*60 + MINUTE({col})) MINUTE)",
            ),
            GrainSpec::new("hour", "DATE_ADD(DATE({col}), INTERVAL HOUR({col}) HOUR)"),
            GrainSpec::new("day", "DATE({col})"),
            GrainSpec::new(
                "week",
                "DATE(DATE_SUB({col}, INTERVAL DAYOFWEEK({col}) - 1 DAY))",
            ),
            GrainSpec::new(
                "month",
                "DATE(DATE_SUB({col}, INTERVAL DAYOFMONTH({col}) - 1 DAY))",
            ),
        ])
}
