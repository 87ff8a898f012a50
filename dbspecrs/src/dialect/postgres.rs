//! PostgreSQL.

use crate::engine::EngineSpec;
use crate::grain::GrainSpec;

use super::time_column;

pub fn spec() -> EngineSpec {
    let mut grains = vec![time_column()];
    for unit in ["second", "minute", "hour", "day", "week", "month", "year"] {
        grains.push(GrainSpec::new(unit, &format!("DATE_TRUNC('{unit}', {{col}})")));
    }

    EngineSpec::new("postgres")
        .alias("postgresql")
        .epoch_to_dttm("(timestamp 'epoch' + {col} * interval '1 second')")
        .time_grains(grains)
}
