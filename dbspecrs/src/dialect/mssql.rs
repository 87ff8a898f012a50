//! Microsoft SQL Server.
//!
//! Truncation counts whole units since an anchor date with DATEDIFF and adds
//! them back with DATEADD. Seconds anchor at 2000-01-01 because DATEDIFF in
//! seconds from 1900 overflows an int.

use crate::dttm::DttmStyle;
use crate::engine::EngineSpec;
use crate::grain::GrainSpec;

use super::time_column;

pub fn spec() -> EngineSpec {
    let mut grains = vec![
        time_column(),
        GrainSpec::new(
            "second",
            "DATEADD(second, DATEDIFF(second, '2000-01-01', {col}), '2000-01-01')",
        ),
        GrainSpec::new("minute", "DATEADD(minute, DATEDIFF(minute, 0, {col}), 0)"),
        GrainSpec::new(
            "5 minute",
            "DATEADD(minute, DATEDIFF(minute, 0, {col}) / 5 * 5, 0)",
        ),
        GrainSpec::new(
            "half hour",
            "DATEADD(minute, DATEDIFF(minute, 0, {col}) / 30 * 30, 0)",
        ),
    ];
    for unit in ["hour", "day", "week", "month", "quarter", "year"] {
        grains.push(GrainSpec::new(
            unit,
            &format!("DATEADD({unit}, DATEDIFF({unit}, 0, {{col}}), 0)"),
        ));
    }

    EngineSpec::new("mssql")
        .epoch_to_dttm("dateadd(S, {col}, '1970-01-01')")
        .dttm_style(DttmStyle::Mssql)
        .time_grains(grains)
}
