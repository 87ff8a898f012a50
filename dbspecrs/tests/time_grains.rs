//! Rendering of time grains and epoch conversions for the builtin dialects.

use chrono::NaiveDate;
use dbspec::template::COL;
use dbspec::{engine, DbSpecError, EngineRegistry, TimeFormat};

fn grain_sql(dialect: &str, grain: &str, col: &str) -> String {
    engine(dialect)
        .expect("dialect")
        .grain(grain)
        .expect("grain")
        .render(col)
}

fn grain_names(dialect: &str) -> Vec<&'static str> {
    engine(dialect).unwrap().grain_names().collect()
}

#[test]
fn postgres_day_grain() {
    assert_eq!(grain_sql("postgres", "day", "ts"), "DATE_TRUNC('day', ts)");
}

#[test]
fn postgres_epoch_millis() {
    assert_eq!(
        engine("postgres").unwrap().epoch_millis_sql("ms").unwrap(),
        "(timestamp 'epoch' + (ms/1000.0) * interval '1 second')"
    );
}

#[test]
fn sqlite_week_grain() {
    assert_eq!(
        grain_sql("sqlite", "week", "dt"),
        "DATE(dt, -strftime('%w', dt) || ' days')"
    );
}

#[test]
fn presto_has_no_epoch_conversion() {
    let presto = engine("presto").unwrap();
    assert!(matches!(
        presto.epoch_seconds_sql("c"),
        Err(DbSpecError::UnsupportedConversion(id)) if id == "presto"
    ));
    assert!(matches!(
        presto.epoch_millis_sql("c"),
        Err(DbSpecError::UnsupportedConversion(_))
    ));
}

#[test]
fn mssql_five_minute_grain() {
    assert_eq!(
        grain_sql("mssql", "5 minute", "t"),
        "DATEADD(minute, DATEDIFF(minute, 0, t) / 5 * 5, 0)"
    );
}

#[test]
fn redshift_inherits_postgres_day_grain() {
    assert_eq!(grain_sql("redshift", "day", "ts"), "DATE_TRUNC('day', ts)");
}

#[test]
fn declared_grain_sets() {
    assert_eq!(
        grain_names("postgres"),
        ["Time Column", "second", "minute", "hour", "day", "week", "month", "year"]
    );
    assert_eq!(grain_names("sqlite"), ["Time Column", "day", "week", "month"]);
    assert_eq!(
        grain_names("mysql"),
        ["Time Column", "second", "minute", "hour", "day", "week", "month"]
    );
    assert_eq!(
        grain_names("presto"),
        [
            "Time Column",
            "second",
            "minute",
            "hour",
            "day",
            "week",
            "month",
            "quarter",
            "week_ending_saturday",
            "week_start_sunday",
        ]
    );
    assert_eq!(
        grain_names("mssql"),
        [
            "Time Column",
            "second",
            "minute",
            "5 minute",
            "half hour",
            "hour",
            "day",
            "week",
            "month",
            "quarter",
            "year",
        ]
    );
    assert_eq!(grain_names("redshift"), grain_names("postgres"));
    assert_eq!(grain_names("vertica"), grain_names("postgres"));
}

#[test]
fn epoch_templates() {
    let cases = [
        ("postgres", "(timestamp 'epoch' + c * interval '1 second')"),
        ("sqlite", "datetime(c, 'unixepoch')"),
        ("mysql", "from_unixtime(c)"),
        ("mssql", "dateadd(S, c, '1970-01-01')"),
        ("redshift", "(timestamp 'epoch' + c * interval '1 second')"),
        ("vertica", "(timestamp 'epoch' + c * interval '1 second')"),
    ];
    for (dialect, expected) in cases {
        assert_eq!(
            engine(dialect).unwrap().epoch_seconds_sql("c").unwrap(),
            expected,
            "{dialect}"
        );
    }
}

#[test]
fn mysql_grains() {
    assert_eq!(
        grain_sql("mysql", "second", "t"),
        "DATE_ADD(DATE(t), INTERVAL (HOUR(t)*60*60 + MINUTE(t)*60 + SECOND(t)) SECOND)"
    );
    assert_eq!(
        grain_sql("mysql", "minute", "t"),
        "DATE_ADD(DATE(t), INTERVAL (HOUR(t)*60 + MINUTE(t)) MINUTE)"
    );
    assert_eq!(
        grain_sql("mysql", "hour", "t"),
        "DATE_ADD(DATE(t), INTERVAL HOUR(t) HOUR)"
    );
    assert_eq!(grain_sql("mysql", "day", "t"), "DATE(t)");
    assert_eq!(
        grain_sql("mysql", "week", "t"),
        "DATE(DATE_SUB(t, INTERVAL DAYOFWEEK(t) - 1 DAY))"
    );
    assert_eq!(
        grain_sql("mysql", "month", "t"),
        "DATE(DATE_SUB(t, INTERVAL DAYOFMONTH(t) - 1 DAY))"
    );
}

#[test]
fn presto_grains() {
    assert_eq!(
        grain_sql("presto", "quarter", "t"),
        "date_trunc('quarter', CAST(t AS TIMESTAMP))"
    );
    assert_eq!(
        grain_sql("presto", "week_ending_saturday", "t"),
        "date_add('day', 5, date_trunc('week', date_add('day', 1, CAST(t AS TIMESTAMP))))"
    );
    assert_eq!(
        grain_sql("presto", "week_start_sunday", "t"),
        "date_add('day', -1, date_trunc('week', date_add('day', 1, CAST(t AS TIMESTAMP))))"
    );
}

#[test]
fn mssql_grains() {
    assert_eq!(
        grain_sql("mssql", "second", "t"),
        "DATEADD(second, DATEDIFF(second, '2000-01-01', t), '2000-01-01')"
    );
    assert_eq!(
        grain_sql("mssql", "half hour", "t"),
        "DATEADD(minute, DATEDIFF(minute, 0, t) / 30 * 30, 0)"
    );
    assert_eq!(
        grain_sql("mssql", "quarter", "t"),
        "DATEADD(quarter, DATEDIFF(quarter, 0, t), 0)"
    );
}

#[test]
fn sqlite_month_grain() {
    assert_eq!(
        grain_sql("sqlite", "month", "dt"),
        "DATE(dt, -strftime('%d', dt) || ' days')"
    );
}

#[test]
fn time_column_grain_is_identity_everywhere() {
    for engine in EngineRegistry::builtin().iter() {
        assert_eq!(engine.grain("Time Column").unwrap().render("x.ts"), "x.ts");
    }
}

#[test]
fn unknown_grain_is_reported() {
    let err = engine("sqlite").unwrap().grain("hour").unwrap_err();
    assert!(matches!(
        err,
        DbSpecError::UnknownGrain { dialect, grain } if dialect == "sqlite" && grain == "hour"
    ));
}

#[test]
fn every_render_replaces_every_placeholder() {
    let col = "t.\"created at\"";
    for engine in EngineRegistry::builtin().iter() {
        for grain in engine.grains() {
            let sql = grain.render(col);
            assert!(!sql.contains(COL), "{} {}", engine.dialect_id(), grain.name);
            assert!(sql.contains(col));
            let occurrences = grain.template.as_str().matches(COL).count();
            assert_eq!(sql.matches(col).count(), occurrences);
        }
    }
}

#[test]
fn millis_equals_seconds_of_scaled_column() {
    for engine in EngineRegistry::builtin().iter() {
        if engine.epoch_to_dttm().is_none() {
            continue;
        }
        let x = "event_ms";
        assert_eq!(
            engine.epoch_millis_sql(x).unwrap(),
            engine.epoch_seconds_sql(&format!("({x}/1000.0)")).unwrap(),
            "{}",
            engine.dialect_id()
        );
    }
}

#[test]
fn children_render_like_their_parent() {
    let registry = EngineRegistry::builtin();
    for child in registry.iter() {
        let Some(parent_id) = child.parent() else {
            continue;
        };
        let parent = registry.get(parent_id).unwrap();
        for grain in parent.grains() {
            assert_eq!(
                child.grain(&grain.name).unwrap().render("ts"),
                grain.render("ts")
            );
        }
        assert_eq!(
            child.epoch_millis_sql("ms").unwrap(),
            parent.epoch_millis_sql("ms").unwrap()
        );
    }
}

#[test]
fn time_expression_for_epoch_columns() {
    let mysql = engine("mysql").unwrap();
    assert_eq!(
        mysql
            .time_expression("created", TimeFormat::EpochSeconds, Some("day"))
            .unwrap(),
        "DATE(from_unixtime(created))"
    );
    let presto = engine("presto").unwrap();
    assert!(matches!(
        presto.time_expression("created", TimeFormat::EpochMillis, Some("day")),
        Err(DbSpecError::UnsupportedConversion(_))
    ));
    assert_eq!(
        presto
            .time_expression("created", TimeFormat::Datetime, Some("day"))
            .unwrap(),
        "date_trunc('day', CAST(created AS TIMESTAMP))"
    );
}

#[test]
fn dttm_literals_per_dialect() {
    let dttm = NaiveDate::from_ymd_opt(2019, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let cases = [
        ("postgres", "TIMESTAMP", "'2019-01-02 03:04:05'"),
        ("redshift", "TIMESTAMP", "'2019-01-02 03:04:05'"),
        ("sqlite", "TEXT", "'2019-01-02 03:04:05.000000'"),
        (
            "mysql",
            "DATE",
            "STR_TO_DATE('2019-01-02 03:04:05', '%Y-%m-%d %H:%i:%s')",
        ),
        ("presto", "DATE", "from_iso8601_date('2019-01-02')"),
        ("mssql", "DATETIME", "CONVERT(DATETIME, '2019-01-02T03:04:05', 126)"),
    ];
    for (dialect, target_type, expected) in cases {
        let engine = engine(dialect).unwrap();
        assert_eq!(engine.convert_dttm(target_type, &dttm), expected, "{dialect}");
        assert_eq!(
            engine.dttm_sql_literal(&dttm, TimeFormat::Datetime, target_type),
            expected
        );
    }
    assert_eq!(
        engine("presto")
            .unwrap()
            .dttm_sql_literal(&dttm, TimeFormat::EpochSeconds, "BIGINT"),
        "1546398245.0"
    );
}
