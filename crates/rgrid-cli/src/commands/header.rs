//! Header command: the date × resource header for a range.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};
use rgrid_core::localizer::is_valid_pattern;
use rgrid_core::{
    ChronoLocalizer, DefaultAccessors, FormatKey, HeaderComposer, HeaderLayout, LabelAction,
    LayoutVariant, OverflowState, Resource, View,
};

use super::util::{date_range, parse_date};
use crate::data::GridData;
use crate::{Config, HeaderArgs};

pub fn run<W: Write>(writer: &mut W, args: &HeaderArgs, config: &Config) -> Result<()> {
    let now = Local::now().naive_local();
    let today = match &args.today {
        Some(s) => parse_date(s, now)?,
        None => now,
    };
    let start = parse_date(&args.start, today)?;
    let range = date_range(start, args.days)?;

    let data = GridData::load(&args.data)?;
    let accessors = DefaultAccessors;
    let index = data.index(&accessors);

    let localizer = localizer_for(config)?;
    let resolver = fixed_view(config.drilldown_view);
    let mut composer = HeaderComposer::new(&localizer)
        .drilldown(&resolver)
        .overflow(OverflowState {
            is_overflowing: args.overflowing,
            rtl: args.rtl || config.rtl,
            scrollbar_size: config.scrollbar_size,
        });
    if let Some(width) = config.gutter_width {
        composer = composer.gutter_width(width);
    }

    let layout = composer.compose(&range, &index, today);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&layout)?)?;
    } else {
        write!(writer, "{}", format_header(&layout))?;
    }

    Ok(())
}

/// Builds the localizer from config, rejecting malformed label patterns.
pub fn localizer_for(config: &Config) -> Result<ChronoLocalizer> {
    if !is_valid_pattern(&config.day_format) {
        bail!("invalid day_format pattern: {}", config.day_format);
    }
    Ok(ChronoLocalizer::default().with_format(FormatKey::DayFormat, &config.day_format))
}

/// Drilldown resolver returning the configured view for every date.
pub fn fixed_view(view: Option<View>) -> impl Fn(NaiveDateTime) -> Option<View> {
    move |_date| view
}

/// Formats the header layout as a human-readable listing.
pub fn format_header(layout: &HeaderLayout<'_, Resource>) -> String {
    let mut output = String::new();

    let Some(first) = layout.columns.first() else {
        writeln!(output, "No dates in range.").unwrap();
        return output;
    };

    let variant = match first.variant {
        LayoutVariant::MultiDay => "multi-day",
        LayoutVariant::SingleDay => "single-day",
        LayoutVariant::SingleDaySingleResource => "single-day, single resource",
    };
    writeln!(output, "HEADER: {} column(s), {variant}", layout.columns.len()).unwrap();
    if let Some(margin) = layout.container.margin {
        writeln!(output, "Scrollbar margin: {} {}px", margin.edge, margin.px).unwrap();
    }
    if let Some(width) = layout.container.gutter.width {
        writeln!(output, "Gutter: {width}px").unwrap();
    }

    for column in &layout.columns {
        writeln!(output).unwrap();
        let mut line = match column.label.action {
            LabelAction::Drilldown { view } => format!("[{}] -> {view}", column.label.content),
            LabelAction::Plain => column.label.content.clone(),
        };
        if column.is_today {
            line.push_str("  (today)");
        }
        writeln!(output, "{line}").unwrap();
        for cell in &column.cells {
            writeln!(output, "  {}", cell.content).unwrap();
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    const DATA: &str = r#"{
        "resources": [
            {"id": "a", "title": "Room A", "minutes_by_date": {"2025-01-28": 90}},
            {"id": "b", "title": "Bob", "is_part_time": true},
            {"id": "c", "title": "Room C"}
        ],
        "events": []
    }"#;

    fn write_data(json: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("grid.json");
        std::fs::write(&path, json).unwrap();
        (temp, path)
    }

    fn args(data: std::path::PathBuf, days: u32) -> HeaderArgs {
        HeaderArgs {
            data,
            start: "2025-01-27".to_string(),
            days,
            today: Some("2025-01-28T10:00:00".to_string()),
            overflowing: false,
            rtl: false,
            json: false,
        }
    }

    #[test]
    fn header_for_three_days() {
        let (_temp, path) = write_data(DATA);

        let mut output = Vec::new();
        run(&mut output, &args(path, 3), &Config::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        HEADER: 3 column(s), multi-day

        [27 Mon] -> day
          Room A
          Room C
          other

        [28 Tue] -> day  (today)
          Room A (90 min)
          Room C
          other

        [29 Wed] -> day
          Room A
          Room C
          other
        ");
    }

    #[test]
    fn header_single_day_is_plain() {
        let (_temp, path) = write_data(DATA);
        let mut header_args = args(path, 1);
        header_args.overflowing = true;
        header_args.rtl = true;

        let mut output = Vec::new();
        run(&mut output, &header_args, &Config::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        HEADER: 1 column(s), single-day
        Scrollbar margin: left 17px

        27 Mon
          Room A
          Room C
          other
        ");
    }

    #[test]
    fn header_without_resources_has_two_cells() {
        let (_temp, path) = write_data(r#"{"events": []}"#);
        let config = Config {
            drilldown_view: None,
            gutter_width: Some(64),
            ..Config::default()
        };

        let mut output = Vec::new();
        run(&mut output, &args(path, 2), &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        // The unassigned context cell has an empty title.
        assert_eq!(
            output,
            "HEADER: 2 column(s), multi-day\nGutter: 64px\n\n27 Mon\n  \n  other\n\n28 Tue  (today)\n  \n  other\n"
        );
    }

    #[test]
    fn header_json_output() {
        let (_temp, path) = write_data(DATA);
        let mut header_args = args(path, 2);
        header_args.json = true;
        header_args.overflowing = true;

        let mut output = Vec::new();
        run(&mut output, &header_args, &Config::default()).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["container"]["class_name"], "rbc-time-header rbc-overflowing");
        assert_eq!(json["container"]["margin"]["edge"], "right");
        assert_eq!(json["columns"][0]["label"]["action"]["kind"], "drilldown");
        assert_eq!(json["columns"][0]["label"]["action"]["view"], "day");
        assert_eq!(json["columns"][1]["is_today"], true);
        assert_eq!(json["columns"][1]["cells"][0]["minutes"], 90);
        assert_eq!(json["columns"][1]["cells"][2]["key"], "resource_other");
    }

    #[test]
    fn invalid_day_format_is_rejected() {
        let config = Config {
            day_format: "%d %".to_string(),
            ..Config::default()
        };
        let err = localizer_for(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid day_format pattern: %d %");
    }

    #[test]
    fn fixed_view_ignores_date() {
        let resolve = fixed_view(Some(View::Week));
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 27)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(resolve(date), Some(View::Week));
        assert_eq!(fixed_view(None)(date), None);
    }
}
