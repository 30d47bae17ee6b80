//! Drilldown command: simulates a click on a column's date label.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};
use rgrid_core::{
    DefaultAccessors, DrilldownDispatcher, FormatKey, HeaderClick, HeaderComposer, Localizer,
    Resource, Resources, View,
};

use super::header::{fixed_view, localizer_for};
use super::util::{date_range, parse_date};
use crate::{Config, DrilldownArgs};

pub fn run<W: Write>(writer: &mut W, args: &DrilldownArgs, config: &Config) -> Result<()> {
    let now = Local::now().naive_local();
    let start = parse_date(&args.start, now)?;
    let range = date_range(start, args.days)?;

    let accessors = DefaultAccessors;
    let index = Resources::new(None::<&[Resource]>, &accessors);

    let localizer = localizer_for(config)?;
    let resolver = fixed_view(args.view.or(config.drilldown_view));
    let layout = HeaderComposer::new(&localizer)
        .drilldown(&resolver)
        .compose(&range, &index, now);

    let Some(column) = layout.columns.get(args.column) else {
        bail!(
            "column {} out of range: the header has {} column(s)",
            args.column,
            layout.columns.len()
        );
    };

    let mut navigations: Vec<(NaiveDateTime, View)> = Vec::new();
    let mut click = HeaderClick::default();
    let dispatched = {
        let mut dispatcher =
            DrilldownDispatcher::new().on_drill_down(|date, view| navigations.push((date, view)));
        column.click(&mut dispatcher, &mut click)
    };

    if !dispatched {
        writeln!(writer, "{} is not a drilldown link.", column.label.text)?;
        return Ok(());
    }

    for (date, view) in navigations {
        let date = localizer.format(date, FormatKey::DateFormat);
        writeln!(writer, "Navigate to {view} view for {date}")?;
    }
    if click.default_prevented() {
        writeln!(writer, "Default link behaviour suppressed.")?;
    }

    Ok(())
}
