use chrono::{Duration, NaiveDate};
use time_window::{TimeWindow, TimeWindowsCollection};

fn main() -> time_window::Result<()> {
    let at = |h, m| {
        NaiveDate::from_ymd_opt(2015, 2, 19)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .ok_or_else(|| time_window::Error::InvalidTimestamp(format!("{h}:{m}")))
    };

    let busy = TimeWindowsCollection::new(vec![
        TimeWindow::from_span(at(9, 30)?, Duration::minutes(45))?,
        TimeWindow::from_span(at(9, 0)?, Duration::minutes(40))?,
        TimeWindow::from_span(at(13, 0)?, Duration::hours(1))?,
    ]);
    let day = TimeWindow::new(at(9, 0)?, at(17, 0)?)?;

    println!("busy:   {}", busy.compressed());
    println!("free:   {}", busy.complement(&day));
    println!("day:    {day}");
    println!("halves: {:?}", day.split(Duration::hours(4))?);
    Ok(())
}
