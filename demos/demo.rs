use wallclock::{Span, SpanFormat, Timestamp, TimestampFormat, Unit, UtcOffset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Current instant
    let now = Timestamp::now();
    println!("Now (ISO 8601): {}", now.format(TimestampFormat::Iso8601));
    println!("Now (diagnostic): {}", now.format(TimestampFormat::Basic));
    println!("Epoch seconds: {}", now.epoch_secs());
    println!(
        "Local offset: {}",
        UtcOffset::local().to_span().format(SpanFormat::TimeZone)
    );

    // Parsing
    let opened = Timestamp::parse("2025-01-15T09:30:00+0700")?;
    println!("Parsed: {}", opened);

    // Calendar truncation and advancement
    let period_start = opened.start_of(Unit::Month)?;
    let period_end = period_start.next(Unit::Month);
    println!("Period: {} .. {}", period_start, period_end);
    println!(
        "Jan 31 + 1 month rolls to {}",
        Timestamp::parse("2025-01-31")?.next_at(Unit::Month, UtcOffset::UTC)
    );

    // Range membership
    println!(
        "Inside period: {}",
        period_start.before_or_equal(&opened) && opened.before(&period_end)
    );

    // Spans
    let length = period_end.diff(&period_start);
    println!("Period length: {}", length.format(SpanFormat::Basic));
    println!("Total hours: {}", length.total_hours());

    let offset = Span::from_mins(150.0);
    println!(
        "150 minutes as an offset: {}",
        offset.format(SpanFormat::TimeZone)
    );

    let earlier = opened.subtract(Span::from_hours(2.0));
    println!("Two hours earlier: {}", earlier);

    Ok(())
}
