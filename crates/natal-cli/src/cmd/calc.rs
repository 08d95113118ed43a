use crate::output::{print_fields, print_json};
use anyhow::Context;
use natal_core::birth::{BirthDate, BirthTime};
use natal_core::signs;

fn parse_date(date: &str) -> anyhow::Result<BirthDate> {
    BirthDate::parse(date).with_context(|| format!("invalid birth date '{date}'"))
}

fn parse_time(time: &str) -> anyhow::Result<BirthTime> {
    BirthTime::parse(time).with_context(|| format!("invalid birth time '{time}'"))
}

pub fn signs(date: &str, time: &str, location: Option<&str>, json: bool) -> anyhow::Result<()> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let result = signs::astrology_data(date, time, location);

    if json {
        print_json(&result)?;
    } else {
        print_fields(&[
            ("Sun", format!("{} {}", result.sun_sign.symbol(), result.sun_sign)),
            ("Moon", format!("{} {}", result.moon_sign.symbol(), result.moon_sign)),
            (
                "Rising",
                format!("{} {}", result.rising_sign.symbol(), result.rising_sign),
            ),
        ]);
    }
    Ok(())
}

pub fn sun(date: &str, json: bool) -> anyhow::Result<()> {
    let date = parse_date(date)?;
    let sign = signs::sun_sign(date);

    if json {
        print_json(&serde_json::json!({ "date": date, "sunSign": sign }))?;
    } else {
        println!("{sign}");
    }
    Ok(())
}

pub fn moon(date: &str, json: bool) -> anyhow::Result<()> {
    let date = parse_date(date)?;
    let sign = signs::moon_sign(date);

    if json {
        print_json(&serde_json::json!({
            "date": date,
            "dayOfYear": date.day_of_year(),
            "cycle": signs::moon_cycle(date),
            "moonSign": sign,
        }))?;
    } else {
        println!("{sign} (day {} of year)", date.day_of_year());
    }
    Ok(())
}

pub fn rising(date: &str, time: &str, location: Option<&str>, json: bool) -> anyhow::Result<()> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let sign = signs::rising_sign(date, time, location);

    if json {
        print_json(&serde_json::json!({
            "date": date,
            "time": time,
            "risingSign": sign,
        }))?;
    } else {
        println!("{sign}");
    }
    Ok(())
}
