use crate::output::{print_fields, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use natal_core::zodiac::ZodiacSign;

#[derive(Subcommand)]
pub enum SignSubcommand {
    /// List all twelve signs in wheel order
    List,
    /// Show details for one sign (e.g. Leo)
    Show { name: String },
}

pub fn run(subcmd: SignSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SignSubcommand::List => list(json),
        SignSubcommand::Show { name } => show(&name, json),
    }
}

fn range_label(sign: ZodiacSign) -> String {
    let ((sm, sd), (em, ed)) = sign.date_range();
    format!("{} {sd} – {} {ed}", month_abbr(sm), month_abbr(em))
}

fn month_abbr(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS[(month as usize + 11) % 12]
}

fn sign_json(sign: ZodiacSign) -> serde_json::Value {
    serde_json::json!({
        "name": sign,
        "symbol": sign.symbol(),
        "element": sign.element(),
        "modality": sign.modality(),
        "rulingPlanet": sign.ruling_planet(),
        "dateRange": range_label(sign),
    })
}

fn list(json: bool) -> anyhow::Result<()> {
    if json {
        let all: Vec<_> = ZodiacSign::all().iter().map(|&s| sign_json(s)).collect();
        print_json(&all)?;
        return Ok(());
    }

    let rows = ZodiacSign::all()
        .iter()
        .map(|&s| {
            vec![
                s.symbol().to_string(),
                s.to_string(),
                s.element().to_string(),
                s.modality().to_string(),
                range_label(s),
            ]
        })
        .collect();
    print_table(&["", "SIGN", "ELEMENT", "MODALITY", "DATES"], rows);
    Ok(())
}

fn show(name: &str, json: bool) -> anyhow::Result<()> {
    let sign: ZodiacSign = name
        .parse()
        .with_context(|| format!("'{name}' is not one of the twelve signs"))?;

    if json {
        print_json(&sign_json(sign))?;
    } else {
        print_fields(&[
            ("Sign", format!("{} {sign}", sign.symbol())),
            ("Element", sign.element().to_string()),
            ("Modality", sign.modality().to_string()),
            ("Ruler", sign.ruling_planet().to_string()),
            ("Dates", range_label(sign)),
        ]);
    }
    Ok(())
}
