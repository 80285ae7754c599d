//! `cover calc`: the calculator on its own, no network.

use anyhow::Result;
use cover_quote::calculator::{compute, Quote};
use cover_quote::form::{parse_dependents, parse_income};

pub fn run(income: &str, dependents: &str, output_json: bool) -> Result<()> {
    let income = parse_income(income)?;
    let dependents = parse_dependents(dependents)?;
    let quote = compute(income, dependents);

    if output_json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print!("{}", render(&quote));
    }
    Ok(())
}

pub fn render(quote: &Quote) -> String {
    format!(
        "Cover:     {}\nPremium:   {} / month\n",
        quote.cover, quote.premium
    )
}
