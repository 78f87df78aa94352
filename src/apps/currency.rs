//!
//! The currency converter menu, with rates that can be added or changed.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::Console;
use crate::StoreError;
use crate::schemas::currency::{*};
use super::{grid, invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 4] = [
    "Perform a Conversion",
    "Display Currencies",
    "Add or Update a Rate",
    "Save and Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut table, loaded) = loaded_or(console, "currencies", open_currencies(data_dir), new_currencies)?;
    if loaded > 0 {
        console.say(format!("Loaded {} currencies.", loaded))?;
    }

    while let Some(choice) = menu(console, "Currency Converter", &OPTIONS)? {
        match choice {
            1 => conversion(console, &table)?,
            2 => show_all(console, &table)?,
            3 => set_rate(console, &mut table)?,
            4 => if save_table(console, &table, data_dir)? {
                console.say("Rates saved. Goodbye!")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn show_all<R : BufRead, W : Write>(console : &mut Console<R, W>, table : &Currencies) -> std::io::Result<()> {
    let mut listing = grid(&["Code", "Name", "Rate vs USD"]);
    for currency in table.iter() {
        listing.add_row(vec![currency.code.to_string(), currency.name.to_string(), format!("{:.4}", currency.rate_vs_usd)]);
    }
    console.say(listing.to_string())
}

fn conversion<R : BufRead, W : Write>(console : &mut Console<R, W>, table : &Currencies) -> std::io::Result<()> {
    show_all(console, table)?;
    let Some(amount) = console.read_f64("Enter the amount to convert: ")? else { return Ok(()) };
    let Some(from) = console.ask_line("Enter the 3-letter code of the currency to convert FROM: ")? else { return Ok(()) };
    let Some(to) = console.ask_line("Enter the 3-letter code of the currency to convert TO: ")? else { return Ok(()) };

    match convert(table, amount, &from, &to) {
        Ok(result) => console.say(format!("Result: {}", result)),
        Err(StoreError::NotFound(code)) => report(console, format!("Unknown currency code '{}'.", code)),
        Err(err) => report(console, err),
    }
}

fn set_rate<R : BufRead, W : Write>(console : &mut Console<R, W>, table : &mut Currencies) -> std::io::Result<()> {
    let Some(code) = console.ask_line("Enter the 3-letter currency code: ")? else { return Ok(()) };
    let key = match code_key(&code) {
        Ok(key) => key,
        Err(err) => return report(console, err),
    };
    let Some(rate) = console.read_f64(&format!("Enter the number of {} per US Dollar: ", key))? else { return Ok(()) };

    let result = if table.find(&key).is_some() {
        table.update(&key, CurrencyChanges{ name : None, rate_vs_usd : Some(rate) })
    } else {
        let Some(name) = console.ask_line("Enter the currency name: ")? else { return Ok(()) };
        Currency::new(&code, &name, rate).and_then(|currency| table.insert(currency)).map(|_| ())
    };
    match result {
        Ok(()) => console.say(format!("Rate for {} set to {}.", key, rate)),
        Err(err) => report(console, err),
    }
}

#[cfg(test)]
mod tests {
    use crate::apps::Program;
    use crate::apps::test_support::run_script;
    use super::*;

    #[test]
    fn convert_and_add_rates() {
        let dir = tempfile::tempdir().unwrap();
        let script = concat!(
            "1\n100\nusd\neur\n",
            "1\n5\nUSD\nXYZ\n",
            "3\nchf\n0.88\nSwiss Franc\n",
            "3\nEUR\n0.5\n",
            "3\nEURO\n",
            "1\n10\nUSD\nEUR\n",
            "4\n",
        );
        let shown = run_script(Program::Currency, dir.path(), script);

        assert!(shown.contains("Result: 100.00 USD = 92.00 EUR"));
        assert!(shown.contains("Error: Unknown currency code 'XYZ'."));
        assert!(shown.contains("Rate for CHF set to 0.88."));
        assert!(shown.contains("Error: invalid input: currency code 'EURO' must be 3 letters"));
        assert!(shown.contains("Result: 10.00 USD = 5.00 EUR"));

        let (table, loaded) = open_currencies(dir.path()).unwrap();
        assert_eq!(loaded, 7);
        assert_eq!(table.get(&code_key("chf").unwrap()).unwrap().name, "Swiss Franc");
    }
}
