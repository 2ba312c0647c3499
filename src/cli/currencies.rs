use super::{convert, ui};
use crate::core::{CurrencySet, ExchangeRateService};
use anyhow::Result;
use comfy_table::Cell;

impl CurrencySet {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);

        for (code, name) in self.iter() {
            table.add_row(vec![Cell::new(code), Cell::new(name)]);
        }

        format!(
            "{}\n\n{}\n\n{}",
            ui::style_text("Supported Currencies", ui::StyleType::Title),
            table,
            ui::style_text(&format!("{} currencies", self.len()), ui::StyleType::Subtle)
        )
    }
}

pub async fn run(service: &dyn ExchangeRateService) -> Result<String> {
    let currencies = convert::fetch_currencies(service).await?;
    Ok(currencies.display_as_table())
}
