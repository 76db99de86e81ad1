use reqwest::Client;
use tabled::Table;

use crate::{
    billboard::{ChartClient, ChartDate},
    config::ChartSettings,
    error,
    types::ChartTableRow,
    warning,
};

pub async fn chart(date: String) {
    let date = match ChartDate::parse(&date) {
        Ok(date) => date,
        Err(e) => error!("{}", e),
    };

    let client = ChartClient::new(Client::new(), &ChartSettings::from_env());
    match client.fetch(&date).await {
        Ok(entries) if entries.is_empty() => warning!("Chart for {} is empty", date),
        Ok(entries) => {
            let rows: Vec<ChartTableRow> = entries.iter().map(ChartTableRow::from).collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => error!("Failed to fetch chart for {}. Err: {}", date, e),
    }
}
