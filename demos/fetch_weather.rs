use clima::{Clima, ClimaError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), ClimaError> {
    configure_polars_display();
    let url = env::args().nth(1).unwrap_or_else(|| {
        "https://energyplus.net/weather-download/north_and_central_america_wmo_region_4/USA/CA/USA_CA_Oakland.Intl.AP.724930_TMY/USA_CA_Oakland.Intl.AP.724930_TMY.epw"
            .to_string()
    });

    let client = Clima::new();
    let data = client.weather().url(&url).call().await?;

    println!(
        "{}, {} ({}), period {}",
        data.location.city,
        data.location.country,
        data.location.source_url,
        data.location.reference_period
    );
    println!("{}", data.table.head(Some(8)));

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
