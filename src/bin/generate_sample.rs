use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// `(CCA3, Country/Territory, Continent, 2022 Population)`
const COUNTRIES: &[(&str, &str, &str, i64)] = &[
    ("CHN", "China", "Asia", 1_425_887_337),
    ("IND", "India", "Asia", 1_417_173_173),
    ("USA", "United States", "North America", 338_289_857),
    ("IDN", "Indonesia", "Asia", 275_501_339),
    ("PAK", "Pakistan", "Asia", 235_824_862),
    ("NGA", "Nigeria", "Africa", 218_541_212),
    ("BRA", "Brazil", "South America", 215_313_498),
    ("BGD", "Bangladesh", "Asia", 171_186_372),
    ("RUS", "Russia", "Europe", 144_713_314),
    ("MEX", "Mexico", "North America", 127_504_125),
    ("JPN", "Japan", "Asia", 123_951_692),
    ("ETH", "Ethiopia", "Africa", 123_379_924),
    ("PHL", "Philippines", "Asia", 115_559_009),
    ("EGY", "Egypt", "Africa", 110_990_103),
    ("COD", "DR Congo", "Africa", 99_010_212),
    ("VNM", "Vietnam", "Asia", 98_186_856),
    ("IRN", "Iran", "Asia", 88_550_570),
    ("TUR", "Turkey", "Asia", 85_341_241),
    ("DEU", "Germany", "Europe", 83_369_843),
    ("THA", "Thailand", "Asia", 71_697_030),
    ("GBR", "United Kingdom", "Europe", 67_508_936),
    ("FRA", "France", "Europe", 64_626_628),
    ("ZAF", "South Africa", "Africa", 59_893_885),
    ("ITA", "Italy", "Europe", 59_037_474),
    ("KEN", "Kenya", "Africa", 54_027_487),
    ("COL", "Colombia", "South America", 51_874_024),
    ("ESP", "Spain", "Europe", 47_558_630),
    ("ARG", "Argentina", "South America", 45_510_318),
    ("AFG", "Afghanistan", "Asia", 41_128_771),
    ("CAN", "Canada", "North America", 38_454_327),
    ("PER", "Peru", "South America", 34_049_588),
    ("AUS", "Australia", "Oceania", 26_177_413),
    ("NZL", "New Zealand", "Oceania", 5_185_288),
    ("FJI", "Fiji", "Oceania", 929_766),
    ("ISL", "Iceland", "Europe", 372_899),
    ("TKL", "Tokelau", "Oceania", 1_871),
    ("VAT", "Vatican City", "Europe", 510),
];

const HEADER: [&str; 5] = ["Rank", "CCA3", "Country/Territory", "Continent", "2022 Population"];

fn write_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(HEADER)?;
    for (rank, (cca3, country, continent, population)) in COUNTRIES.iter().enumerate() {
        writer.write_record([
            (rank + 1).to_string(),
            cca3.to_string(),
            country.to_string(),
            continent.to_string(),
            population.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADER[0], DataType::Int64, false),
        Field::new(HEADER[1], DataType::Utf8, false),
        Field::new(HEADER[2], DataType::Utf8, false),
        Field::new(HEADER[3], DataType::Utf8, false),
        Field::new(HEADER[4], DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(1..=COUNTRIES.len() as i64)),
            Arc::new(StringArray::from_iter_values(COUNTRIES.iter().map(|c| c.0))),
            Arc::new(StringArray::from_iter_values(COUNTRIES.iter().map(|c| c.1))),
            Arc::new(StringArray::from_iter_values(COUNTRIES.iter().map(|c| c.2))),
            Arc::new(Int64Array::from_iter_values(COUNTRIES.iter().map(|c| c.3))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

/// Writes `<stem>.csv` and `<stem>.parquet` (stem defaults to
/// `world_population_sample`).
fn main() -> Result<()> {
    let stem = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "world_population_sample".to_string());

    let csv_path = PathBuf::from(format!("{stem}.csv"));
    let parquet_path = PathBuf::from(format!("{stem}.parquet"));

    write_csv(&csv_path).with_context(|| format!("writing {}", csv_path.display()))?;
    write_parquet(&parquet_path).with_context(|| format!("writing {}", parquet_path.display()))?;

    println!(
        "Wrote {} countries to {} and {}",
        COUNTRIES.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
