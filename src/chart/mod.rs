//! Chart construction: turns the filtered rows into drawable chart models.
//! Drawing itself lives in `ui::plot`.

pub mod bubble;
pub mod choropleth;
pub mod geo;
pub mod outlines;

use crate::data::model::Dataset;
use crate::data::schema::Schema;

/// The four chart-relevant fields of one filtered row.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country: String,
    pub cca3: String,
    pub continent: String,
    pub population: f64,
}

/// Project the rows at `indices` onto the chart fields.
///
/// `populations` holds the already-coerced population of every dataset row.
pub fn country_rows(
    dataset: &Dataset,
    schema: &Schema,
    populations: &[f64],
    indices: &[usize],
) -> Vec<CountryRow> {
    indices
        .iter()
        .map(|&i| CountryRow {
            country: dataset.cell(i, schema.country).label(),
            cca3: dataset.cell(i, schema.cca3).label(),
            continent: dataset.cell(i, schema.continent).label(),
            population: populations[i],
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn row(country: &str, cca3: &str, continent: &str, population: f64) -> CountryRow {
    CountryRow {
        country: country.to_string(),
        cca3: cca3.to_string(),
        continent: continent.to_string(),
        population,
    }
}
