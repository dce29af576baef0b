use super::model::{
    CCA3_COLUMN, CONTINENT_COLUMN, COUNTRY_COLUMN, Dataset, POPULATION_COLUMN, REQUIRED_COLUMNS,
};

/// One or more required columns are absent from the upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "The dataset must contain the following columns: {}. Missing: {}.",
    REQUIRED_COLUMNS.join(", "),
    .missing.join(", ")
)]
pub struct SchemaError {
    /// Required columns not found, in the order of [`REQUIRED_COLUMNS`].
    pub missing: Vec<&'static str>,
}

/// Positions of the required columns inside a validated [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub population: usize,
    pub country: usize,
    pub cca3: usize,
    pub continent: usize,
}

/// Check that every required column is present, by exact name.
pub fn check_schema(dataset: &Dataset) -> Result<Schema, SchemaError> {
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| dataset.column_index(col).is_none())
        .collect();

    match (
        dataset.column_index(POPULATION_COLUMN),
        dataset.column_index(COUNTRY_COLUMN),
        dataset.column_index(CCA3_COLUMN),
        dataset.column_index(CONTINENT_COLUMN),
    ) {
        (Some(population), Some(country), Some(cca3), Some(continent)) => Ok(Schema {
            population,
            country,
            cca3,
            continent,
        }),
        _ => Err(SchemaError { missing }),
    }
}
