/// Data layer: core types, loading, schema checking and range filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet upload
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse bytes → Dataset          (LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema  │  required columns → Schema      (SchemaError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  population bounds + selection → filtered indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
