/// Data layer: core types, loading, filtering, sampling and aggregation.
///
/// Architecture:
/// ```text
///   predictive_maintenance.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, rename long headers → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, column index (immutable, shared)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec predicates → View
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ aggregate │   │  sample   │  seeded subset (static page only)
///   └──────────┘   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
