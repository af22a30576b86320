//! # Facet System
//!
//! Every list page filters by a handful of named dimensions: status, category,
//! creator, visit date, month. Instead of one hand-written predicate per page,
//! the facet system provides:
//!
//! - **Specifications**: where each facet lives on an entity and how it compares
//! - **Normalisation**: raw JSON reduced to a comparable [`FacetValue`]
//! - **Filtering**: [`FacetCriteria`] applied as a conjunction across facets
//!
//! ## Facet Kinds
//!
//! | Kind | Example | Comparison |
//! |------|---------|------------|
//! | `Scalar` | `status`, `createdBy` | exact string; objects by `name`; arrays by any element |
//! | `Nested` | `interest[].category`, `interest[].brands[]` | any element's sub-field |
//! | `Date` | `receivedDate` | same calendar day in the local offset |
//! | `Month` | `createdAt` | English long month name |
//!
//! ## Sentinels
//!
//! `"Not Specified"` and `"None"` match entities whose facet value is missing,
//! `null`, or an empty array. They may sit alongside concrete values in the
//! same facet.
//!
//! ## Usage
//!
//! ```ignore
//! let specs = vec![FacetSpec::nested("category", "interest", "category")];
//! let criteria = FacetCriteria::new().with("category", ["Electronics", "Not Specified"]);
//! let visible = facets::filter(&items, &criteria, &specs, offset);
//! ```

mod filter;
mod spec;
mod value;

pub use filter::{filter, FacetCriteria, FacetFilter};
pub use spec::{find_spec, FacetKind, FacetSpec};
pub use value::{
    is_sentinel, month_name, normalize_scalar, parse_date, parse_date_str, same_day, FacetValue,
    NONE, NOT_SPECIFIED,
};
