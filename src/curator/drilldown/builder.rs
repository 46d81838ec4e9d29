//! Secondary request construction.

use std::collections::BTreeSet;

use super::config::DrilldownConfig;
use super::granular_key::GranularKeys;
use crate::request::{Filter, ReportingRequest};

pub struct DrilldownRequestBuilder;

impl DrilldownRequestBuilder {
    /// Derive the drilldown request from the original one.
    ///
    /// Selects the drill dimension, the join key and the original metrics;
    /// takes cube and sort from the config when it sets them; pages by
    /// `max_rows`; keeps the original filters.
    pub fn rewrite(
        original: &ReportingRequest,
        config: &DrilldownConfig,
        keys: &GranularKeys,
    ) -> ReportingRequest {
        let select = std::iter::once(config.dimension.clone())
            .chain(keys.primary_key.clone())
            .chain(keys.fact_fields.iter().cloned());

        let cube = match config.cube.as_deref() {
            Some(cube) if !cube.is_empty() => cube,
            _ => original.cube.as_str(),
        };

        let sort_by = if config.ordering.is_empty() {
            original.sort_by.clone()
        } else {
            config.ordering.clone()
        };

        original
            .clone()
            .with_cube(cube)
            .with_select_fields(select)
            .with_sort_by(sort_by)
            .with_paging(config.max_rows)
            .with_filters(original.filter_expressions.iter().cloned())
            .with_row_count(false)
    }

    /// Restrict `request` to rows whose `dimension` takes one of `values`.
    pub fn inject_membership_filter(
        request: ReportingRequest,
        config: &DrilldownConfig,
        values: BTreeSet<String>,
    ) -> ReportingRequest {
        request
            .with_filter(Filter::in_values(config.dimension.field.as_str(), values))
            .with_row_count(false)
    }
}
