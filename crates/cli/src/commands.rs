//! Command implementations.

pub mod config;
pub mod parse;
pub mod payload;

use anyhow::{Context, Result};
use logparse_client::{FilterFormController, LogParserClient, MetricsCollector};
use logparse_config::Config;

use crate::args::FilterArgs;

/// Fill the form from command-line flags, in the order a user would.
pub fn fill_form<A>(controller: &mut FilterFormController<A>, args: &FilterArgs) {
    controller.select_file(args.file.as_deref());
    if let Some(name) = &args.file_name {
        controller.filter_mut().file_name = Some(name.clone());
    }
    controller.set_uniq_records(!args.no_uniq_records);
}

/// Build a client from resolved configuration.
pub fn build_client_from_config(config: &Config, metrics: bool) -> Result<LogParserClient> {
    let mut builder = LogParserClient::builder().from_config(config);
    if metrics {
        builder = builder.metrics(MetricsCollector::new());
    }
    builder.build().context("Failed to build HTTP client")
}
