//! Payload command implementation.

use anyhow::Result;

use crate::args::FilterArgs;
use crate::commands::fill_form;
use logparse_client::FilterFormController;

pub fn run(args: &FilterArgs) -> Result<()> {
    let mut controller = FilterFormController::with_filter((), args.base_filter());
    fill_form(&mut controller, args);

    let filter = controller.into_filter();
    filter.validate()?;
    println!("{}", filter.to_payload()?);
    Ok(())
}
