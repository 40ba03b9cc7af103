//! Missing value cleaning command

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::data::{clean_table, load_table_with_progress, save_table, CleanStrategy};
use crate::report::display_clean_summary;
use crate::utils::{create_spinner, finish_with_success, finish_with_warning, print_input, print_step_header};

pub fn run_clean(
    input: &Path,
    strategy: CleanStrategy,
    output: &Path,
    infer_schema_length: usize,
) -> Result<()> {
    print_step_header(1, "Load Data");
    let (table, rows, cols) = load_table_with_progress(input, infer_schema_length)?;
    print_input(input, None, rows, cols);

    print_step_header(2, "Clean Missing Values");
    let (cleaned, summary) = clean_table(&table, strategy);
    display_clean_summary(&summary);

    print_step_header(3, "Save Data");
    let spinner = create_spinner(&format!("Writing {}...", output.display()));
    save_table(&cleaned, output)?;
    if cleaned.is_empty() {
        finish_with_warning(&spinner, "Every row had a missing value; wrote header only");
    } else {
        finish_with_success(&spinner, "Cleaned dataset saved");
    }
    println!("      Output: {}", style(output.display()).dim());

    Ok(())
}
