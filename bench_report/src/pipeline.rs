use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::{
    analysis::print_summary,
    charts::{operation_chart, speedup_chart},
    config::Settings,
    data::Operation,
    defaults::{OPERATION_FIGURE_SIZE, SPEEDUP_FIGURE_SIZE, SPEEDUP_FIGURE_STEM},
    figures::write_figure,
    latex::{missing_figures, write_latex_snippet},
    loader::{load_measurements, LoadError},
    speedup::compute_speedups,
};

/// Run the whole analysis: load, summarize, chart, and write the LaTeX snippet.
///
/// Returns the files written. A missing input file is not an error: guidance is
/// printed and nothing is written, not even the output directory.
pub fn run(settings: &Settings) -> Result<Vec<PathBuf>> {
    let rows = match load_measurements(&settings.input) {
        Ok(rows) => rows,
        Err(LoadError::NotFound { path }) => {
            println!("❌ Error: No timing data found!");
            println!(
                "Run ./process_all_images.sh first to generate data ({} is missing)",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Could not create output directory {}",
            settings.output_dir.display()
        )
    })?;

    print_summary(&rows, &settings.resolutions);

    println!("\nGENERATING GRAPHS...");
    println!("{}", "-".repeat(40));

    let mut written = Vec::new();

    for operation in Operation::ALL {
        let Some(plot) = operation_chart(&rows, operation, &settings.resolutions) else {
            log::warn!("No data found for operation: {}", operation);
            continue;
        };
        let paths = write_figure(
            &plot,
            &settings.output_dir,
            &operation.figure_stem(),
            OPERATION_FIGURE_SIZE,
            &settings.figures,
        )?;
        report_saved(&paths);
        written.extend(paths);
    }

    let speedups = compute_speedups(&rows, &settings.resolutions);
    match speedup_chart(&speedups) {
        Some(plot) => {
            let paths = write_figure(
                &plot,
                &settings.output_dir,
                SPEEDUP_FIGURE_STEM,
                SPEEDUP_FIGURE_SIZE,
                &settings.figures,
            )?;
            report_saved(&paths);
            written.extend(paths);
        }
        None => log::warn!("No speedup data available"),
    }

    let latex = write_latex_snippet(&settings.output_dir)?;
    println!("Saved: {}", latex.display());
    let missing = missing_figures(&settings.output_dir);
    if !missing.is_empty() {
        log::warn!(
            "{} includes {} PDF figure(s) that were not written; build with the 'static-export' feature and request the pdf format",
            latex.display(),
            missing.len()
        );
        for path in &missing {
            log::debug!("Missing LaTeX figure: {}", path.display());
        }
    }
    written.push(latex);

    println!("\n✅ ANALYSIS COMPLETE!");
    println!("{}", "=".repeat(50));
    println!("All graphs saved to: {}/", settings.output_dir.display());
    println!("Generated files:");
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("  • {}", name.to_string_lossy());
        }
    }

    Ok(written)
}

fn report_saved(paths: &[PathBuf]) {
    for path in paths {
        println!("Saved: {}", path.display());
    }
}
