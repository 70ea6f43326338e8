//! LaTeX snippet referencing the generated figures.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{data::Operation, defaults::LATEX_FILE_NAME, defaults::SPEEDUP_FIGURE_STEM};

fn figure_block(figure_dir: &str, stem: &str, caption: &str) -> String {
    format!(
        r"\begin{{figure}}[htbp]
    \centering
    \includegraphics[width=0.9\textwidth]{{{dir}/{stem}.pdf}}
    \caption{{{caption}}}
    \label{{fig:{stem}}}
\end{{figure}}
",
        dir = figure_dir,
        stem = stem,
        caption = caption,
    )
}

fn operation_heading(operation: Operation) -> &'static str {
    match operation {
        Operation::EdgeDetection => "Edge Detection",
        Operation::Blur => "Blur Filter",
        Operation::Sharpen => "Sharpen Filter",
    }
}

/// The LaTeX source including every figure from `figure_dir`.
///
/// `figure_dir` is used verbatim in `\includegraphics`, so it should be the
/// path as seen from the LaTeX document.
pub fn latex_snippet(figure_dir: &Path) -> String {
    let dir = figure_dir.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_end_matches('/');

    let mut out = String::from(
        "
% LaTeX code for including performance analysis graphs
% Copy this into your LaTeX document

\\section{Performance Analysis Results}
",
    );

    for operation in Operation::ALL {
        let heading = operation_heading(operation);
        out.push_str(&format!("\n\\subsection{{{} Performance}}\n", heading));
        out.push_str(&figure_block(
            dir,
            &operation.figure_stem(),
            &format!(
                "{}: Performance analysis across different image sizes",
                heading
            ),
        ));
    }

    out.push_str("\n\\subsection{Performance Speedup Summary}\n");
    out.push_str(&figure_block(
        dir,
        SPEEDUP_FIGURE_STEM,
        "Performance speedup comparison: Multithreaded and Distributed vs Sequential processing",
    ));

    out
}

/// The PDF figures the snippet includes that do not exist in `output_dir`.
pub fn missing_figures(output_dir: &Path) -> Vec<PathBuf> {
    Operation::ALL
        .iter()
        .map(|operation| operation.figure_stem())
        .chain(std::iter::once(SPEEDUP_FIGURE_STEM.to_string()))
        .map(|stem| output_dir.join(format!("{}.pdf", stem)))
        .filter(|path| !path.is_file())
        .collect()
}

/// Write the snippet to `latex_figures.tex` inside `output_dir`.
pub fn write_latex_snippet(output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(LATEX_FILE_NAME);
    fs::write(&path, latex_snippet(output_dir))
        .with_context(|| format!("Could not write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}
