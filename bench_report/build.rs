use clap::CommandFactory;
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    // Get version from Cargo.toml
    let version = env::var("CARGO_PKG_VERSION")?;
    let version: &'static str = Box::leak(version.into_boxed_str());

    // Path calculation to the workspace root
    let workspace_root = manifest_dir.join("..");
    let man_dir = workspace_root.join("man").join("man1");
    let docs_dir = workspace_root.join("docs");

    fs::create_dir_all(&man_dir)?;
    fs::create_dir_all(&docs_dir)?;

    // Generate the manpage
    let cmd = bench_report_cli_types::Cli::command().version(version);
    let man = clap_mangen::Man::new(cmd);
    let mut buffer: Vec<u8> = Default::default();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("bench-report.1"), &buffer)?;

    // Generate markdown documentation
    let markdown = clap_markdown::help_markdown::<bench_report_cli_types::Cli>();
    fs::write(docs_dir.join("manpage.md"), &markdown)?;

    // Tell cargo to re-run this if the CLI definition changes
    println!("cargo:rerun-if-changed=../cli_types/src/lib.rs");

    Ok(())
}
