use clap::Parser;
use photolib_extract::{config::ExtractConfig, extract, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photolib-extract")]
#[command(about = "Extract albums, photos and captions from a photo library bundle")]
#[command(long_about = "\
Extract albums, photos and captions from a photo library bundle

Reads the library's AlbumData.xml and writes a portable copy:

  <dest>/
  ├── albums.txt                   # Album names, each followed by its photos
  └── Masters/2020/
      ├── a.jpg                    # Photos copied under their library sub-path
      └── index.txt                # Captions and comments of this directory

Built-in albums (Photos, Last 12 Months, Last Import, Flagged) are left out
of albums.txt. Catalog entries whose file is missing are skipped; pass
--verbose to list them.

Indices are rewritten on every run, but start from an empty destination to
avoid leftovers from earlier runs.")]
#[command(version = version_string())]
struct Cli {
    /// Photo library bundle (the directory containing AlbumData.xml)
    source: PathBuf,

    /// Output directory (created if missing)
    dest: PathBuf,

    /// Print each catalog image whose file could not be found
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ExtractConfig::new(cli.source, cli.dest).with_verbose(cli.verbose);

    println!("{}", output::format_start(&config.source, &config.dest));
    let report = extract::extract(&config)?;
    output::print_warnings(&report);
    output::print_summary(&report);
    println!("{}", output::format_complete(&config.dest));

    Ok(())
}
