use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use fieldreport_pdf::{DocumentKind, HttpFetcher, LayoutConfig, Paper, RenderOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Timecard,
    Receipt,
}

impl From<Kind> for DocumentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Timecard => DocumentKind::Timecard,
            Kind::Receipt => DocumentKind::Receipt,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Render a timecard or receipt record (JSON) into a PDF")]
struct Cli {
    /// Document type of the input record
    kind: Kind,

    /// Input JSON record
    input: PathBuf,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Paper size [default: a4]; also overrides the page size of --layout
    #[arg(long, value_enum)]
    paper: Option<Paper>,

    /// Page margin in millimetres
    #[arg(long)]
    margin: Option<f32>,

    /// JSON layout file; keys it omits keep the --paper defaults
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Generation date stamped in the footer (YYYY-MM-DD, default today)
    #[arg(long)]
    generated: Option<chrono::NaiveDate>,

    /// Logo URL or path used when the record has none
    #[arg(long)]
    logo: Option<String>,
}

fn build_options(cli: &Cli) -> Result<RenderOptions, fieldreport_pdf::Error> {
    let base = LayoutConfig::for_paper(cli.paper.unwrap_or(Paper::A4));
    let mut layout = match &cli.layout {
        Some(path) => LayoutConfig::from_json_file(path, &base)?,
        None => base,
    };
    if let Some(paper) = cli.paper {
        (layout.page_width, layout.page_height) = paper.dimensions();
    }
    if let Some(margin) = cli.margin {
        layout.margin = margin;
    }
    layout.validate()?;

    let mut options = RenderOptions {
        layout,
        default_logo_url: cli.logo.clone(),
        ..RenderOptions::default()
    };
    if let Some(date) = cli.generated {
        options.generated_on = date;
    }
    Ok(options)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = build_options(&cli).and_then(|options| {
        fieldreport_pdf::render_json_file(
            cli.kind.into(),
            &cli.input,
            &cli.output_dir,
            &HttpFetcher::default(),
            &options,
        )
    });

    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_file(json: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, json).unwrap();
        (dir, path)
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["fieldreport-pdf", "timecard", "in.json"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn layout_file_is_laid_over_the_chosen_paper() {
        let (_dir, path) = layout_file(r#"{"margin": 20}"#);
        let cli = parse(&["--paper", "letter", "--layout", path.to_str().unwrap()]);
        let layout = build_options(&cli).unwrap().layout;

        assert_eq!(layout.page_width, 215.9);
        assert_eq!(layout.page_height, 279.4);
        assert_eq!(layout.margin, 20.0);
    }

    #[test]
    fn flags_override_layout_file_values() {
        let (_dir, path) = layout_file(r#"{"page_width": 300, "page_height": 400, "margin": 20}"#);
        let cli = parse(&["--paper", "a4", "--margin", "12", "--layout", path.to_str().unwrap()]);
        let layout = build_options(&cli).unwrap().layout;

        assert_eq!((layout.page_width, layout.page_height), (210.0, 297.0));
        assert_eq!(layout.margin, 12.0);
    }

    #[test]
    fn layout_file_page_size_stands_without_paper_flag() {
        let (_dir, path) = layout_file(r#"{"page_width": 300, "page_height": 400}"#);
        let cli = parse(&["--layout", path.to_str().unwrap()]);
        let layout = build_options(&cli).unwrap().layout;

        assert_eq!((layout.page_width, layout.page_height), (300.0, 400.0));
        assert_eq!(layout.margin, 15.0);
    }

    #[test]
    fn negative_margin_flag_is_rejected() {
        let cli = parse(&["--margin=-4"]);
        assert!(matches!(build_options(&cli), Err(fieldreport_pdf::Error::Config(_))));
    }
}
