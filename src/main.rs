use clap::{Parser, ValueEnum};
use memo_gen::{
    artifact_file_name, DirectoryAssets, Document, DocumentBuilder, DocumentEncoder, Font,
    FontBook, FontFace, NoAssets, Notice, PdfEncoder, ReportData, Template, TemplateVariant,
};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    Standard,
    Letterhead,
    Memorandum,
}

impl From<Variant> for TemplateVariant {
    fn from(value: Variant) -> Self {
        match value {
            Variant::Standard => TemplateVariant::Standard,
            Variant::Letterhead => TemplateVariant::Letterhead,
            Variant::Memorandum => TemplateVariant::Memorandum,
        }
    }
}

/// Lay out a monthly activity report and write it as a PDF
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Report data as JSON
    #[arg(long)]
    report: PathBuf,

    /// Memo layout to use
    #[arg(long, value_enum)]
    variant: Variant,

    /// Template JSON replacing the built-in wording of the chosen variant
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory holding `logo.*` and `signature.*`
    #[arg(long)]
    assets: Option<PathBuf>,

    /// TrueType font to embed, as `NAME=PATH`; template styles refer to it by NAME
    #[arg(long = "font", value_parser = parse_font)]
    fonts: Vec<(String, PathBuf)>,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let report: ReportData = serde_json::from_str(&tokio::fs::read_to_string(&args.report).await?)?;

    let variant = TemplateVariant::from(args.variant);
    let template = match &args.template {
        Some(path) => {
            let template = Template::from_json(&tokio::fs::read_to_string(path).await?)?;
            if template.variant != variant {
                log::warn!(
                    "{} is a {:?} template, using it in place of {:?}",
                    path.display(),
                    template.variant,
                    variant
                );
            }
            template
        }
        None => Template::for_variant(variant),
    };

    let mut builder = DocumentBuilder::new(template);
    if !args.fonts.is_empty() {
        let mut book = FontBook::with_builtin_fonts();
        for (name, path) in &args.fonts {
            let font = Font::load(tokio::fs::read(path).await?)?;
            log::debug!("registered {} as {name}", path.display());
            book.register(name, FontFace::TrueType(font));
        }
        builder = builder.with_fonts(Arc::new(book));
    }
    let document = match &args.assets {
        Some(dir) => builder.build(&report, &DirectoryAssets::new(dir)).await?,
        None => builder.build(&report, &NoAssets).await?,
    };
    report_notices(&document);

    let bytes = PdfEncoder::new().encode_to_vec(&document)?;
    let path = args
        .out
        .join(artifact_file_name(&report.period, &report.sender, "pdf"));
    tokio::fs::write(&path, bytes).await?;

    println!("{} ({} page(s))", path.display(), document.page_count());
    Ok(())
}

fn parse_font(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{value}`")),
    }
}

fn report_notices(document: &Document) {
    for notice in &document.notices {
        match notice {
            Notice::AssetUnavailable { asset, reason } => {
                eprintln!("warning: {asset} left blank: {reason}")
            }
            Notice::EmptyDataset { period } => {
                eprintln!(
                    "note: no activities recorded for {}",
                    period.sequence_number()
                )
            }
        }
    }
}
